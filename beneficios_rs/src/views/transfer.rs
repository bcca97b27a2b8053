use super::{Alerts, LOAD_LIST_FAILED};
use crate::BeneficiosError;
use crate::backend::BeneficioBackend;
use beneficios_core::transfer::{TransferPreview, can_submit};
use beneficios_core::{Beneficio, BeneficioId, TransferDraft, ValidationErrors, Valor};
use std::sync::Arc;

#[derive(Debug)]
pub enum TransferOutcome {
    /// `message` is the server's confirmation text. `reloaded` is false when
    /// the balances could not be refreshed afterwards.
    Done { message: String, reloaded: bool },
    Invalid(ValidationErrors),
    Busy,
    Failed(BeneficiosError),
}

pub struct TransferenciaView {
    backend: Arc<dyn BeneficioBackend>,
    alerts: Arc<dyn Alerts>,
    beneficios: Vec<Beneficio>,
    draft: TransferDraft,
    processando: bool,
}

impl TransferenciaView {
    /// An empty screen; call [`TransferenciaView::load`] to fill the selectors.
    pub fn new(backend: Arc<dyn BeneficioBackend>, alerts: Arc<dyn Alerts>) -> Self {
        Self {
            backend,
            alerts,
            beneficios: Vec::new(),
            draft: TransferDraft::default(),
            processando: false,
        }
    }

    /// Loads the selectable benefits. A failure is alerted and keeps the
    /// previous rows.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn load(&mut self) -> Result<(), BeneficiosError> {
        match self.backend.list().await {
            Ok(beneficios) => {
                self.beneficios = beneficios;
                Ok(())
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to load benefits");
                self.alerts.alert(LOAD_LIST_FAILED);
                Err(err)
            }
        }
    }

    pub fn beneficios(&self) -> &[Beneficio] {
        &self.beneficios
    }

    pub fn draft(&self) -> &TransferDraft {
        &self.draft
    }

    pub fn processando(&self) -> bool {
        self.processando
    }

    pub fn set_origem(&mut self, id: Option<BeneficioId>) {
        self.draft.from_id = id;
    }

    pub fn set_destino(&mut self, id: Option<BeneficioId>) {
        self.draft.to_id = id;
    }

    pub fn set_valor(&mut self, valor: Option<Valor>) {
        self.draft.valor = valor;
    }

    pub fn origem(&self) -> Option<&Beneficio> {
        self.find(self.draft.from_id)
    }

    pub fn destino(&self) -> Option<&Beneficio> {
        self.find(self.draft.to_id)
    }

    fn find(&self, id: Option<BeneficioId>) -> Option<&Beneficio> {
        let id = id?;
        self.beneficios.iter().find(|b| b.id == Some(id))
    }

    pub fn preview(&self) -> TransferPreview {
        TransferPreview::compute(&self.beneficios, &self.draft)
    }

    pub fn can_submit(&self) -> bool {
        can_submit(&self.draft, self.processando)
    }

    /// On success the server's text is alerted, the form resets and the
    /// balances reload.
    #[tracing::instrument(level = "debug", skip(self), fields(draft = ?self.draft))]
    pub async fn submit(&mut self) -> TransferOutcome {
        if self.processando {
            return TransferOutcome::Busy;
        }
        let transferencia = match self.draft.to_transferencia() {
            Ok(t) => t,
            Err(errors) => return TransferOutcome::Invalid(errors),
        };

        self.processando = true;
        let result = self.backend.transfer(&transferencia).await;
        let outcome = match result {
            Ok(message) => {
                tracing::info!(
                    from_id = transferencia.from_id,
                    to_id = transferencia.to_id,
                    "transfer accepted"
                );
                self.alerts.alert(&message);
                self.draft = TransferDraft::default();
                let reloaded = self.load().await.is_ok();
                TransferOutcome::Done { message, reloaded }
            }
            Err(err) => {
                tracing::error!(error = %err, "transfer failed");
                self.alerts
                    .alert(&format!("Erro na transferência: {}", err.message));
                TransferOutcome::Failed(err)
            }
        };
        self.processando = false;
        outcome
    }
}
