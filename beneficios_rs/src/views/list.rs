use super::{Alerts, LOAD_LIST_FAILED};
use crate::BeneficiosError;
use crate::backend::BeneficioBackend;
use beneficios_core::{Beneficio, BeneficioId};
use std::sync::Arc;

const SEARCH_FAILED: &str = "Erro na busca. Tente novamente.";
const CONFIRM_DELETE: &str = "Tem certeza que deseja excluir este benefício?";
const DELETED: &str = "Benefício excluído com sucesso!";
const DELETE_FAILED: &str = "Erro ao excluir benefício. Tente novamente.";

#[derive(Debug)]
pub enum DeleteOutcome {
    Cancelled,
    /// `reloaded` is false when the follow-up reload failed; the rows then
    /// still show the deleted record.
    Deleted { reloaded: bool },
    Failed(BeneficiosError),
}

pub struct BeneficioListView {
    backend: Arc<dyn BeneficioBackend>,
    alerts: Arc<dyn Alerts>,
    beneficios: Vec<Beneficio>,
    carregando: bool,
    filtro_nome: String,
}

impl BeneficioListView {
    pub fn new(backend: Arc<dyn BeneficioBackend>, alerts: Arc<dyn Alerts>) -> Self {
        Self {
            backend,
            alerts,
            beneficios: Vec::new(),
            carregando: false,
            filtro_nome: String::new(),
        }
    }

    pub fn beneficios(&self) -> &[Beneficio] {
        &self.beneficios
    }

    pub fn carregando(&self) -> bool {
        self.carregando
    }

    pub fn filtro_nome(&self) -> &str {
        &self.filtro_nome
    }

    /// Replaces the rows with the full list. On failure the previous rows
    /// are kept.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn load(&mut self) -> Result<(), BeneficiosError> {
        self.carregando = true;
        let result = self.backend.list().await;
        self.carregando = false;
        match result {
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

    /// A blank filter reloads the full list.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn search(&mut self, filtro: &str) -> Result<(), BeneficiosError> {
        self.filtro_nome = filtro.to_string();
        if filtro.trim().is_empty() {
            return self.load().await;
        }

        self.carregando = true;
        let result = self.backend.search_by_name(filtro).await;
        self.carregando = false;
        match result {
            Ok(beneficios) => {
                self.beneficios = beneficios;
                Ok(())
            }
            Err(err) => {
                tracing::error!(error = %err, "benefit search failed");
                self.alerts.alert(SEARCH_FAILED);
                Err(err)
            }
        }
    }

    /// Asks for confirmation, deletes, then reloads the list.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn delete(&mut self, id: BeneficioId) -> DeleteOutcome {
        if !self.alerts.confirm(CONFIRM_DELETE) {
            return DeleteOutcome::Cancelled;
        }
        match self.backend.delete(id).await {
            Ok(()) => {
                tracing::info!(id, "benefit deleted");
                self.alerts.alert(DELETED);
                let reloaded = self.load().await.is_ok();
                DeleteOutcome::Deleted { reloaded }
            }
            Err(err) => {
                tracing::error!(id, error = %err, "failed to delete benefit");
                self.alerts.alert(DELETE_FAILED);
                DeleteOutcome::Failed(err)
            }
        }
    }
}
