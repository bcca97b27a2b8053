use super::Alerts;
use crate::BeneficiosError;
use crate::backend::BeneficioBackend;
use crate::routes::Route;
use beneficios_core::{Beneficio, BeneficioDraft, BeneficioId, ValidationErrors, Valor};
use std::sync::Arc;

const LOAD_FAILED: &str = "Erro ao carregar benefício. Tente novamente.";
const CREATED: &str = "Benefício criado com sucesso!";
const UPDATED: &str = "Benefício atualizado com sucesso!";
const SAVE_FAILED: &str = "Erro ao salvar benefício. Tente novamente.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Novo,
    Edicao {
        id: BeneficioId,
        version: Option<i64>,
    },
}

/// The edit screen could not load its record; go to `to` instead.
#[derive(Debug)]
pub struct Redirect {
    pub to: Route,
    pub error: BeneficiosError,
}

#[derive(Debug)]
pub enum SaveOutcome {
    Saved { beneficio: Beneficio, next: Route },
    Invalid(ValidationErrors),
    /// A save already went through; the form stays locked afterwards.
    Busy,
    Failed(BeneficiosError),
}

pub struct BeneficioFormView {
    backend: Arc<dyn BeneficioBackend>,
    alerts: Arc<dyn Alerts>,
    mode: FormMode,
    draft: BeneficioDraft,
    salvando: bool,
}

impl BeneficioFormView {
    pub fn new_form(backend: Arc<dyn BeneficioBackend>, alerts: Arc<dyn Alerts>) -> Self {
        Self {
            backend,
            alerts,
            mode: FormMode::Novo,
            draft: BeneficioDraft::default(),
            salvando: false,
        }
    }

    #[tracing::instrument(level = "debug", skip(backend, alerts))]
    pub async fn open_edit(
        backend: Arc<dyn BeneficioBackend>,
        alerts: Arc<dyn Alerts>,
        id: BeneficioId,
    ) -> Result<Self, Redirect> {
        match backend.get(id).await {
            Ok(beneficio) => Ok(Self {
                mode: FormMode::Edicao {
                    id: beneficio.id.unwrap_or(id),
                    version: beneficio.version,
                },
                draft: BeneficioDraft::from_beneficio(&beneficio),
                backend,
                alerts,
                salvando: false,
            }),
            Err(error) => {
                tracing::error!(id, error = %error, "failed to load benefit");
                alerts.alert(LOAD_FAILED);
                Err(Redirect {
                    to: Route::List,
                    error,
                })
            }
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn is_edicao(&self) -> bool {
        matches!(self.mode, FormMode::Edicao { .. })
    }

    pub fn title(&self) -> &'static str {
        if self.is_edicao() {
            "Editar Benefício"
        } else {
            "Novo Benefício"
        }
    }

    pub fn draft(&self) -> &BeneficioDraft {
        &self.draft
    }

    pub fn salvando(&self) -> bool {
        self.salvando
    }

    pub fn set_nome(&mut self, nome: impl Into<String>) {
        self.draft.nome = nome.into();
    }

    pub fn set_descricao(&mut self, descricao: impl Into<String>) {
        self.draft.descricao = descricao.into();
    }

    pub fn set_valor(&mut self, valor: Option<Valor>) {
        self.draft.valor = valor;
    }

    /// Only edits can change the active flag; returns whether it applied.
    pub fn set_ativo(&mut self, ativo: bool) -> bool {
        if !self.is_edicao() {
            return false;
        }
        self.draft.ativo = ativo;
        true
    }

    pub fn errors(&self) -> ValidationErrors {
        self.draft.errors()
    }

    pub fn can_submit(&self) -> bool {
        !self.salvando && self.draft.is_valid()
    }

    #[tracing::instrument(level = "debug", skip(self), fields(mode = ?self.mode))]
    pub async fn save(&mut self) -> SaveOutcome {
        if self.salvando {
            return SaveOutcome::Busy;
        }
        let (id, version) = match self.mode {
            FormMode::Novo => (None, None),
            FormMode::Edicao { id, version } => (Some(id), version),
        };
        let record = match self.draft.to_beneficio(id, version) {
            Ok(record) => record,
            Err(errors) => return SaveOutcome::Invalid(errors),
        };

        self.salvando = true;
        let result = match id {
            None => self.backend.create(&record).await,
            Some(id) => self.backend.update(id, &record).await,
        };
        match result {
            Ok(beneficio) => {
                tracing::info!(id = ?beneficio.id, "benefit saved");
                self.alerts
                    .alert(if self.is_edicao() { UPDATED } else { CREATED });
                SaveOutcome::Saved {
                    beneficio,
                    next: Route::List,
                }
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to save benefit");
                self.alerts.alert(SAVE_FAILED);
                self.salvando = false;
                SaveOutcome::Failed(err)
            }
        }
    }
}
