//! Screen models: the state and actions behind each route.
//!
//! A screen talks to the backend through [`BeneficioBackend`] and reports to
//! the user through [`Alerts`]. Request failures are logged, alerted with a
//! fixed message, and handed back to the caller.
//!
//! [`BeneficioBackend`]: crate::backend::BeneficioBackend

mod form;
mod list;
mod transfer;

pub use form::{BeneficioFormView, FormMode, Redirect, SaveOutcome};
pub use list::{BeneficioListView, DeleteOutcome};
pub use transfer::{TransferOutcome, TransferenciaView};

/// Blocking user notifications.
pub trait Alerts: Send + Sync {
    fn alert(&self, message: &str);
    /// Returns `true` when the user accepts.
    fn confirm(&self, message: &str) -> bool;
}

pub const LOAD_LIST_FAILED: &str = "Erro ao carregar benefícios. Tente novamente.";
