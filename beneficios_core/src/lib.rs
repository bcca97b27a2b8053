//! Domain types and presentation rules for the benefits client.
//!
//! Nothing here performs I/O; the HTTP SDK and the screens live in
//! `beneficios_rs`.

pub mod config;
pub mod error;
pub mod models;
pub mod money;
pub mod o11y;
pub mod transfer;
pub mod validation;

pub use config::ClientConfig;
pub use error::{Error, Result};
pub use models::{Beneficio, BeneficioId, Transferencia};
pub use money::{ParseValorError, Valor};
pub use transfer::{BalancePreview, TransferPreview};
pub use validation::{BeneficioDraft, Field, FieldError, Rule, TransferDraft, ValidationErrors};
