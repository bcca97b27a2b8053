use crate::validation::ValidationErrors;

/// Common error type for `beneficios_core`.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    #[error("conflict: {0}")]
    Conflict(String),
}

pub type Result<T> = std::result::Result<T, Error>;
