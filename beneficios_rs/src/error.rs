use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeneficiosErrorKind {
    NotFound,
    Auth,
    Validation,
    Server,
    Transport,
    Serialization,
    Config,
}

#[derive(Debug, Error)]
#[error("{kind:?}: {message}")]
pub struct BeneficiosError {
    pub kind: BeneficiosErrorKind,
    pub status: Option<u16>,
    /// Response body text when the server sent one, else a description of
    /// the failure.
    pub message: String,
}

impl BeneficiosError {
    pub fn new(kind: BeneficiosErrorKind, status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            kind,
            status,
            message: message.into(),
        }
    }

    /// Classifies a non-success HTTP status.
    pub fn from_status(code: u16, message: impl Into<String>) -> Self {
        let kind = if code == 404 {
            BeneficiosErrorKind::NotFound
        } else if code == 401 || code == 403 {
            BeneficiosErrorKind::Auth
        } else if (400..500).contains(&code) {
            BeneficiosErrorKind::Validation
        } else {
            BeneficiosErrorKind::Server
        };
        Self::new(kind, Some(code), message)
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == BeneficiosErrorKind::NotFound
    }
}

impl From<reqwest::Error> for BeneficiosError {
    fn from(e: reqwest::Error) -> Self {
        let kind = if e.is_decode() {
            BeneficiosErrorKind::Serialization
        } else {
            BeneficiosErrorKind::Transport
        };
        BeneficiosError::new(kind, e.status().map(|s| s.as_u16()), e.to_string())
    }
}

impl From<serde_json::Error> for BeneficiosError {
    fn from(e: serde_json::Error) -> Self {
        BeneficiosError::new(BeneficiosErrorKind::Serialization, None, e.to_string())
    }
}

impl From<beneficios_core::Error> for BeneficiosError {
    fn from(e: beneficios_core::Error) -> Self {
        let kind = match e {
            beneficios_core::Error::Validation(_) => BeneficiosErrorKind::Validation,
            _ => BeneficiosErrorKind::Config,
        };
        BeneficiosError::new(kind, None, e.to_string())
    }
}
