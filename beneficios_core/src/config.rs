use crate::{Error, Result};
use std::time::Duration;
use url::Url;

pub const DEFAULT_API_URL: &str = "http://localhost:8080";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Where the backend lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    #[tracing::instrument(level = "debug")]
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads `BENEFICIOS_API_URL` and `BENEFICIOS_HTTP_TIMEOUT_SECS` through
    /// `lookup`; blank values fall back to the defaults. Only the timeout is
    /// parsed here; call [`ClientConfig::validate`] once overrides are applied.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut cfg = Self::default();
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = non_blank("BENEFICIOS_API_URL") {
            cfg.api_url = v.trim().to_string();
        }
        if let Some(v) = non_blank("BENEFICIOS_HTTP_TIMEOUT_SECS") {
            let secs: u64 = v.trim().parse().map_err(|_| {
                Error::InvalidInput(format!("invalid BENEFICIOS_HTTP_TIMEOUT_SECS: {v}"))
            })?;
            cfg.timeout = Duration::from_secs(secs);
        }
        Ok(cfg)
    }

    /// Requires an absolute `http`/`https` URL with a host and a non-zero
    /// timeout.
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.api_url).map_err(|e| {
            Error::InvalidInput(format!("invalid api url `{}`: {e}", self.api_url))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::InvalidInput(format!(
                "api url must use http or https, got `{}`",
                self.api_url
            )));
        }
        if url.host_str().is_none_or(str::is_empty) {
            return Err(Error::InvalidInput(format!(
                "api url has no host: `{}`",
                self.api_url
            )));
        }
        if self.timeout.is_zero() {
            return Err(Error::InvalidInput("timeout must be greater than zero".into()));
        }
        Ok(())
    }
}
