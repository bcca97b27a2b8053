use crate::error::{BeneficiosError, BeneficiosErrorKind};
use beneficios_core::ClientConfig;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Method, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

const USER_AGENT: &str = concat!("beneficios/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct BeneficiosClient {
    base_url: String,
    http: reqwest::Client,
}

impl BeneficiosClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http(base_url, reqwest::Client::new())
    }

    /// Builds a client honoring the configured request timeout.
    pub fn from_config(cfg: &ClientConfig) -> Result<Self, BeneficiosError> {
        cfg.validate()?;
        let http = reqwest::Client::builder()
            .timeout(cfg.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| BeneficiosError::new(BeneficiosErrorKind::Config, None, e.to_string()))?;
        Ok(Self::with_http(cfg.api_url.clone(), http))
    }

    fn with_http(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        let base_url = base_url.into();
        let base_url = base_url.trim_end_matches('/').to_string();
        Self { base_url, http }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    #[tracing::instrument(level = "debug", skip(self, query, body, extra_headers), fields(base_url = %self.base_url))]
    pub(crate) async fn send(
        &self,
        method: Method,
        path: &str,
        query: Option<&impl Serialize>,
        body: Option<&impl Serialize>,
        extra_headers: Option<HeaderMap>,
    ) -> Result<Response, BeneficiosError> {
        let mut req = self.http.request(method, self.url(path));
        if let Some(q) = query {
            req = req.query(q);
        }
        if let Some(b) = body {
            req = req.json(b);
        }
        if let Some(headers) = extra_headers {
            req = req.headers(headers);
        }
        let resp = req.send().await?;
        tracing::debug!(status = resp.status().as_u16(), "response received");
        Ok(resp)
    }

    /// Turns a non-success response into an error carrying the body text.
    pub(crate) async fn map_error(&self, resp: Response) -> BeneficiosError {
        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();
        let message = if text.trim().is_empty() {
            status.to_string()
        } else {
            text
        };
        BeneficiosError::from_status(status.as_u16(), message)
    }

    pub async fn request_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: Option<&impl Serialize>,
        body: Option<&impl Serialize>,
    ) -> Result<T, BeneficiosError> {
        let resp = self.send(method, path, query, body, None).await?;
        if resp.status().is_success() {
            if resp.status().as_u16() == 204 {
                return Ok(serde_json::from_value(Value::Null)?);
            }
            return Ok(resp.json::<T>().await?);
        }
        Err(self.map_error(resp).await)
    }

    /// For endpoints that answer with a plain-text message.
    pub async fn request_text(
        &self,
        method: Method,
        path: &str,
        body: Option<&impl Serialize>,
    ) -> Result<String, BeneficiosError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("text/plain, */*"));
        let resp = self
            .send(method, path, None::<&()>, body, Some(headers))
            .await?;
        if resp.status().is_success() {
            return Ok(resp.text().await?);
        }
        Err(self.map_error(resp).await)
    }

    /// For endpoints whose success response carries no body worth reading.
    pub async fn request_empty(&self, method: Method, path: &str) -> Result<(), BeneficiosError> {
        let resp = self
            .send(method, path, None::<&()>, None::<&()>, None)
            .await?;
        if resp.status().is_success() {
            return Ok(());
        }
        Err(self.map_error(resp).await)
    }

    pub fn beneficios(&self) -> crate::apis::BeneficiosApi {
        crate::apis::BeneficiosApi::new(self.clone())
    }
}
