use crate::{BeneficiosClient, BeneficiosError};
use beneficios_core::{Beneficio, BeneficioId, Transferencia};
use reqwest::Method;
use serde::Serialize;

const BASE_PATH: &str = "/api/v1/beneficios";

/// Typed access to `/api/v1/beneficios`.
#[derive(Debug, Clone)]
pub struct BeneficiosApi {
    client: BeneficiosClient,
}

impl BeneficiosApi {
    pub(crate) fn new(client: BeneficiosClient) -> Self {
        Self { client }
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn list(&self) -> Result<Vec<Beneficio>, BeneficiosError> {
        self.client
            .request_json(Method::GET, BASE_PATH, None::<&()>, None::<&()>)
            .await
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn get(&self, id: BeneficioId) -> Result<Beneficio, BeneficiosError> {
        self.client
            .request_json(Method::GET, &format!("{BASE_PATH}/{id}"), None::<&()>, None::<&()>)
            .await
    }

    /// Sends the record without its id; the server assigns one.
    #[tracing::instrument(level = "debug", skip(self, beneficio), fields(nome = %beneficio.nome))]
    pub async fn create(&self, beneficio: &Beneficio) -> Result<Beneficio, BeneficiosError> {
        let body = Beneficio {
            id: None,
            ..beneficio.clone()
        };
        self.client
            .request_json(Method::POST, BASE_PATH, None::<&()>, Some(&body))
            .await
    }

    #[tracing::instrument(level = "debug", skip(self, beneficio))]
    pub async fn update(
        &self,
        id: BeneficioId,
        beneficio: &Beneficio,
    ) -> Result<Beneficio, BeneficiosError> {
        self.client
            .request_json(
                Method::PUT,
                &format!("{BASE_PATH}/{id}"),
                None::<&()>,
                Some(beneficio),
            )
            .await
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn delete(&self, id: BeneficioId) -> Result<(), BeneficiosError> {
        self.client
            .request_empty(Method::DELETE, &format!("{BASE_PATH}/{id}"))
            .await
    }

    /// Returns the server's confirmation text.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn transfer(&self, transferencia: &Transferencia) -> Result<String, BeneficiosError> {
        self.client
            .request_text(
                Method::POST,
                &format!("{BASE_PATH}/transferir"),
                Some(transferencia),
            )
            .await
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn search_by_name(&self, nome: &str) -> Result<Vec<Beneficio>, BeneficiosError> {
        #[derive(Serialize)]
        struct Query<'a> {
            nome: &'a str,
        }
        self.client
            .request_json(
                Method::GET,
                &format!("{BASE_PATH}/buscar"),
                Some(&Query { nome }),
                None::<&()>,
            )
            .await
    }
}
