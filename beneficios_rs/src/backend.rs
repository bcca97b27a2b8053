//! The seam between the screens and the REST API.

use crate::{BeneficiosApi, BeneficiosError};
use async_trait::async_trait;
use beneficios_core::{Beneficio, BeneficioId, Transferencia};

#[async_trait]
pub trait BeneficioBackend: Send + Sync {
    async fn list(&self) -> Result<Vec<Beneficio>, BeneficiosError>;
    async fn get(&self, id: BeneficioId) -> Result<Beneficio, BeneficiosError>;
    async fn create(&self, beneficio: &Beneficio) -> Result<Beneficio, BeneficiosError>;
    async fn update(
        &self,
        id: BeneficioId,
        beneficio: &Beneficio,
    ) -> Result<Beneficio, BeneficiosError>;
    async fn delete(&self, id: BeneficioId) -> Result<(), BeneficiosError>;
    async fn transfer(&self, transferencia: &Transferencia) -> Result<String, BeneficiosError>;
    async fn search_by_name(&self, nome: &str) -> Result<Vec<Beneficio>, BeneficiosError>;
}

#[async_trait]
impl BeneficioBackend for BeneficiosApi {
    async fn list(&self) -> Result<Vec<Beneficio>, BeneficiosError> {
        BeneficiosApi::list(self).await
    }

    async fn get(&self, id: BeneficioId) -> Result<Beneficio, BeneficiosError> {
        BeneficiosApi::get(self, id).await
    }

    async fn create(&self, beneficio: &Beneficio) -> Result<Beneficio, BeneficiosError> {
        BeneficiosApi::create(self, beneficio).await
    }

    async fn update(
        &self,
        id: BeneficioId,
        beneficio: &Beneficio,
    ) -> Result<Beneficio, BeneficiosError> {
        BeneficiosApi::update(self, id, beneficio).await
    }

    async fn delete(&self, id: BeneficioId) -> Result<(), BeneficiosError> {
        BeneficiosApi::delete(self, id).await
    }

    async fn transfer(&self, transferencia: &Transferencia) -> Result<String, BeneficiosError> {
        BeneficiosApi::transfer(self, transferencia).await
    }

    async fn search_by_name(&self, nome: &str) -> Result<Vec<Beneficio>, BeneficiosError> {
        BeneficiosApi::search_by_name(self, nome).await
    }
}
