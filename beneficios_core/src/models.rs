use crate::money::Valor;
use serde::{Deserialize, Deserializer, Serialize};

pub type BeneficioId = i64;

/// A benefit record as exchanged with the backend.
///
/// `id` and `version` are assigned by the server and left out of the request
/// body while absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Beneficio {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<BeneficioId>,
    pub nome: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descricao: Option<String>,
    pub valor: Valor,
    #[serde(default = "default_ativo", deserialize_with = "ativo_or_default")]
    pub ativo: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
}

impl Beneficio {
    pub fn new(nome: impl Into<String>, descricao: Option<String>, valor: Valor) -> Self {
        Self {
            id: None,
            nome: nome.into(),
            descricao,
            valor,
            ativo: true,
            version: None,
        }
    }

    /// Description for display; blank descriptions count as absent.
    pub fn descricao_or_none(&self) -> Option<&str> {
        self.descricao.as_deref().filter(|d| !d.trim().is_empty())
    }
}

fn default_ativo() -> bool {
    true
}

fn ativo_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(true))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transferencia {
    pub from_id: BeneficioId,
    pub to_id: BeneficioId,
    pub valor: Valor,
}
