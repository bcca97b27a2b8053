//! Form state and validation rules for the benefit and transfer screens.
//!
//! Rules mirror what the backend enforces on its DTOs so that a form which
//! validates here is not rejected for shape reasons server-side. Messages are
//! the user-facing Portuguese texts shown under each field.

use crate::models::{Beneficio, BeneficioId, Transferencia};
use crate::money::Valor;
use std::fmt;

pub const NOME_MIN_CHARS: usize = 3;
pub const NOME_MAX_CHARS: usize = 100;
pub const DESCRICAO_MAX_CHARS: usize = 255;
pub const VALOR_MAX_INTEGER_DIGITS: u32 = 13;
pub const VALOR_FRACTION_DIGITS: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Nome,
    Descricao,
    Valor,
    FromId,
    ToId,
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Field::Nome => "Nome",
            Field::Descricao => "Descrição",
            Field::Valor => "Valor",
            Field::FromId => "Benefício origem",
            Field::ToId => "Benefício destino",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Required,
    MinLength(usize),
    MaxLength(usize),
    Positive,
    Digits { integer: u32, fraction: u32 },
    DistinctIds,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub rule: Rule,
}

impl FieldError {
    fn new(field: Field, rule: Rule) -> Self {
        Self { field, rule }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = self.field.label();
        match self.rule {
            Rule::Required => write!(f, "{label} é obrigatório"),
            Rule::MinLength(n) => write!(f, "{label} deve ter pelo menos {n} caracteres"),
            Rule::MaxLength(n) => write!(f, "{label} deve ter no máximo {n} caracteres"),
            Rule::Positive => write!(f, "{label} deve ser maior que zero"),
            Rule::Digits { integer, fraction } => write!(
                f,
                "{label} deve ter no máximo {integer} dígitos inteiros e {fraction} decimais"
            ),
            Rule::DistinctIds => f.write_str("Não é possível transferir para o mesmo benefício"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
#[error("{}", join_messages(.0))]
pub struct ValidationErrors(Vec<FieldError>);

fn join_messages(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    pub fn for_field(&self, field: Field) -> impl Iterator<Item = &FieldError> {
        self.0.iter().filter(move |e| e.field == field)
    }

    pub fn has(&self, field: Field, rule: Rule) -> bool {
        self.0.iter().any(|e| e.field == field && e.rule == rule)
    }

    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }

    fn push(&mut self, field: Field, rule: Rule) {
        self.0.push(FieldError::new(field, rule));
    }

    fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

fn check_valor(valor: Option<Valor>, errors: &mut ValidationErrors) {
    match valor {
        None => errors.push(Field::Valor, Rule::Required),
        Some(v) if !v.is_positive() => errors.push(Field::Valor, Rule::Positive),
        Some(v) if v.integer_digits() > VALOR_MAX_INTEGER_DIGITS => errors.push(
            Field::Valor,
            Rule::Digits {
                integer: VALOR_MAX_INTEGER_DIGITS,
                fraction: VALOR_FRACTION_DIGITS,
            },
        ),
        Some(_) => {}
    }
}

/// Editable state of the create/edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeneficioDraft {
    pub nome: String,
    pub descricao: String,
    pub valor: Option<Valor>,
    pub ativo: bool,
}

impl Default for BeneficioDraft {
    fn default() -> Self {
        Self {
            nome: String::new(),
            descricao: String::new(),
            valor: None,
            ativo: true,
        }
    }
}

impl BeneficioDraft {
    pub fn from_beneficio(b: &Beneficio) -> Self {
        Self {
            nome: b.nome.clone(),
            descricao: b.descricao.clone().unwrap_or_default(),
            valor: Some(b.valor),
            ativo: b.ativo,
        }
    }

    pub fn errors(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::default();

        let nome = self.nome.trim();
        let nome_chars = nome.chars().count();
        if nome.is_empty() {
            errors.push(Field::Nome, Rule::Required);
        } else if nome_chars < NOME_MIN_CHARS {
            errors.push(Field::Nome, Rule::MinLength(NOME_MIN_CHARS));
        } else if nome_chars > NOME_MAX_CHARS {
            errors.push(Field::Nome, Rule::MaxLength(NOME_MAX_CHARS));
        }

        check_valor(self.valor, &mut errors);

        if self.descricao.chars().count() > DESCRICAO_MAX_CHARS {
            errors.push(Field::Descricao, Rule::MaxLength(DESCRICAO_MAX_CHARS));
        }
        errors
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        self.errors().into_result()
    }

    pub fn is_valid(&self) -> bool {
        self.errors().is_empty()
    }

    /// Builds the request record. `id` and `version` come from the record
    /// being edited, if any.
    pub fn to_beneficio(
        &self,
        id: Option<BeneficioId>,
        version: Option<i64>,
    ) -> Result<Beneficio, ValidationErrors> {
        self.validate()?;
        let descricao = self.descricao.trim();
        Ok(Beneficio {
            id,
            nome: self.nome.trim().to_string(),
            descricao: (!descricao.is_empty()).then(|| descricao.to_string()),
            valor: self.valor.unwrap_or_default(),
            ativo: self.ativo,
            version,
        })
    }
}

/// Editable state of the transfer form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransferDraft {
    pub from_id: Option<BeneficioId>,
    pub to_id: Option<BeneficioId>,
    pub valor: Option<Valor>,
}

impl TransferDraft {
    pub fn same_target(&self) -> bool {
        matches!((self.from_id, self.to_id), (Some(a), Some(b)) if a == b)
    }

    pub fn errors(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::default();
        if self.from_id.is_none() {
            errors.push(Field::FromId, Rule::Required);
        }
        if self.to_id.is_none() {
            errors.push(Field::ToId, Rule::Required);
        }
        check_valor(self.valor, &mut errors);
        if self.same_target() {
            errors.push(Field::ToId, Rule::DistinctIds);
        }
        errors
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        self.errors().into_result()
    }

    pub fn is_valid(&self) -> bool {
        self.errors().is_empty()
    }

    pub fn to_transferencia(&self) -> Result<Transferencia, ValidationErrors> {
        self.validate()?;
        match (self.from_id, self.to_id, self.valor) {
            (Some(from_id), Some(to_id), Some(valor)) => Ok(Transferencia {
                from_id,
                to_id,
                valor,
            }),
            _ => Err(self.errors()),
        }
    }
}
