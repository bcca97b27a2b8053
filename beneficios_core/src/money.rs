//! Monetary amounts with two decimal places.
//!
//! `Valor` stores an integer number of cents so that balance arithmetic in the
//! transfer preview is exact. On the wire it is a plain JSON number.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseValorError {
    #[error("valor vazio")]
    Empty,
    #[error("valor inválido: `{0}`")]
    Invalid(String),
    #[error("valor deve ter no máximo 2 casas decimais")]
    TooManyDecimals,
    #[error("valor fora do intervalo suportado")]
    Overflow,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Valor(i64);

impl Valor {
    pub const ZERO: Valor = Valor(0);

    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Number of digits left of the decimal point (at least 1).
    pub fn integer_digits(self) -> u32 {
        let whole = (self.0 / 100).unsigned_abs();
        if whole == 0 { 1 } else { whole.ilog10() + 1 }
    }

    pub fn to_f64(self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Rounds to the nearest cent. Returns `None` for non-finite or
    /// out-of-range input.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let cents = (value * 100.0).round();
        if cents.abs() >= 9.0e18 {
            return None;
        }
        Some(Self(cents as i64))
    }

    /// `R$ 1,234.56`
    pub fn brl(self) -> String {
        format!("R$ {self}")
    }
}

impl Add for Valor {
    type Output = Valor;

    fn add(self, rhs: Valor) -> Valor {
        Valor(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Valor {
    type Output = Valor;

    fn sub(self, rhs: Valor) -> Valor {
        Valor(self.0.saturating_sub(rhs.0))
    }
}

impl fmt::Display for Valor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let abs = self.0.unsigned_abs();
        let digits = (abs / 100).to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        if self.0 < 0 {
            f.write_str("-")?;
        }
        write!(f, "{grouped}.{:02}", abs % 100)
    }
}

/// Accepts `12`, `12.5`, `12,50`, `R$ 12.50` and a leading `-` or `+`.
/// Thousands separators are not accepted.
impl FromStr for Valor {
    type Err = ParseValorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rest = s.trim();
        if let Some(r) = rest.strip_prefix("R$") {
            rest = r.trim_start();
        }
        let mut negative = false;
        if let Some(r) = rest.strip_prefix('-') {
            rest = r.trim_start();
            negative = true;
        } else if let Some(r) = rest.strip_prefix('+') {
            rest = r.trim_start();
        }
        if rest.is_empty() {
            return Err(ParseValorError::Empty);
        }

        let (whole, frac) = match rest.find(['.', ',']) {
            Some(pos) => (&rest[..pos], &rest[pos + 1..]),
            None => (rest, ""),
        };
        let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if (whole.is_empty() && frac.is_empty()) || !all_digits(whole) || !all_digits(frac) {
            return Err(ParseValorError::Invalid(s.trim().to_string()));
        }
        if frac.len() > 2 {
            return Err(ParseValorError::TooManyDecimals);
        }

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| ParseValorError::Overflow)?
        };
        let frac_cents: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().map_err(|_| ParseValorError::Overflow)? * 10,
            _ => frac.parse().map_err(|_| ParseValorError::Overflow)?,
        };
        let cents = whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(frac_cents))
            .ok_or(ParseValorError::Overflow)?;
        Ok(Valor(if negative { -cents } else { cents }))
    }
}

impl Serialize for Valor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_f64())
    }
}

impl<'de> Deserialize<'de> for Valor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ValorVisitor;

        impl Visitor<'_> for ValorVisitor {
            type Value = Valor;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a monetary amount as a number or numeric string")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Valor, E> {
                v.checked_mul(100)
                    .map(Valor)
                    .ok_or_else(|| E::custom(ParseValorError::Overflow))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Valor, E> {
                i64::try_from(v)
                    .ok()
                    .and_then(|v| v.checked_mul(100))
                    .map(Valor)
                    .ok_or_else(|| E::custom(ParseValorError::Overflow))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Valor, E> {
                Valor::from_f64(v).ok_or_else(|| E::custom(ParseValorError::Overflow))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Valor, E> {
                v.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_any(ValorVisitor)
    }
}
