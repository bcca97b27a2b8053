#![forbid(unsafe_code)]

mod apis;
pub mod backend;
pub mod cli;
mod client;
mod error;
pub mod render;
pub mod routes;
pub mod terminal;
pub mod views;

pub use apis::*;
pub use backend::BeneficioBackend;
pub use client::BeneficiosClient;
pub use error::{BeneficiosError, BeneficiosErrorKind};
pub use routes::Route;
