mod beneficios;

pub use beneficios::BeneficiosApi;
