use beneficios_core::BeneficioId;
use std::fmt;

/// Screens reachable by path. Unknown paths and the root redirect to the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    List,
    New,
    Edit(BeneficioId),
    Transfer,
}

impl Route {
    pub fn parse(path: &str) -> Route {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            ["beneficios"] => Route::List,
            ["beneficios", "novo"] => Route::New,
            ["beneficios", "editar", id] => match id.parse() {
                Ok(id) => Route::Edit(id),
                Err(_) => Route::List,
            },
            ["transferencia"] => Route::Transfer,
            _ => Route::List,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::List => "/beneficios".to_string(),
            Route::New => "/beneficios/novo".to_string(),
            Route::Edit(id) => format!("/beneficios/editar/{id}"),
            Route::Transfer => "/transferencia".to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
