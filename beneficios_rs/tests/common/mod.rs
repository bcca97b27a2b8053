#![allow(dead_code)]

use async_trait::async_trait;
use axum::Json;
use axum::Router;
use axum::extract::{Path, Query, RawQuery, State};
use axum::http::header::ACCEPT;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use beneficios_core::{Beneficio, BeneficioId, Transferencia, Valor};
use beneficios_rs::views::Alerts;
use beneficios_rs::{BeneficioBackend, BeneficiosError};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

pub fn beneficio(id: BeneficioId, nome: &str, cents: i64) -> Beneficio {
    Beneficio {
        id: Some(id),
        version: Some(0),
        ..Beneficio::new(nome, None, Valor::from_cents(cents))
    }
}

pub fn seed() -> Vec<Beneficio> {
    vec![
        beneficio(1, "Vale Alimentação", 100_000),
        beneficio(2, "Plano de Saúde", 50_000),
        beneficio(3, "Auxílio Creche", 20_000),
    ]
}

/// Server-side rules the backend applies, shared by both fakes.
#[derive(Debug, Default)]
pub struct Store {
    pub rows: Vec<Beneficio>,
    next_id: BeneficioId,
}

impl Store {
    pub fn new(rows: Vec<Beneficio>) -> Self {
        let next_id = rows.iter().filter_map(|b| b.id).max().unwrap_or(0) + 1;
        Self { rows, next_id }
    }

    pub fn active(&self) -> Vec<Beneficio> {
        self.rows.iter().filter(|b| b.ativo).cloned().collect()
    }

    fn find_active(&mut self, id: BeneficioId) -> Option<&mut Beneficio> {
        self.rows
            .iter_mut()
            .find(|b| b.id == Some(id) && b.ativo)
    }

    pub fn get(&mut self, id: BeneficioId) -> Option<Beneficio> {
        self.find_active(id).map(|b| b.clone())
    }

    pub fn create(&mut self, mut b: Beneficio) -> Beneficio {
        b.id = Some(self.next_id);
        b.version = Some(0);
        self.next_id += 1;
        self.rows.push(b.clone());
        b
    }

    pub fn update(&mut self, id: BeneficioId, b: &Beneficio) -> Option<Beneficio> {
        let row = self.find_active(id)?;
        row.nome = b.nome.clone();
        row.descricao = b.descricao.clone();
        row.valor = b.valor;
        row.ativo = b.ativo;
        row.version = Some(row.version.unwrap_or(0) + 1);
        Some(row.clone())
    }

    pub fn delete(&mut self, id: BeneficioId) -> bool {
        match self.find_active(id) {
            Some(row) => {
                row.ativo = false;
                true
            }
            None => false,
        }
    }

    pub fn search(&self, nome: &str) -> Vec<Beneficio> {
        self.rows
            .iter()
            .filter(|b| b.ativo && b.nome.contains(nome))
            .cloned()
            .collect()
    }

    /// `Err` carries the plain-text message the backend answers with a 400.
    pub fn transfer(&mut self, t: &Transferencia) -> Result<String, String> {
        if t.from_id == t.to_id {
            return Err("Não é possível transferir para o mesmo benefício".into());
        }
        let from = self
            .get(t.from_id)
            .ok_or_else(|| format!("Benefício origem não encontrado: {}", t.from_id))?;
        self.get(t.to_id)
            .ok_or_else(|| format!("Benefício destino não encontrado: {}", t.to_id))?;
        if from.valor < t.valor {
            return Err(format!(
                "Saldo insuficiente. Saldo atual: {}, Valor solicitado: {}",
                from.valor, t.valor
            ));
        }
        if let Some(row) = self.find_active(t.from_id) {
            row.valor = row.valor - t.valor;
        }
        if let Some(row) = self.find_active(t.to_id) {
            row.valor = row.valor + t.valor;
        }
        Ok("Transferência realizada com sucesso".into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    List,
    Get,
    Create,
    Update,
    Delete,
    Transfer,
    Search,
}

/// In-process backend with failure injection.
#[derive(Default)]
pub struct InMemoryBackend {
    store: Mutex<Store>,
    failing: Mutex<HashSet<Op>>,
    fail_after: Mutex<HashMap<Op, usize>>,
    calls: Mutex<Vec<Op>>,
}

impl InMemoryBackend {
    pub fn new(rows: Vec<Beneficio>) -> Arc<Self> {
        Arc::new(Self {
            store: Mutex::new(Store::new(rows)),
            ..Self::default()
        })
    }

    pub fn fail(&self, op: Op) {
        self.failing.lock().unwrap().insert(op);
    }

    pub fn recover(&self, op: Op) {
        self.failing.lock().unwrap().remove(&op);
        self.fail_after.lock().unwrap().remove(&op);
    }

    /// Lets `op` succeed `successes` more times, then fails it.
    pub fn fail_after(&self, op: Op, successes: usize) {
        self.fail_after.lock().unwrap().insert(op, successes);
    }

    pub fn calls(&self) -> Vec<Op> {
        self.calls.lock().unwrap().clone()
    }

    pub fn rows(&self) -> Vec<Beneficio> {
        self.store.lock().unwrap().rows.clone()
    }

    fn enter(&self, op: Op) -> Result<(), BeneficiosError> {
        self.calls.lock().unwrap().push(op);
        let mut failing = self.failing.lock().unwrap().contains(&op);
        if let Some(left) = self.fail_after.lock().unwrap().get_mut(&op) {
            if *left == 0 {
                failing = true;
            } else {
                *left -= 1;
            }
        }
        if failing {
            return Err(BeneficiosError::from_status(500, "erro interno"));
        }
        Ok(())
    }
}

fn not_found() -> BeneficiosError {
    BeneficiosError::from_status(404, "404 Not Found")
}

#[async_trait]
impl BeneficioBackend for InMemoryBackend {
    async fn list(&self) -> Result<Vec<Beneficio>, BeneficiosError> {
        self.enter(Op::List)?;
        Ok(self.store.lock().unwrap().active())
    }

    async fn get(&self, id: BeneficioId) -> Result<Beneficio, BeneficiosError> {
        self.enter(Op::Get)?;
        self.store.lock().unwrap().get(id).ok_or_else(not_found)
    }

    async fn create(&self, beneficio: &Beneficio) -> Result<Beneficio, BeneficiosError> {
        self.enter(Op::Create)?;
        Ok(self.store.lock().unwrap().create(beneficio.clone()))
    }

    async fn update(
        &self,
        id: BeneficioId,
        beneficio: &Beneficio,
    ) -> Result<Beneficio, BeneficiosError> {
        self.enter(Op::Update)?;
        self.store
            .lock()
            .unwrap()
            .update(id, beneficio)
            .ok_or_else(not_found)
    }

    async fn delete(&self, id: BeneficioId) -> Result<(), BeneficiosError> {
        self.enter(Op::Delete)?;
        if self.store.lock().unwrap().delete(id) {
            Ok(())
        } else {
            Err(not_found())
        }
    }

    async fn transfer(&self, transferencia: &Transferencia) -> Result<String, BeneficiosError> {
        self.enter(Op::Transfer)?;
        self.store
            .lock()
            .unwrap()
            .transfer(transferencia)
            .map_err(|msg| BeneficiosError::from_status(400, msg))
    }

    async fn search_by_name(&self, nome: &str) -> Result<Vec<Beneficio>, BeneficiosError> {
        self.enter(Op::Search)?;
        Ok(self.store.lock().unwrap().search(nome))
    }
}

/// Records every alert and answers confirmations with a fixed reply.
pub struct RecordingAlerts {
    answer: bool,
    alerts: Mutex<Vec<String>>,
    confirms: Mutex<Vec<String>>,
}

impl RecordingAlerts {
    pub fn answering(answer: bool) -> Arc<Self> {
        Arc::new(Self {
            answer,
            alerts: Mutex::new(Vec::new()),
            confirms: Mutex::new(Vec::new()),
        })
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }

    pub fn confirms(&self) -> Vec<String> {
        self.confirms.lock().unwrap().clone()
    }
}

impl Alerts for RecordingAlerts {
    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }

    fn confirm(&self, message: &str) -> bool {
        self.confirms.lock().unwrap().push(message.to_string());
        self.answer
    }
}

/// State behind the HTTP fake.
#[derive(Debug, Default)]
pub struct FakeApi {
    pub store: Store,
    pub last_body: Option<Value>,
    pub last_query: Option<String>,
    pub last_accept: Option<String>,
    pub fail_list: bool,
}

pub type SharedApi = Arc<Mutex<FakeApi>>;

/// Serves the REST surface on an ephemeral local port.
pub async fn spawn_fake_api(rows: Vec<Beneficio>) -> (String, SharedApi) {
    let state: SharedApi = Arc::new(Mutex::new(FakeApi {
        store: Store::new(rows),
        ..FakeApi::default()
    }));
    let app = Router::new()
        .route("/api/v1/beneficios", get(list).post(create))
        .route("/api/v1/beneficios/buscar", get(search))
        .route("/api/v1/beneficios/transferir", post(transfer))
        .route(
            "/api/v1/beneficios/{id}",
            get(get_one).put(update).delete(delete),
        )
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fake api");
    let addr = listener.local_addr().expect("fake api address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("fake api serve");
    });
    (format!("http://{addr}"), state)
}

async fn list(State(s): State<SharedApi>) -> Response {
    let s = s.lock().unwrap();
    if s.fail_list {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    Json(s.store.active()).into_response()
}

async fn get_one(State(s): State<SharedApi>, Path(id): Path<BeneficioId>) -> Response {
    match s.lock().unwrap().store.get(id) {
        Some(b) => Json(b).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn create(State(s): State<SharedApi>, Json(body): Json<Value>) -> Response {
    let mut s = s.lock().unwrap();
    s.last_body = Some(body.clone());
    match serde_json::from_value::<Beneficio>(body) {
        Ok(b) => (StatusCode::CREATED, Json(s.store.create(b))).into_response(),
        Err(e) => (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    }
}

async fn update(
    State(s): State<SharedApi>,
    Path(id): Path<BeneficioId>,
    Json(body): Json<Value>,
) -> Response {
    let mut s = s.lock().unwrap();
    s.last_body = Some(body.clone());
    let b = match serde_json::from_value::<Beneficio>(body) {
        Ok(b) => b,
        Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    };
    match s.store.update(id, &b) {
        Some(b) => Json(b).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn delete(State(s): State<SharedApi>, Path(id): Path<BeneficioId>) -> Response {
    if s.lock().unwrap().store.delete(id) {
        StatusCode::OK.into_response()
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}

async fn search(
    State(s): State<SharedApi>,
    RawQuery(raw): RawQuery,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let mut s = s.lock().unwrap();
    s.last_query = raw;
    let nome = params.get("nome").cloned().unwrap_or_default();
    Json(s.store.search(&nome)).into_response()
}

async fn transfer(
    State(s): State<SharedApi>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut s = s.lock().unwrap();
    s.last_body = Some(body.clone());
    s.last_accept = headers
        .get(ACCEPT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let t = match serde_json::from_value::<Transferencia>(body) {
        Ok(t) => t,
        Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    };
    match s.store.transfer(&t) {
        Ok(msg) => msg.into_response(),
        Err(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
    }
}
