//! Shared helpers: a stand-in for the remote registry (json-server style)
//! bound to a random local port.

#![allow(dead_code)]

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use once_cell::sync::Lazy;
use serde_json::{json, Value};

use alerta_febre_core::telemetry::{get_subscriber, init_subscriber};

// Ensure that the `tracing` stack is only initialised once
static TRACING: Lazy<()> = Lazy::new(|| {
    if std::env::var("TEST_LOG").is_ok() {
        let _ = init_subscriber(get_subscriber("debug", std::io::stdout));
    } else {
        let _ = init_subscriber(get_subscriber("debug", std::io::sink));
    }
});

/// In-memory registry state shared with the handlers.
#[derive(Clone, Default)]
pub struct FakeRegistry {
    records: Arc<Mutex<Vec<Value>>>,
    next_id: Arc<AtomicU64>,
    /// Bodies received by POST and PUT, in order
    bodies: Arc<Mutex<Vec<Value>>>,
}

impl FakeRegistry {
    pub fn records(&self) -> Vec<Value> {
        self.records.lock().unwrap().clone()
    }

    pub fn bodies(&self) -> Vec<Value> {
        self.bodies.lock().unwrap().clone()
    }
}

pub struct TestRegistry {
    pub address: String,
    pub registry: FakeRegistry,
}

fn id_text(value: &Value) -> Option<String> {
    match value.get("id")? {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({}))).into_response()
}

async fn list(State(registry): State<FakeRegistry>) -> Json<Value> {
    Json(Value::Array(registry.records()))
}

async fn create(State(registry): State<FakeRegistry>, Json(body): Json<Value>) -> Response {
    registry.bodies.lock().unwrap().push(body.clone());

    let id = registry.next_id.fetch_add(1, Ordering::SeqCst) + 1;
    let mut stored = body;
    stored["id"] = json!(id);
    registry.records.lock().unwrap().push(stored.clone());

    (StatusCode::CREATED, Json(stored)).into_response()
}

async fn get_one(State(registry): State<FakeRegistry>, Path(id): Path<String>) -> Response {
    let records = registry.records.lock().unwrap();
    match records.iter().find(|r| id_text(r).as_deref() == Some(id.as_str())) {
        Some(record) => Json(record.clone()).into_response(),
        None => not_found(),
    }
}

async fn replace(
    State(registry): State<FakeRegistry>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    registry.bodies.lock().unwrap().push(body.clone());

    let mut records = registry.records.lock().unwrap();
    match records
        .iter_mut()
        .find(|r| id_text(r).as_deref() == Some(id.as_str()))
    {
        Some(slot) => {
            let original_id = slot["id"].clone();
            let mut stored = body;
            stored["id"] = original_id;
            *slot = stored.clone();
            Json(stored).into_response()
        }
        None => not_found(),
    }
}

async fn remove(State(registry): State<FakeRegistry>, Path(id): Path<String>) -> Response {
    let mut records = registry.records.lock().unwrap();
    match records
        .iter()
        .position(|r| id_text(r).as_deref() == Some(id.as_str()))
    {
        Some(index) => {
            records.remove(index);
            Json(json!({})).into_response()
        }
        None => not_found(),
    }
}

async fn serve(router: Router) -> String {
    Lazy::force(&TRACING);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    // Launch the server as a background task
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://127.0.0.1:{}", port)
}

/// Spawn a registry implementing `/registros` CRUD with numeric ids.
pub async fn spawn_registry() -> TestRegistry {
    let registry = FakeRegistry::default();
    let router = Router::new()
        .route("/registros", get(list).post(create))
        .route("/registros/:id", get(get_one).put(replace).delete(remove))
        .with_state(registry.clone());

    TestRegistry {
        address: serve(router).await,
        registry,
    }
}

/// Spawn a server answering every request with `status`.
pub async fn spawn_failing(status: StatusCode) -> String {
    let router = Router::new().fallback(move || async move { (status, "registry unavailable") });
    serve(router).await
}

/// Spawn a server that answers only after `delay`.
pub async fn spawn_slow(delay: Duration) -> String {
    let router = Router::new().fallback(move || async move {
        tokio::time::sleep(delay).await;
        Json(json!([]))
    });
    serve(router).await
}

/// Spawn a server answering every request with `body` as JSON.
pub async fn spawn_json(body: Value) -> String {
    let router = Router::new().fallback(move || async move { Json(body) });
    serve(router).await
}

/// Spawn a raw TCP server that answers with `status`, announces a longer
/// body than it sends, then hangs up.
pub async fn spawn_truncated(status: u16) -> String {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    Lazy::force(&TRACING);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let mut request = [0u8; 4096];
            let _ = socket.read(&mut request).await;
            let head = format!(
                "HTTP/1.1 {} Error\r\nContent-Type: text/plain\r\nContent-Length: 100\r\n\r\npartial",
                status
            );
            let _ = socket.write_all(head.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });
    format!("http://127.0.0.1:{}", port)
}

/// Address with nothing listening.
pub fn unreachable_address() -> String {
    "http://127.0.0.1:9".to_string()
}
