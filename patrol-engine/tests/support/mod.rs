//! Test harness: in-process mock of the external area registry, the three
//! reload targets, and an engine wired to in-memory stores.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{delete, get};
use axum::{Json, Router};
use tokio::net::TcpListener;

use patrol_engine::store::{
    MemoryAccountStore, MemoryBootstrapStore, MemoryPointSource, MemoryZoneStore, OwnerContext,
};
use patrol_engine::{Config, EngineState};
use shared::{LatLon, SamplePoint};

/// One area record held by the mock registry.
#[derive(Debug, Clone)]
pub struct StoredArea {
    pub id: i64,
    pub name: String,
    pub payload: serde_json::Value,
}

/// Shared state of the mock registry and reload endpoints.
#[derive(Clone, Default)]
pub struct MockRegistry {
    pub areas: Arc<Mutex<Vec<StoredArea>>>,
    next_id: Arc<AtomicI64>,
    /// Make POST /areas/ answer 500.
    pub fail_create: Arc<AtomicBool>,
    /// Make DELETE /areas/{id} answer 500.
    pub fail_delete: Arc<AtomicBool>,
    /// (service, value of the secret header) per reload call received.
    pub reload_hits: Arc<Mutex<Vec<(String, Option<String>)>>>,
}

impl MockRegistry {
    pub fn area_names(&self) -> Vec<String> {
        self.areas
            .lock()
            .unwrap()
            .iter()
            .map(|a| a.name.clone())
            .collect()
    }

    pub fn push_area(&self, name: &str) {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        self.areas.lock().unwrap().push(StoredArea {
            id,
            name: name.to_string(),
            payload: serde_json::Value::Null,
        });
    }

    pub fn reload_count(&self) -> usize {
        self.reload_hits.lock().unwrap().len()
    }
}

async fn list_areas(State(reg): State<MockRegistry>) -> Json<serde_json::Value> {
    let data: Vec<serde_json::Value> = reg
        .areas
        .lock()
        .unwrap()
        .iter()
        .map(|a| serde_json::json!({"id": a.id, "name": a.name}))
        .collect();
    Json(serde_json::json!({ "data": data }))
}

async fn create_area(
    State(reg): State<MockRegistry>,
    Json(payload): Json<serde_json::Value>,
) -> (StatusCode, Json<serde_json::Value>) {
    if reg.fail_create.load(Ordering::SeqCst) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({"error": "create unavailable"})),
        );
    }
    let id = reg.next_id.fetch_add(1, Ordering::SeqCst) + 1;
    let name = payload["name"].as_str().unwrap_or_default().to_string();
    reg.areas.lock().unwrap().push(StoredArea { id, name, payload });
    (StatusCode::OK, Json(serde_json::json!({"id": id})))
}

async fn remove_area(
    State(reg): State<MockRegistry>,
    Path(id): Path<i64>,
) -> (StatusCode, String) {
    if reg.fail_delete.load(Ordering::SeqCst) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "delete unavailable".into());
    }
    let mut areas = reg.areas.lock().unwrap();
    let before = areas.len();
    areas.retain(|a| a.id != id);
    if areas.len() == before {
        (StatusCode::NOT_FOUND, "no such area".into())
    } else {
        (StatusCode::OK, String::new())
    }
}

async fn reload(
    State(reg): State<MockRegistry>,
    Path(service): Path<String>,
    headers: HeaderMap,
) -> StatusCode {
    let secret = headers
        .get("X-Reload-Secret")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string());
    reg.reload_hits.lock().unwrap().push((service, secret));
    StatusCode::OK
}

/// Start the mock server on an ephemeral port.
pub async fn start_mock(registry: MockRegistry) -> SocketAddr {
    let app = Router::new()
        .route("/areas/", get(list_areas).post(create_area))
        .route("/areas/{id}", delete(remove_area))
        .route("/reload/{service}", get(reload))
        .with_state(registry);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

pub const TEST_SECRET: &str = "sekrit";

pub struct TestHarness {
    pub state: EngineState,
    pub registry: MockRegistry,
    pub owner: OwnerContext,
}

/// Engine wired to the mock registry, reload targets, and a fresh in-memory
/// point source seeded with `points`.
pub async fn harness_with_points(points: Vec<SamplePoint>) -> TestHarness {
    let registry = MockRegistry::default();
    let addr = start_mock(registry.clone()).await;
    let base = format!("http://{addr}");

    let scanner = format!("{base}/reload/scanner");
    let alerts = format!("{base}/reload/alerts");
    let map = format!("{base}/reload/map");
    let config = Config::with_overrides(
        base.as_str(),
        [scanner.as_str(), alerts.as_str(), map.as_str()],
        TEST_SECRET,
    );

    let state = EngineState::initialize(
        config,
        Arc::new(MemoryZoneStore::new()),
        Arc::new(MemoryBootstrapStore::new()),
        Arc::new(MemoryAccountStore::new()),
        Arc::new(MemoryPointSource::fresh(points)),
    )
    .unwrap();

    TestHarness {
        state,
        registry,
        owner: OwnerContext::new("42"),
    }
}

/// A ~1.1 km square zone with its closing vertex.
pub fn square_ring() -> Vec<LatLon> {
    vec![
        LatLon::new(48.770, 9.180),
        LatLon::new(48.770, 9.190),
        LatLon::new(48.780, 9.190),
        LatLon::new(48.780, 9.180),
        LatLon::new(48.770, 9.180),
    ]
}

/// Five points inside [`square_ring`], all within one sampling disc.
pub fn clustered_points() -> Vec<SamplePoint> {
    vec![
        SamplePoint { id: 1, lat: 48.7750, lon: 9.1850 },
        SamplePoint { id: 2, lat: 48.7752, lon: 9.1852 },
        SamplePoint { id: 3, lat: 48.7748, lon: 9.1848 },
        SamplePoint { id: 4, lat: 48.7751, lon: 9.1848 },
        SamplePoint { id: 5, lat: 48.7749, lon: 9.1852 },
    ]
}
