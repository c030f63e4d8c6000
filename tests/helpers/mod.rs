use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

/// Recorded query strings of `/api/catalog` requests
pub type CatalogLog = Arc<Mutex<Vec<HashMap<String, String>>>>;

#[derive(Clone)]
struct MockState {
    stats: (StatusCode, Value),
    catalog_total: u64,
    catalog_log: CatalogLog,
}

/// In-process catalog API on an ephemeral port
#[allow(dead_code)]
pub struct MockApi {
    pub base_url: String,
    pub origin: String,
    pub catalog_log: CatalogLog,
}

#[allow(dead_code)]
pub struct MockApiBuilder {
    stats: (StatusCode, Value),
    catalog_total: u64,
}

#[allow(dead_code)]
impl MockApiBuilder {
    pub fn new() -> Self {
        Self {
            stats: (
                StatusCode::OK,
                json!({
                    "missions": [
                        { "mission": "Kepler", "totals": { "confirmed": 62, "not_planet": 28, "candidate": 10 } },
                        { "mission": "K2", "counts": { "planet": 1, "false_positive": 1, "candidates": 2 } },
                        { "mission": "TESS", "percents": { "confirmed": 10.4, "not_planet": 18.2, "candidate": 71.4 } }
                    ]
                }),
            ),
            catalog_total: 45,
        }
    }

    pub fn with_stats(mut self, status: StatusCode, body: Value) -> Self {
        self.stats = (status, body);
        self
    }

    pub fn with_catalog_total(mut self, total: u64) -> Self {
        self.catalog_total = total;
        self
    }

    pub async fn start(self) -> MockApi {
        let catalog_log: CatalogLog = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            stats: self.stats,
            catalog_total: self.catalog_total,
            catalog_log: Arc::clone(&catalog_log),
        };

        let router = Router::new()
            .route("/api/catalog", get(catalog))
            .route("/api/catalog/{id}", get(catalog_item))
            .route("/api/mission-stats", get(mission_stats))
            .route("/api/missions", get(missions))
            .route("/assets/js/quiz.json", get(quiz))
            .route("/assets/js/broken.json", get(broken_quiz))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock API");
        let addr = listener.local_addr().expect("Mock API has no address");
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        MockApi {
            base_url: format!("http://{addr}/api"),
            origin: format!("http://{addr}"),
            catalog_log,
        }
    }
}

impl MockApi {
    #[allow(dead_code)]
    pub fn builder() -> MockApiBuilder {
        MockApiBuilder::new()
    }
}

async fn catalog(
    State(state): State<MockState>,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    let page: u64 = query.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
    let page_size: u64 = query.get("page_size").and_then(|p| p.parse().ok()).unwrap_or(20);
    state.catalog_log.lock().unwrap().push(query);

    let first = (page - 1) * page_size;
    let last = (first + page_size).min(state.catalog_total);
    let items: Vec<Value> = (first..last)
        .map(|i| {
            json!({
                "id": i + 1,
                "mission": "tess",
                "object_id": format!("TOI-{}.01", 1000 + i),
                "ra": 84.291,
                "dec": -80.469,
                "stellar_temperature": 5600,
                "planet_radius": null,
                "distance": 1234.5678,
                "final_classification": "candidate"
            })
        })
        .collect();

    Json(json!({
        "items": items,
        "page": page,
        "page_size": page_size,
        "total": state.catalog_total
    }))
}

async fn catalog_item(Path(id): Path<i64>) -> Response {
    if id == 7 {
        Json(json!({
            "id": 7,
            "mission": "kepler",
            "object_id": "KOI-7016.01",
            "orbital_period": 384.843,
            "koi_score": 0.91
        }))
        .into_response()
    } else {
        (StatusCode::NOT_FOUND, Json(json!({ "detail": "Not found" }))).into_response()
    }
}

async fn mission_stats(State(state): State<MockState>) -> Response {
    let (status, body) = state.stats;
    (status, Json(body)).into_response()
}

async fn missions() -> Json<Value> {
    Json(json!({
        "kepler": {
            "title": "Kepler",
            "subtitle": "2009-2013",
            "summary": "<p>Stared at one patch of sky.</p>",
            "links": [{ "label": "NASA", "url": "https://science.nasa.gov/mission/kepler/" }]
        },
        "tess": { "title": "TESS", "subtitle": "2018-" }
    }))
}

async fn quiz() -> Json<Value> {
    Json(json!({
        "questions": [
            { "question": "Q1", "answerOptions": [{ "text": "yes", "isCorrect": true }, { "text": "no", "isCorrect": false }] },
            { "question": "Q2", "answerOptions": [{ "text": "yes", "isCorrect": true }] }
        ]
    }))
}

async fn broken_quiz() -> StatusCode {
    StatusCode::INTERNAL_SERVER_ERROR
}
