// src/util/testing.rs

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::{BTreeMap, HashMap};
use std::env;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::application::{CatalogSource, MissionSource, QuestionSource};
use crate::domain::{CatalogRecord, DomainError, MissionInfo, Question, SearchResultPage};

/// `n` two-option questions whose first option is the correct one.
pub fn sample_questions(n: usize) -> Vec<Question> {
    (0..n)
        .map(|i| Question::new(&format!("Question {i}"), &[("Correct", true), ("Wrong", false)]))
        .collect()
}

/// A result page with `items` synthetic Kepler records.
pub fn result_page(page: u32, page_size: u32, items: usize, total: u64) -> SearchResultPage {
    let first_id = (page.saturating_sub(1) * page_size) as usize;
    SearchResultPage {
        items: (0..items)
            .map(|i| {
                let id = first_id + i + 1;
                serde_json::from_value(json!({
                    "id": id,
                    "mission": "kepler",
                    "object_id": format!("KOI-{id}"),
                    "ra": 291.93423,
                    "dec": null,
                    "stellar_temperature": 5455.0,
                    "planet_radius": 2.26,
                    "final_classification": "planet",
                    "final_confidence": 0.97
                }))
                .expect("Synthetic record is an object")
            })
            .collect(),
        page,
        page_size,
        total,
    }
}

/// Question source returning a fixed list, or failing like an unreachable file.
pub struct MockQuestionSource {
    questions: Result<Vec<Question>, DomainError>,
}

impl MockQuestionSource {
    pub fn with_questions(questions: Vec<Question>) -> Self {
        Self {
            questions: Ok(questions),
        }
    }

    pub fn failing() -> Self {
        Self {
            questions: Err(DomainError::load("mock quiz", "resource unavailable")),
        }
    }
}

#[async_trait]
impl QuestionSource for MockQuestionSource {
    fn location(&self) -> String {
        "mock".to_string()
    }

    async fn fetch_questions(&self) -> Result<Vec<Question>, DomainError> {
        self.questions.clone()
    }
}

/// Shared mock for the mission endpoints
///
/// # Examples
///
/// ```
/// use exoseeker::util::testing::MockMissionSource;
/// use serde_json::json;
///
/// let mock = MockMissionSource::builder()
///     .with_stats(json!({ "kepler": { "totals": { "confirmed": 1 } } }))
///     .build();
/// ```
pub struct MockMissionSource {
    stats: Result<Value, DomainError>,
    missions: BTreeMap<String, MissionInfo>,
}

impl MockMissionSource {
    pub fn builder() -> MockMissionSourceBuilder {
        MockMissionSourceBuilder::new()
    }
}

#[async_trait]
impl MissionSource for MockMissionSource {
    async fn fetch_mission_stats(&self) -> Result<Value, DomainError> {
        self.stats.clone()
    }

    async fn fetch_missions(&self) -> Result<BTreeMap<String, MissionInfo>, DomainError> {
        Ok(self.missions.clone())
    }
}

pub struct MockMissionSourceBuilder {
    stats: Result<Value, DomainError>,
    missions: BTreeMap<String, MissionInfo>,
}

impl MockMissionSourceBuilder {
    pub fn new() -> Self {
        Self {
            stats: Err(DomainError::Network("no stats configured".to_string())),
            missions: BTreeMap::new(),
        }
    }

    pub fn with_stats(mut self, body: Value) -> Self {
        self.stats = Ok(body);
        self
    }

    pub fn with_stats_error(mut self, error: DomainError) -> Self {
        self.stats = Err(error);
        self
    }

    pub fn with_mission(mut self, key: &str, info: MissionInfo) -> Self {
        self.missions.insert(key.to_string(), info);
        self
    }

    pub fn build(self) -> MockMissionSource {
        MockMissionSource {
            stats: self.stats,
            missions: self.missions,
        }
    }
}

impl Default for MockMissionSourceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

type QueryLog = Arc<Mutex<Vec<Vec<(String, String)>>>>;

/// Catalog mock keyed by requested page number
///
/// Records every query it receives; pages can be delayed to simulate
/// responses that arrive out of order.
pub struct MockCatalogSource {
    pages: HashMap<u32, SearchResultPage>,
    delays: HashMap<u32, Duration>,
    items: HashMap<i64, CatalogRecord>,
    failing: bool,
    queries: QueryLog,
}

impl MockCatalogSource {
    pub fn builder() -> MockCatalogSourceBuilder {
        MockCatalogSourceBuilder::new()
    }

    /// Handle on the received queries, usable after the mock is moved
    pub fn queries(&self) -> QueryLog {
        Arc::clone(&self.queries)
    }
}

#[async_trait]
impl CatalogSource for MockCatalogSource {
    async fn search(&self, query: &[(String, String)]) -> Result<SearchResultPage, DomainError> {
        self.queries
            .lock()
            .expect("Query log poisoned")
            .push(query.to_vec());

        if self.failing {
            return Err(DomainError::Network("mock catalog offline".to_string()));
        }

        let page = query
            .iter()
            .find(|(k, _)| k == "page")
            .and_then(|(_, v)| v.parse::<u32>().ok())
            .unwrap_or(1);

        if let Some(delay) = self.delays.get(&page) {
            tokio::time::sleep(*delay).await;
        }

        Ok(self.pages.get(&page).cloned().unwrap_or(SearchResultPage {
            page,
            ..Default::default()
        }))
    }

    async fn get_item(&self, id: i64) -> Result<CatalogRecord, DomainError> {
        self.items
            .get(&id)
            .cloned()
            .ok_or_else(|| DomainError::NotFound(format!("catalog item {id}")))
    }
}

pub struct MockCatalogSourceBuilder {
    pages: HashMap<u32, SearchResultPage>,
    delays: HashMap<u32, Duration>,
    items: HashMap<i64, CatalogRecord>,
    failing: bool,
}

impl MockCatalogSourceBuilder {
    pub fn new() -> Self {
        Self {
            pages: HashMap::new(),
            delays: HashMap::new(),
            items: HashMap::new(),
            failing: false,
        }
    }

    /// Page returned when the query asks for `page`
    pub fn with_page(mut self, page: u32, result: SearchResultPage) -> Self {
        self.pages.insert(page, result);
        self
    }

    /// Delay the response for `page`
    pub fn with_delay(mut self, page: u32, delay: Duration) -> Self {
        self.delays.insert(page, delay);
        self
    }

    pub fn with_item(mut self, id: i64, record: CatalogRecord) -> Self {
        self.items.insert(id, record);
        self
    }

    /// Make every search fail with a network error
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    pub fn build(self) -> MockCatalogSource {
        MockCatalogSource {
            pages: self.pages,
            delays: self.delays,
            items: self.items,
            failing: self.failing,
            queries: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl Default for MockCatalogSourceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn init_test_setup() -> Result<()> {
    // Set up logging first
    setup_test_logging();

    info!("Test Setup complete");
    Ok(())
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "trace");
    }

    // Create a filter for noisy modules
    let noisy_modules = ["hyper", "reqwest", "rustls", "mio", "h2"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}
