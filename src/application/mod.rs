// src/application/mod.rs
pub mod catalog_search;
pub mod mission_stats;
pub mod quiz_loader;

pub use catalog_search::{CatalogSource, SearchController};
pub use mission_stats::{MissionSource, MissionStatsService, StatsReport};
pub use quiz_loader::{QuestionSource, QuizLoader};
