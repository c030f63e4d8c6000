// src/domain/mod.rs
pub mod catalog;
pub mod counter;
pub mod error;
pub mod mission;
pub mod question;
pub mod quiz;
pub mod shuffle;

pub use catalog::{CatalogRecord, Pager, PagerAction, SearchForm, SearchResultPage};
pub use counter::{CounterAnimation, VisibilityObserver};
pub use error::DomainError;
pub use mission::{Category, Mission, MissionInfo, MissionStats, PercentBreakdown};
pub use question::{AnswerOption, Question, QuestionDocument};
pub use quiz::{AnswerRecord, QuizSession, QuizState};
