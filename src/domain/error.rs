// src/domain/error.rs
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Failed to load {resource}: {reason}")]
    Load { resource: String, reason: String },
    #[error("Network error: {0}")]
    Network(String),
    #[error("Request to {url} failed with status {status}")]
    Status { url: String, status: u16 },
    #[error("Record not found: {0}")]
    NotFound(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    #[error("Required element is missing from the page: #{0}")]
    MissingElement(String),
    #[error("The quiz is already finished")]
    QuizFinished,
    #[error("Answer option {index} does not exist (question has {available} options)")]
    InvalidOption { index: usize, available: usize },
}

impl DomainError {
    pub fn load(resource: impl Into<String>, reason: impl ToString) -> Self {
        DomainError::Load {
            resource: resource.into(),
            reason: reason.to_string(),
        }
    }
}
