// src/infrastructure/questions.rs
use crate::application::QuestionSource;
use crate::domain::{DomainError, Question, QuestionDocument};
use async_trait::async_trait;
use reqwest::Client;
use std::path::PathBuf;
use tracing::{debug, instrument};

/// Question document bundled into the binary
pub const EMBEDDED_QUIZ: &str = include_str!("../../assets/quiz.json");

/// Where the quiz document comes from.
#[derive(Debug, Clone)]
pub enum QuizResource {
    Embedded,
    File(PathBuf),
    Http { client: Client, url: String },
}

impl QuizResource {
    /// `embedded`, an `http(s)://` URL, or a filesystem path.
    pub fn parse(location: &str, client: &Client) -> Self {
        let location = location.trim();
        if location.is_empty() || location.eq_ignore_ascii_case("embedded") {
            QuizResource::Embedded
        } else if location.starts_with("http://") || location.starts_with("https://") {
            QuizResource::Http {
                client: client.clone(),
                url: location.to_string(),
            }
        } else {
            QuizResource::File(PathBuf::from(location))
        }
    }
}

fn parse_document(location: &str, body: &str) -> Result<Vec<Question>, DomainError> {
    let document: QuestionDocument =
        serde_json::from_str(body).map_err(|e| DomainError::load(location, e))?;
    // A question without options could never be answered
    if let Some(i) = document
        .questions
        .iter()
        .position(|q| q.answer_options.is_empty())
    {
        return Err(DomainError::load(location, format!("question {i} has no answer options")));
    }
    Ok(document.questions)
}

#[async_trait]
impl QuestionSource for QuizResource {
    fn location(&self) -> String {
        match self {
            QuizResource::Embedded => "embedded quiz.json".to_string(),
            QuizResource::File(path) => path.display().to_string(),
            QuizResource::Http { url, .. } => url.clone(),
        }
    }

    #[instrument(level = "debug", skip(self), fields(location = %self.location()))]
    async fn fetch_questions(&self) -> Result<Vec<Question>, DomainError> {
        let location = self.location();
        let body = match self {
            QuizResource::Embedded => EMBEDDED_QUIZ.to_string(),
            QuizResource::File(path) => tokio::fs::read_to_string(path)
                .await
                .map_err(|e| DomainError::load(&location, e))?,
            QuizResource::Http { client, url } => {
                let response = client
                    .get(url)
                    .send()
                    .await
                    .map_err(|e| DomainError::Network(e.to_string()))?;
                if !response.status().is_success() {
                    return Err(DomainError::load(
                        &location,
                        format!("HTTP status {}", response.status()),
                    ));
                }
                response
                    .text()
                    .await
                    .map_err(|e| DomainError::load(&location, e))?
            }
        };
        debug!(bytes = body.len(), "Read quiz document");
        parse_document(&location, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn given_embedded_resource_when_fetching_then_parses_bundled_questions() {
        let questions = QuizResource::Embedded.fetch_questions().await.unwrap();

        assert!(questions.len() > 10);
        assert!(questions
            .iter()
            .all(|q| q.answer_options.iter().filter(|o| o.is_correct).count() == 1));
    }

    #[tokio::test]
    async fn given_quiz_file_when_fetching_then_reads_questions() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("quiz.json");
        fs::write(
            &path,
            r#"{ "questions": [{ "question": "Q", "answerOptions": [{ "text": "A", "isCorrect": true }] }] }"#,
        )
        .unwrap();

        let questions = QuizResource::File(path).fetch_questions().await.unwrap();

        assert_eq!(questions.len(), 1);
    }

    #[tokio::test]
    async fn given_missing_file_when_fetching_then_returns_load_error() {
        let resource = QuizResource::File(PathBuf::from("/nonexistent/quiz.json"));

        let result = resource.fetch_questions().await;

        assert!(matches!(result, Err(DomainError::Load { .. })));
    }

    #[tokio::test]
    async fn given_malformed_file_when_fetching_then_returns_load_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("quiz.json");
        fs::write(&path, r#"{ "items": [] }"#).unwrap();

        let result = QuizResource::File(path).fetch_questions().await;

        assert!(matches!(result, Err(DomainError::Load { .. })));
    }

    #[tokio::test]
    async fn given_question_without_options_when_fetching_then_returns_load_error() {
        // Arrange
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("quiz.json");
        fs::write(
            &path,
            r#"{ "questions": [
                { "question": "Q0", "answerOptions": [{ "text": "A", "isCorrect": true }] },
                { "question": "Q1", "answerOptions": [] }
            ] }"#,
        )
        .unwrap();

        // Act
        let result = QuizResource::File(path).fetch_questions().await;

        // Assert
        match result {
            Err(DomainError::Load { reason, .. }) => {
                assert_eq!(reason, "question 1 has no answer options")
            }
            other => panic!("Expected Load error, got {other:?}"),
        }
    }

    #[test]
    fn given_locations_when_parsing_then_picks_resource_kind() {
        let client = Client::new();

        assert!(matches!(QuizResource::parse("embedded", &client), QuizResource::Embedded));
        assert!(matches!(QuizResource::parse("", &client), QuizResource::Embedded));
        assert!(matches!(
            QuizResource::parse("https://exo.example/assets/js/quiz.json", &client),
            QuizResource::Http { .. }
        ));
        assert!(matches!(
            QuizResource::parse("assets/quiz.json", &client),
            QuizResource::File(_)
        ));
    }
}
