// src/application/quiz_loader.rs
use crate::constants::DEFAULT_QUESTION_COUNT;
use crate::domain::shuffle::sample;
use crate::domain::{DomainError, Question, QuizSession};
use async_trait::async_trait;
use rand::Rng;
use tracing::{debug, info, instrument};

#[async_trait]
pub trait QuestionSource {
    /// Human-readable location, used in logs and errors
    fn location(&self) -> String;

    async fn fetch_questions(&self) -> Result<Vec<Question>, DomainError>;
}

pub struct QuizLoader<S: QuestionSource> {
    source: S,
    question_count: usize,
}

impl<S: QuestionSource> QuizLoader<S> {
    /// A session never holds more than `DEFAULT_QUESTION_COUNT` questions.
    pub fn new(source: S, question_count: usize) -> Self {
        Self {
            source,
            question_count: question_count.min(DEFAULT_QUESTION_COUNT),
        }
    }

    /// Fetch the questions and fix the order of a new session.
    ///
    /// Every call re-shuffles, so a reload yields a fresh selection.
    #[instrument(level = "debug", skip(self, rng), fields(source = %self.source.location()))]
    pub async fn load<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<QuizSession, DomainError> {
        let questions = self.source.fetch_questions().await?;
        debug!(available = questions.len(), "Fetched quiz questions");

        let selected = sample(&questions, self.question_count, rng);
        info!(selected = selected.len(), "Quiz session ready");
        Ok(QuizSession::new(selected))
    }
}
