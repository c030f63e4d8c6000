// src/domain/quiz.rs
use crate::domain::{DomainError, Question};
use serde::Serialize;
use tracing::debug;

/// Where the quiz section currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizState {
    /// No session yet. Only `PageController::quiz_state` reports this;
    /// `QuizSession::state` never does.
    Loading,
    Presenting(usize),
    Finished,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerRecord {
    pub question: String,
    pub was_correct: bool,
}

/// One run through the selected questions. Discarded on reload.
#[derive(Debug, Clone)]
pub struct QuizSession {
    questions: Vec<Question>,
    current_index: usize,
    score: usize,
    answer_log: Vec<AnswerRecord>,
}

impl QuizSession {
    /// `questions` is the already-sampled, already-ordered selection.
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            current_index: 0,
            score: 0,
            answer_log: Vec::new(),
        }
    }

    pub fn state(&self) -> QuizState {
        if self.current_index >= self.questions.len() {
            QuizState::Finished
        } else {
            QuizState::Presenting(self.current_index)
        }
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_index)
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn answer_log(&self) -> &[AnswerRecord] {
        &self.answer_log
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Fraction of questions answered, in percent.
    pub fn progress_percent(&self) -> f64 {
        if self.questions.is_empty() {
            return 0.0;
        }
        self.current_index as f64 / self.questions.len() as f64 * 100.0
    }

    /// Apply an answer selection and advance to the next state.
    pub fn select(&mut self, option: usize) -> Result<QuizState, DomainError> {
        let question = self
            .questions
            .get(self.current_index)
            .ok_or(DomainError::QuizFinished)?;

        let chosen = question
            .answer_options
            .get(option)
            .ok_or(DomainError::InvalidOption {
                index: option,
                available: question.answer_options.len(),
            })?;

        let was_correct = chosen.is_correct;
        self.answer_log.push(AnswerRecord {
            question: question.question.clone(),
            was_correct,
        });
        if was_correct {
            self.score += 1;
        }
        self.current_index += 1;

        let state = self.state();
        debug!(option, was_correct, score = self.score, ?state, "Answer recorded");
        Ok(state)
    }
}
