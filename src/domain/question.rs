// src/domain/question.rs
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerOption {
    pub text: String,
    #[serde(default)]
    pub is_correct: bool,
}

/// A single quiz question. `question` is trusted markup, option labels are plain text.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub question: String,
    #[serde(default)]
    pub answer_options: Vec<AnswerOption>,
}

/// Wire shape of the quiz document: `{ "questions": [...] }`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QuestionDocument {
    pub questions: Vec<Question>,
}

impl Question {
    pub fn new(question: &str, options: &[(&str, bool)]) -> Self {
        Self {
            question: question.to_string(),
            answer_options: options
                .iter()
                .map(|(text, is_correct)| AnswerOption {
                    text: text.to_string(),
                    is_correct: *is_correct,
                })
                .collect(),
        }
    }
}
