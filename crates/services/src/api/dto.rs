//! JSON shapes of the Quiz Session API.
//!
//! These mirror the backend contract; conversion into domain types happens here so
//! the rest of the crate never touches raw payloads.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use quiz_core::model::{
    AnswerValue, Difficulty, FeedbackRecord, OptionId, QuestionError, QuestionId, QuestionOption,
    QuestionType, QuizResult, SessionQuestion,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StartQuizRequest {
    pub quiz_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OptionDto {
    pub id: String,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuestionDto {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub points: u32,
    #[serde(default)]
    pub options: Vec<OptionDto>,
}

impl QuestionDto {
    /// Validate the wire question into a domain question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if options do not fit the question type.
    pub fn into_question(self) -> Result<SessionQuestion, QuestionError> {
        SessionQuestion::new(
            QuestionId::new(self.id),
            self.title,
            self.question_type,
            self.difficulty,
            self.points,
            self.options
                .into_iter()
                .map(|o| QuestionOption::new(o.id, o.text))
                .collect(),
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StartQuizResponse {
    pub session_id: String,
    pub questions: Vec<QuestionDto>,
    pub time_limit_seconds: u32,
}

/// Answer body: a string for single choice and essay, a list for multiple choice.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum AnswerPayload {
    Text(String),
    Options(Vec<String>),
}

impl From<&AnswerValue> for AnswerPayload {
    fn from(value: &AnswerValue) -> Self {
        match value {
            AnswerValue::Single(id) => AnswerPayload::Text(id.as_str().to_owned()),
            AnswerValue::Multiple(ids) => {
                AnswerPayload::Options(ids.iter().map(|id| id.as_str().to_owned()).collect())
            }
            AnswerValue::Essay(text) => AnswerPayload::Text(text.clone()),
        }
    }
}

impl AnswerPayload {
    /// Interpret a stored payload for a question of the given type.
    ///
    /// Returns `None` when the payload shape cannot belong to that type.
    #[must_use]
    pub fn into_value(self, question_type: QuestionType) -> Option<AnswerValue> {
        match (question_type, self) {
            (QuestionType::SingleChoice, AnswerPayload::Text(id)) => {
                Some(AnswerValue::Single(OptionId::new(id)))
            }
            (QuestionType::SingleChoice, AnswerPayload::Options(ids)) if ids.len() == 1 => ids
                .into_iter()
                .next()
                .map(|id| AnswerValue::Single(OptionId::new(id))),
            (QuestionType::MultipleChoice, AnswerPayload::Options(ids)) => Some(
                AnswerValue::Multiple(ids.into_iter().map(OptionId::new).collect::<BTreeSet<_>>()),
            ),
            (QuestionType::Essay, AnswerPayload::Text(text)) => Some(AnswerValue::Essay(text)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SaveAnswerRequest {
    pub session_id: String,
    pub question_id: String,
    pub answer: AnswerPayload,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SaveAnswerResponse {
    pub is_correct: bool,
    #[serde(default)]
    pub correct_answer: Vec<String>,
    #[serde(default)]
    pub points_earned: f64,
}

impl From<SaveAnswerResponse> for FeedbackRecord {
    fn from(value: SaveAnswerResponse) -> Self {
        Self {
            is_correct: value.is_correct,
            correct_answer: value.correct_answer.into_iter().map(OptionId::new).collect(),
            points_earned: value.points_earned,
        }
    }
}

/// Per-question entry of the final state sent on submit (and returned on resume).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnswerStateDto {
    pub question_id: String,
    #[serde(default)]
    pub answer: Option<AnswerPayload>,
    #[serde(default)]
    pub is_answered: bool,
    #[serde(default)]
    pub is_skipped: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubmitQuizRequest {
    pub session_id: String,
    pub final_state: Vec<AnswerStateDto>,
    pub time_spent_seconds: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubmitQuizResponse {
    pub score: f64,
    pub total_points: f64,
    #[serde(default)]
    pub correct_count: u32,
    #[serde(default)]
    pub total_questions: u32,
    #[serde(default)]
    pub percentage: f64,
    #[serde(default)]
    pub passed: Option<bool>,
    #[serde(default)]
    pub time_spent_seconds: Option<u32>,
}

impl SubmitQuizResponse {
    /// Convert into a domain result, filling the time spent from the client when
    /// the backend leaves it out.
    #[must_use]
    pub fn into_result(self, client_time_spent: u32) -> QuizResult {
        QuizResult {
            score: self.score,
            total_points: self.total_points,
            correct_count: self.correct_count,
            total_questions: self.total_questions,
            percentage: self.percentage,
            passed: self.passed,
            time_spent_seconds: self.time_spent_seconds.unwrap_or(client_time_spent),
        }
    }
}

/// In-progress attempt offered for recovery.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResumeQuizResponse {
    pub session_id: String,
    pub questions: Vec<QuestionDto>,
    pub time_limit_seconds: u32,
    pub time_remaining_seconds: u32,
    #[serde(default)]
    pub current_index: usize,
    #[serde(default)]
    pub answers: Vec<AnswerStateDto>,
}
