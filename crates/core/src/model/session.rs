use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::ids::SessionId;
use crate::model::question::SessionQuestion;

/// Which flavour of attempt the learner started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum QuizType {
    #[default]
    Timed,
    Mock,
}

impl QuizType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            QuizType::Timed => "timed",
            QuizType::Mock => "mock",
        }
    }
}

impl fmt::Display for QuizType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown quiz type: {raw}")]
pub struct ParseQuizTypeError {
    raw: String,
}

impl FromStr for QuizType {
    type Err = ParseQuizTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "timed" | "time" => Ok(QuizType::Timed),
            "mock" => Ok(QuizType::Mock),
            _ => Err(ParseQuizTypeError { raw: s.to_string() }),
        }
    }
}

/// Lifecycle of one attempt.
///
/// `NotStarted → InProgress → (Expired | Submitting) → Completed`, with
/// `Expired → Submitting`. Nothing leaves `Completed`, and there is no paused state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionStatus {
    NotStarted,
    InProgress,
    Expired,
    Submitting,
    Completed,
}

impl SessionStatus {
    /// Answer edits, skips and navigation are only possible while in progress.
    #[must_use]
    pub fn accepts_input(self) -> bool {
        matches!(self, SessionStatus::InProgress)
    }

    #[must_use]
    pub fn can_submit(self) -> bool {
        matches!(self, SessionStatus::InProgress | SessionStatus::Expired)
    }

    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionStatus::Completed)
    }
}

/// The fixed question set and time budget of one attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSession {
    id: SessionId,
    quiz_type: QuizType,
    questions: Vec<SessionQuestion>,
    time_limit_seconds: u32,
    started_at: DateTime<Utc>,
}

impl QuizSession {
    #[must_use]
    pub fn new(
        id: SessionId,
        quiz_type: QuizType,
        questions: Vec<SessionQuestion>,
        time_limit_seconds: u32,
        started_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            quiz_type,
            questions,
            time_limit_seconds,
            started_at,
        }
    }

    #[must_use]
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    #[must_use]
    pub fn quiz_type(&self) -> QuizType {
        self.quiz_type
    }

    #[must_use]
    pub fn questions(&self) -> &[SessionQuestion] {
        &self.questions
    }

    #[must_use]
    pub fn question(&self, index: usize) -> Option<&SessionQuestion> {
        self.questions.get(index)
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn time_limit_seconds(&self) -> u32 {
        self.time_limit_seconds
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Sum of the points of every question.
    #[must_use]
    pub fn max_points(&self) -> u32 {
        self.questions.iter().map(SessionQuestion::points).sum()
    }
}

/// Final score summary returned by the backend on submit.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizResult {
    pub score: f64,
    pub total_points: f64,
    pub correct_count: u32,
    pub total_questions: u32,
    pub percentage: f64,
    pub passed: Option<bool>,
    pub time_spent_seconds: u32,
}
