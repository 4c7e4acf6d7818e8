use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

use crate::model::ids::{OptionId, QuestionId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question {id} has an empty title")]
    EmptyTitle { id: QuestionId },

    #[error("choice question {id} has no options")]
    MissingOptions { id: QuestionId },

    #[error("question {id} lists option {option} more than once")]
    DuplicateOption { id: QuestionId, option: OptionId },

    #[error("essay question {id} must not carry options")]
    UnexpectedOptions { id: QuestionId },
}

/// How a question is answered; also keys the shape of `AnswerValue`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    SingleChoice,
    MultipleChoice,
    Essay,
}

impl QuestionType {
    /// Choice questions are graded immediately and go through the feedback gate.
    #[must_use]
    pub fn is_choice(self) -> bool {
        !matches!(self, QuestionType::Essay)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            QuestionType::SingleChoice => "single_choice",
            QuestionType::MultipleChoice => "multiple_choice",
            QuestionType::Essay => "essay",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionOption {
    pub id: OptionId,
    pub text: String,
}

impl QuestionOption {
    #[must_use]
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: OptionId::new(id),
            text: text.into(),
        }
    }
}

/// One question as served for a session. Immutable once the session starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionQuestion {
    id: QuestionId,
    title: String,
    question_type: QuestionType,
    difficulty: Difficulty,
    points: u32,
    options: Vec<QuestionOption>,
}

impl SessionQuestion {
    /// Build a question, checking that its options fit its type.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` for a blank title, a choice question without options,
    /// duplicated option ids, or an essay question carrying options.
    pub fn new(
        id: QuestionId,
        title: impl Into<String>,
        question_type: QuestionType,
        difficulty: Difficulty,
        points: u32,
        options: Vec<QuestionOption>,
    ) -> Result<Self, QuestionError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(QuestionError::EmptyTitle { id });
        }

        match question_type {
            QuestionType::Essay if !options.is_empty() => {
                return Err(QuestionError::UnexpectedOptions { id });
            }
            QuestionType::SingleChoice | QuestionType::MultipleChoice if options.is_empty() => {
                return Err(QuestionError::MissingOptions { id });
            }
            _ => {}
        }

        let mut seen = HashSet::with_capacity(options.len());
        for option in &options {
            if !seen.insert(&option.id) {
                return Err(QuestionError::DuplicateOption {
                    option: option.id.clone(),
                    id,
                });
            }
        }

        Ok(Self {
            id,
            title,
            question_type,
            difficulty,
            points,
            options,
        })
    }

    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn question_type(&self) -> QuestionType {
        self.question_type
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn points(&self) -> u32 {
        self.points
    }

    #[must_use]
    pub fn options(&self) -> &[QuestionOption] {
        &self.options
    }

    #[must_use]
    pub fn has_option(&self, id: &OptionId) -> bool {
        self.options.iter().any(|option| &option.id == id)
    }

    /// Looks up an option by its 1-based position, as typed by a learner.
    #[must_use]
    pub fn option_at(&self, position: usize) -> Option<&QuestionOption> {
        position.checked_sub(1).and_then(|idx| self.options.get(idx))
    }
}
