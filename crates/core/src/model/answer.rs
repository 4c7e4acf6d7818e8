use std::collections::BTreeSet;
use thiserror::Error;

use crate::model::ids::OptionId;
use crate::model::question::{QuestionType, SessionQuestion};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AnswerError {
    #[error("question index {index} is out of range (total {total})")]
    OutOfRange { index: usize, total: usize },

    #[error("a {input} answer does not fit a {expected} question")]
    KindMismatch {
        expected: QuestionType,
        input: &'static str,
    },

    #[error("option {option} does not belong to this question")]
    UnknownOption { option: OptionId },
}

/// A raw learner action on the current question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerInput {
    /// Click on an option; replaces for single choice, toggles for multiple choice.
    Option(OptionId),
    /// Essay text; replaces the previous draft.
    Text(String),
}

impl AnswerInput {
    fn label(&self) -> &'static str {
        match self {
            AnswerInput::Option(_) => "option",
            AnswerInput::Text(_) => "text",
        }
    }
}

/// The learner's selection, tagged by the kind of question it answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerValue {
    Single(OptionId),
    Multiple(BTreeSet<OptionId>),
    Essay(String),
}

impl AnswerValue {
    #[must_use]
    pub fn question_type(&self) -> QuestionType {
        match self {
            AnswerValue::Single(_) => QuestionType::SingleChoice,
            AnswerValue::Multiple(_) => QuestionType::MultipleChoice,
            AnswerValue::Essay(_) => QuestionType::Essay,
        }
    }

    /// True when there is nothing worth sending to the backend.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            AnswerValue::Single(_) => false,
            AnswerValue::Multiple(set) => set.is_empty(),
            AnswerValue::Essay(text) => text.trim().is_empty(),
        }
    }

    #[must_use]
    pub fn contains(&self, option: &OptionId) -> bool {
        match self {
            AnswerValue::Single(id) => id == option,
            AnswerValue::Multiple(set) => set.contains(option),
            AnswerValue::Essay(_) => false,
        }
    }
}

/// Per-question bookkeeping for one attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerState {
    question_type: QuestionType,
    selected: Option<AnswerValue>,
    /// Last value the backend accepted.
    saved: Option<AnswerValue>,
    is_answered: bool,
    is_skipped: bool,
    is_visited: bool,
}

impl AnswerState {
    #[must_use]
    pub fn new(question_type: QuestionType) -> Self {
        Self {
            question_type,
            selected: None,
            saved: None,
            is_answered: false,
            is_skipped: false,
            is_visited: false,
        }
    }

    #[must_use]
    pub fn question_type(&self) -> QuestionType {
        self.question_type
    }

    #[must_use]
    pub fn selected(&self) -> Option<&AnswerValue> {
        self.selected.as_ref()
    }

    #[must_use]
    pub fn saved(&self) -> Option<&AnswerValue> {
        self.saved.as_ref()
    }

    /// True when the selection was edited after it was saved.
    #[must_use]
    pub fn has_unsaved_edit(&self) -> bool {
        self.is_answered && self.selected != self.saved
    }

    #[must_use]
    pub fn is_answered(&self) -> bool {
        self.is_answered
    }

    #[must_use]
    pub fn is_skipped(&self) -> bool {
        self.is_skipped
    }

    #[must_use]
    pub fn is_visited(&self) -> bool {
        self.is_visited
    }

    fn apply(&mut self, input: AnswerInput) -> Result<&AnswerValue, AnswerError> {
        let next = match (self.question_type, input) {
            (QuestionType::SingleChoice, AnswerInput::Option(id)) => AnswerValue::Single(id),
            (QuestionType::MultipleChoice, AnswerInput::Option(id)) => {
                let mut set = match self.selected.take() {
                    Some(AnswerValue::Multiple(set)) => set,
                    _ => BTreeSet::new(),
                };
                if !set.remove(&id) {
                    set.insert(id);
                }
                AnswerValue::Multiple(set)
            }
            (QuestionType::Essay, AnswerInput::Text(text)) => AnswerValue::Essay(text),
            (expected, input) => {
                return Err(AnswerError::KindMismatch {
                    expected,
                    input: input.label(),
                });
            }
        };
        Ok(self.selected.insert(next))
    }
}

/// Holds the `AnswerState` of every question in a session, by index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerTracker {
    states: Vec<AnswerState>,
}

impl AnswerTracker {
    #[must_use]
    pub fn new(questions: &[SessionQuestion]) -> Self {
        Self {
            states: questions
                .iter()
                .map(|q| AnswerState::new(q.question_type()))
                .collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&AnswerState> {
        self.states.get(index)
    }

    #[must_use]
    pub fn states(&self) -> &[AnswerState] {
        &self.states
    }

    fn state_mut(&mut self, index: usize) -> Result<&mut AnswerState, AnswerError> {
        let total = self.states.len();
        self.states
            .get_mut(index)
            .ok_or(AnswerError::OutOfRange { index, total })
    }

    /// Record a selection for the question at `index`.
    ///
    /// Locking rules (feedback visible, timer expired) are enforced by the caller.
    ///
    /// # Errors
    ///
    /// Returns `AnswerError::OutOfRange` for a bad index and
    /// `AnswerError::KindMismatch` when the input does not fit the question type.
    pub fn select(&mut self, index: usize, input: AnswerInput) -> Result<&AnswerValue, AnswerError> {
        self.state_mut(index)?.apply(input)
    }

    /// Marks the question skipped unless it already has a saved answer.
    /// Any staged selection is dropped.
    ///
    /// Returns whether the flag was set.
    pub fn mark_skipped(&mut self, index: usize) -> bool {
        match self.states.get_mut(index) {
            Some(state) if !state.is_answered => {
                state.is_skipped = true;
                state.selected = None;
                true
            }
            _ => false,
        }
    }

    /// Records the current selection as the saved answer.
    pub fn mark_answered(&mut self, index: usize) {
        if let Some(state) = self.states.get_mut(index) {
            state.saved = state.selected.clone();
            state.is_answered = true;
            state.is_skipped = false;
        }
    }

    pub fn mark_visited(&mut self, index: usize) {
        if let Some(state) = self.states.get_mut(index) {
            state.is_visited = true;
        }
    }

    /// Rehydrate one question from a resumed attempt.
    ///
    /// A saved answer wins over a skip flag so the answered/skipped exclusion holds.
    ///
    /// # Errors
    ///
    /// Returns `AnswerError` if the index is out of range or the value does not fit
    /// the question type.
    pub fn restore(
        &mut self,
        index: usize,
        selected: Option<AnswerValue>,
        is_answered: bool,
        is_skipped: bool,
    ) -> Result<(), AnswerError> {
        let state = self.state_mut(index)?;
        let fits = selected
            .as_ref()
            .is_none_or(|value| value.question_type() == state.question_type);
        if !fits {
            return Err(AnswerError::KindMismatch {
                expected: state.question_type,
                input: "restored",
            });
        }
        state.saved = if is_answered { selected.clone() } else { None };
        state.selected = selected;
        state.is_answered = is_answered;
        state.is_skipped = is_skipped && !is_answered;
        state.is_visited = state.is_visited || is_answered || is_skipped;
        Ok(())
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.states.iter().filter(|s| s.is_answered).count()
    }

    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.states.iter().filter(|s| s.is_skipped).count()
    }

    #[must_use]
    pub fn unvisited_count(&self) -> usize {
        self.states.iter().filter(|s| !s.is_visited).count()
    }
}
