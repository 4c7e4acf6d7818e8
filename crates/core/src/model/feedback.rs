use chrono::{DateTime, Utc};

use crate::model::ids::OptionId;

/// Grading returned by the backend right after a choice answer is saved.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackRecord {
    pub is_correct: bool,
    pub correct_answer: Vec<OptionId>,
    pub points_earned: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FeedbackKind {
    /// Choice answer graded by the backend. Blocks input while shown.
    Graded(FeedbackRecord),
    /// Essay stored; informational only.
    Saved,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Feedback {
    pub question_index: usize,
    pub kind: FeedbackKind,
    /// When set, the host should auto-advance once this instant has passed.
    pub advance_at: Option<DateTime<Utc>>,
}

impl Feedback {
    #[must_use]
    pub fn record(&self) -> Option<&FeedbackRecord> {
        match &self.kind {
            FeedbackKind::Graded(record) => Some(record),
            FeedbackKind::Saved => None,
        }
    }
}

/// Holds at most one visible feedback entry; a new answer overwrites the previous one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedbackGate {
    current: Option<Feedback>,
}

impl FeedbackGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Show graded feedback. `advance_at` is `None` on the final question.
    pub fn open_graded(
        &mut self,
        question_index: usize,
        record: FeedbackRecord,
        advance_at: Option<DateTime<Utc>>,
    ) {
        self.current = Some(Feedback {
            question_index,
            kind: FeedbackKind::Graded(record),
            advance_at,
        });
    }

    pub fn open_saved(&mut self, question_index: usize) {
        self.current = Some(Feedback {
            question_index,
            kind: FeedbackKind::Saved,
            advance_at: None,
        });
    }

    #[must_use]
    pub fn current(&self) -> Option<&Feedback> {
        self.current.as_ref()
    }

    /// True while graded feedback is visible; answer edits and navigation wait on it.
    #[must_use]
    pub fn is_blocking(&self) -> bool {
        matches!(
            self.current,
            Some(Feedback {
                kind: FeedbackKind::Graded(_),
                ..
            })
        )
    }

    #[must_use]
    pub fn advance_at(&self) -> Option<DateTime<Utc>> {
        self.current.as_ref().and_then(|f| f.advance_at)
    }

    /// True once the dwell deadline has passed.
    #[must_use]
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.advance_at().is_some_and(|at| now >= at)
    }

    pub fn dismiss(&mut self) -> Option<Feedback> {
        self.current.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;
    use chrono::Duration;

    fn record() -> FeedbackRecord {
        FeedbackRecord {
            is_correct: true,
            correct_answer: vec![OptionId::new("a")],
            points_earned: 10.0,
        }
    }

    #[test]
    fn graded_feedback_blocks_until_dismissed() {
        let mut gate = FeedbackGate::new();
        gate.open_graded(0, record(), Some(fixed_now()));
        assert!(gate.is_blocking());
        let dismissed = gate.dismiss().unwrap();
        assert_eq!(dismissed.record(), Some(&record()));
        assert!(!gate.is_blocking());
    }

    #[test]
    fn saved_feedback_does_not_block() {
        let mut gate = FeedbackGate::new();
        gate.open_saved(2);
        assert!(!gate.is_blocking());
        assert!(gate.current().unwrap().record().is_none());
    }

    #[test]
    fn due_only_after_deadline() {
        let mut gate = FeedbackGate::new();
        let at = fixed_now() + Duration::seconds(2);
        gate.open_graded(0, record(), Some(at));
        assert!(!gate.is_due(fixed_now()));
        assert!(gate.is_due(at));
    }

    #[test]
    fn final_question_feedback_never_due() {
        let mut gate = FeedbackGate::new();
        gate.open_graded(2, record(), None);
        assert!(!gate.is_due(fixed_now() + Duration::days(1)));
        assert!(gate.is_blocking());
    }

    #[test]
    fn new_answer_overwrites_feedback() {
        let mut gate = FeedbackGate::new();
        gate.open_graded(0, record(), None);
        gate.open_saved(1);
        assert_eq!(gate.current().unwrap().question_index, 1);
    }
}
