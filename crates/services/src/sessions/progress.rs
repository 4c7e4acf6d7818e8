use quiz_core::model::AnswerTracker;

/// Aggregated view of attempt progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuizStats {
    pub total: usize,
    pub answered: usize,
    pub skipped: usize,
    pub unvisited: usize,
    /// `100 * (answered + skipped) / total`, always within `[0, 100]`.
    pub progress_percentage: f64,
}

impl QuizStats {
    #[must_use]
    pub fn from_tracker(tracker: &AnswerTracker) -> Self {
        let total = tracker.len();
        let answered = tracker.answered_count();
        let skipped = tracker.skipped_count();
        #[allow(clippy::cast_precision_loss)]
        let progress_percentage = if total == 0 {
            0.0
        } else {
            (100.0 * (answered + skipped) as f64 / total as f64).clamp(0.0, 100.0)
        };
        Self {
            total,
            answered,
            skipped,
            unvisited: tracker.unvisited_count(),
            progress_percentage,
        }
    }

    /// Questions neither answered nor skipped.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.total.saturating_sub(self.answered + self.skipped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{Difficulty, QuestionId, QuestionType, SessionQuestion};

    fn tracker(n: usize) -> AnswerTracker {
        let questions: Vec<_> = (0..n)
            .map(|i| {
                SessionQuestion::new(
                    QuestionId::new(format!("q{i}")),
                    "Explain",
                    QuestionType::Essay,
                    Difficulty::Easy,
                    1,
                    Vec::new(),
                )
                .unwrap()
            })
            .collect();
        AnswerTracker::new(&questions)
    }

    #[test]
    fn progress_counts_answered_and_skipped() {
        let mut tracker = tracker(4);
        tracker.mark_answered(0);
        tracker.mark_skipped(1);
        let stats = QuizStats::from_tracker(&tracker);
        assert_eq!(stats.answered, 1);
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.remaining(), 2);
        assert!((stats.progress_percentage - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_tracker_has_zero_progress() {
        let stats = QuizStats::from_tracker(&tracker(0));
        assert_eq!(stats.progress_percentage, 0.0);
    }

    #[test]
    fn progress_stays_within_bounds() {
        let mut tracker = tracker(3);
        for i in 0..3 {
            tracker.mark_skipped(i);
            tracker.mark_answered(i);
            let stats = QuizStats::from_tracker(&tracker);
            assert!((0.0..=100.0).contains(&stats.progress_percentage));
        }
        assert_eq!(QuizStats::from_tracker(&tracker).progress_percentage, 100.0);
    }
}
