use quiz_core::model::QuizType;
use services::QuizAttempt;

use crate::vm::time_fmt::{TimeUrgency, format_countdown};

/// Top bar of the quiz screen: countdown, position and progress.
#[derive(Clone, Debug, PartialEq)]
pub struct QuizHeaderVm {
    pub title: &'static str,
    pub time_label: String,
    pub urgency: TimeUrgency,
    pub position_label: String,
    pub progress_label: String,
    pub progress_percentage: f64,
}

#[must_use]
pub fn quiz_title(quiz_type: QuizType) -> &'static str {
    match quiz_type {
        QuizType::Timed => "Timed quiz",
        QuizType::Mock => "Mock exam",
    }
}

#[must_use]
pub fn map_quiz_header(attempt: &QuizAttempt) -> QuizHeaderVm {
    let remaining = attempt.seconds_remaining();
    let stats = attempt.stats();
    let total = attempt.session().total_questions();

    QuizHeaderVm {
        title: quiz_title(attempt.session().quiz_type()),
        time_label: format_countdown(remaining),
        urgency: TimeUrgency::from_remaining(remaining),
        position_label: format!("Question {} of {total}", attempt.current_index() + 1),
        progress_label: format!(
            "{} answered, {} skipped, {} left",
            stats.answered,
            stats.skipped,
            stats.remaining()
        ),
        progress_percentage: stats.progress_percentage,
    }
}
