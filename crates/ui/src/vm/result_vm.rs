use quiz_core::model::QuizResult;

use crate::vm::time_fmt::format_duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResultVerdict {
    Passed,
    Failed,
}

#[derive(Clone, Debug, PartialEq)]
pub struct QuizResultVm {
    pub score_label: String,
    pub percentage: f64,
    pub percentage_label: String,
    pub correct_label: String,
    pub time_label: String,
    pub verdict: Option<ResultVerdict>,
}

impl QuizResultVm {
    #[must_use]
    pub fn verdict_label(&self) -> Option<&'static str> {
        self.verdict.map(|verdict| match verdict {
            ResultVerdict::Passed => "Passed",
            ResultVerdict::Failed => "Not passed",
        })
    }
}

impl From<&QuizResult> for QuizResultVm {
    fn from(result: &QuizResult) -> Self {
        let percentage = result.percentage.clamp(0.0, 100.0);
        Self {
            score_label: format!("{} / {}", result.score, result.total_points),
            percentage,
            percentage_label: format!("{percentage:.0}%"),
            correct_label: format!(
                "{} of {} correct",
                result.correct_count, result.total_questions
            ),
            time_label: format_duration(result.time_spent_seconds),
            verdict: result.passed.map(|passed| {
                if passed {
                    ResultVerdict::Passed
                } else {
                    ResultVerdict::Failed
                }
            }),
        }
    }
}

#[must_use]
pub fn map_quiz_result(result: &QuizResult) -> QuizResultVm {
    QuizResultVm::from(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_score_summary() {
        let vm = map_quiz_result(&QuizResult {
            score: 30.0,
            total_points: 40.0,
            correct_count: 3,
            total_questions: 4,
            percentage: 75.0,
            passed: Some(true),
            time_spent_seconds: 245,
        });
        assert_eq!(vm.score_label, "30 / 40");
        assert_eq!(vm.percentage_label, "75%");
        assert_eq!(vm.correct_label, "3 of 4 correct");
        assert_eq!(vm.time_label, "4m 05s");
        assert_eq!(vm.verdict_label(), Some("Passed"));
    }

    #[test]
    fn missing_pass_flag_has_no_verdict() {
        let vm = QuizResultVm::from(&QuizResult {
            score: 0.0,
            total_points: 0.0,
            correct_count: 0,
            total_questions: 2,
            percentage: 0.0,
            passed: None,
            time_spent_seconds: 0,
        });
        assert!(vm.verdict.is_none());
        assert_eq!(vm.verdict_label(), None);
    }
}
