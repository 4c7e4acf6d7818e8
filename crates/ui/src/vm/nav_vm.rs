use quiz_core::model::AnswerState;
use services::QuizAttempt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuestionMarker {
    Current,
    Answered,
    Skipped,
    Visited,
    Unvisited,
}

impl QuestionMarker {
    fn of(state: &AnswerState, is_current: bool) -> Self {
        if is_current {
            Self::Current
        } else if state.is_answered() {
            Self::Answered
        } else if state.is_skipped() {
            Self::Skipped
        } else if state.is_visited() {
            Self::Visited
        } else {
            Self::Unvisited
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavCellVm {
    pub index: usize,
    pub label: String,
    pub marker: QuestionMarker,
}

/// Question grid plus the state of the previous/next/submit controls.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizNavVm {
    pub cells: Vec<NavCellVm>,
    pub can_previous: bool,
    pub can_next: bool,
    pub can_jump: bool,
    pub submit_enabled: bool,
}

#[must_use]
pub fn map_quiz_nav(attempt: &QuizAttempt) -> QuizNavVm {
    let current = attempt.current_index();
    let cells = attempt
        .answers()
        .iter()
        .enumerate()
        .map(|(index, state)| NavCellVm {
            index,
            label: (index + 1).to_string(),
            marker: QuestionMarker::of(state, index == current),
        })
        .collect();

    QuizNavVm {
        cells,
        can_previous: attempt.can_go_previous(),
        can_next: attempt.can_go_next(),
        can_jump: attempt.status().accepts_input() && !attempt.is_feedback_blocking(),
        submit_enabled: attempt.submit_enabled(),
    }
}
