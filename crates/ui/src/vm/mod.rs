mod header_vm;
mod nav_vm;
mod question_vm;
mod quiz_vm;
mod result_vm;
mod time_fmt;

pub use header_vm::{QuizHeaderVm, map_quiz_header, quiz_title};
pub use nav_vm::{NavCellVm, QuestionMarker, QuizNavVm, map_quiz_nav};
pub use question_vm::{FeedbackVm, OptionVerdict, OptionVm, QuestionCardVm, map_question_card};
pub use quiz_vm::{QuizIntent, QuizOutcome, QuizPhase, QuizScreenVm, QuizVm};
pub use result_vm::{QuizResultVm, ResultVerdict, map_quiz_result};
pub use time_fmt::{
    CRITICAL_SECONDS, TimeUrgency, WARNING_SECONDS, format_countdown, format_duration,
};
