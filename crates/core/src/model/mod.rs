mod answer;
mod feedback;
mod ids;
mod question;
mod session;

pub use ids::{OptionId, QuestionId, SessionId};

pub use answer::{AnswerError, AnswerInput, AnswerState, AnswerTracker, AnswerValue};
pub use feedback::{Feedback, FeedbackGate, FeedbackKind, FeedbackRecord};
pub use question::{Difficulty, QuestionError, QuestionOption, QuestionType, SessionQuestion};
pub use session::{ParseQuizTypeError, QuizResult, QuizSession, QuizType, SessionStatus};
