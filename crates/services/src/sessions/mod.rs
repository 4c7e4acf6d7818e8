mod attempt;
mod progress;
mod ticker;
mod workflow;

// Public API of the quiz session subsystem.
pub use crate::error::SessionError;
pub use attempt::{FinalAnswer, PendingAnswer, QuizAttempt};
pub use progress::QuizStats;
pub use ticker::{TickReceiver, TickerHandle};
pub use workflow::{AnswerOutcome, QuizLoopService, TickEvent};
