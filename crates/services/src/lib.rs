#![forbid(unsafe_code)]

pub mod api;
pub mod config;
pub mod error;
pub mod sessions;

pub use quiz_core::Clock;

pub use api::{HttpQuizApi, InMemoryQuizApi, QuizApi};
pub use config::{ApiConfig, SessionConfig};
pub use error::{ApiError, ConfigError, SessionError};

pub use sessions::{
    AnswerOutcome, FinalAnswer, PendingAnswer, QuizAttempt, QuizLoopService, QuizStats,
    TickEvent, TickReceiver, TickerHandle,
};
