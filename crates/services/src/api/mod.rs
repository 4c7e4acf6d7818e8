mod dto;
mod http;
mod memory;

use async_trait::async_trait;

use quiz_core::model::QuizType;

use crate::error::ApiError;

pub use dto::{
    AnswerPayload, AnswerStateDto, OptionDto, QuestionDto, ResumeQuizResponse, SaveAnswerRequest,
    SaveAnswerResponse, StartQuizRequest, StartQuizResponse, SubmitQuizRequest,
    SubmitQuizResponse,
};
pub use http::HttpQuizApi;
pub use memory::{ApiEndpoint, BankQuestion, CallCounts, InMemoryQuizApi, PASS_PERCENTAGE};

/// Contract of the backend Quiz Session API.
///
/// The session loop is the only caller; everything else goes through it.
#[async_trait]
pub trait QuizApi: Send + Sync {
    /// `POST /quiz/start`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or a non-success status.
    async fn start_quiz(&self, quiz_type: QuizType) -> Result<StartQuizResponse, ApiError>;

    /// `POST /quiz/answer`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or a non-success status.
    async fn save_answer(
        &self,
        request: &SaveAnswerRequest,
    ) -> Result<SaveAnswerResponse, ApiError>;

    /// `POST /quiz/submit`
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or a non-success status.
    async fn submit_quiz(
        &self,
        request: &SubmitQuizRequest,
    ) -> Result<SubmitQuizResponse, ApiError>;

    /// `GET /quiz/resume/{quiz_type}`; `Ok(None)` when there is nothing to resume.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or a non-success status other than 404.
    async fn resume_quiz(
        &self,
        quiz_type: QuizType,
    ) -> Result<Option<ResumeQuizResponse>, ApiError>;
}
