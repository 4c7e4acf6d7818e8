use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use quiz_core::model::QuizType;

use super::QuizApi;
use super::dto::{
    ResumeQuizResponse, SaveAnswerRequest, SaveAnswerResponse, StartQuizRequest,
    StartQuizResponse, SubmitQuizRequest, SubmitQuizResponse,
};
use crate::config::ApiConfig;
use crate::error::ApiError;

/// `QuizApi` over HTTP/JSON.
#[derive(Clone)]
pub struct HttpQuizApi {
    client: Client,
    config: ApiConfig,
}

impl HttpQuizApi {
    /// # Errors
    ///
    /// Returns `ApiError::Http` if the HTTP client cannot be built.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.config.base_url.join(path)?)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        if !response.status().is_success() {
            return Err(status_error(response).await);
        }
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|err| ApiError::Payload(err.to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

async fn status_error(response: Response) -> ApiError {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .ok()
        .and_then(|body| body.error.or(body.message))
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        });
    ApiError::Status { status, message }
}

#[async_trait]
impl QuizApi for HttpQuizApi {
    async fn start_quiz(&self, quiz_type: QuizType) -> Result<StartQuizResponse, ApiError> {
        let url = self.endpoint("quiz/start")?;
        debug!(%url, %quiz_type, "starting quiz");
        let payload = StartQuizRequest {
            quiz_type: quiz_type.as_str().to_string(),
        };
        let response = self
            .authorize(self.client.post(url))
            .json(&payload)
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn save_answer(
        &self,
        request: &SaveAnswerRequest,
    ) -> Result<SaveAnswerResponse, ApiError> {
        let url = self.endpoint("quiz/answer")?;
        let response = self
            .authorize(self.client.post(url))
            .json(request)
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn submit_quiz(
        &self,
        request: &SubmitQuizRequest,
    ) -> Result<SubmitQuizResponse, ApiError> {
        let url = self.endpoint("quiz/submit")?;
        let response = self
            .authorize(self.client.post(url))
            .json(request)
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn resume_quiz(
        &self,
        quiz_type: QuizType,
    ) -> Result<Option<ResumeQuizResponse>, ApiError> {
        let url = self.endpoint(&format!("quiz/resume/{}", quiz_type.as_str()))?;
        let response = self.authorize(self.client.get(url)).send().await?;
        match response.status() {
            StatusCode::NOT_FOUND | StatusCode::NO_CONTENT => Ok(None),
            _ => Self::read_json::<Option<ResumeQuizResponse>>(response).await,
        }
    }
}
