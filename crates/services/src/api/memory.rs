use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use reqwest::StatusCode;

use quiz_core::Clock;
use quiz_core::model::{QuestionType, QuizType};

use super::QuizApi;
use super::dto::{
    AnswerPayload, AnswerStateDto, OptionDto, QuestionDto, ResumeQuizResponse, SaveAnswerRequest,
    SaveAnswerResponse, StartQuizResponse, SubmitQuizRequest, SubmitQuizResponse,
};
use crate::error::ApiError;

/// Percentage at or above which an attempt counts as passed.
pub const PASS_PERCENTAGE: f64 = 60.0;

/// A question plus its answer key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankQuestion {
    pub question: QuestionDto,
    pub correct: Vec<String>,
}

impl BankQuestion {
    #[must_use]
    pub fn single(id: &str, title: &str, points: u32, options: &[(&str, &str)], correct: &str) -> Self {
        Self::choice(
            id,
            title,
            QuestionType::SingleChoice,
            points,
            options,
            &[correct],
        )
    }

    #[must_use]
    pub fn multiple(
        id: &str,
        title: &str,
        points: u32,
        options: &[(&str, &str)],
        correct: &[&str],
    ) -> Self {
        Self::choice(
            id,
            title,
            QuestionType::MultipleChoice,
            points,
            options,
            correct,
        )
    }

    #[must_use]
    pub fn essay(id: &str, title: &str, points: u32) -> Self {
        Self {
            question: QuestionDto {
                id: id.to_string(),
                title: title.to_string(),
                question_type: QuestionType::Essay,
                difficulty: Default::default(),
                points,
                options: Vec::new(),
            },
            correct: Vec::new(),
        }
    }

    fn choice(
        id: &str,
        title: &str,
        question_type: QuestionType,
        points: u32,
        options: &[(&str, &str)],
        correct: &[&str],
    ) -> Self {
        Self {
            question: QuestionDto {
                id: id.to_string(),
                title: title.to_string(),
                question_type,
                difficulty: Default::default(),
                points,
                options: options
                    .iter()
                    .map(|(id, text)| OptionDto {
                        id: (*id).to_string(),
                        text: (*text).to_string(),
                    })
                    .collect(),
            },
            correct: correct.iter().map(|c| (*c).to_string()).collect(),
        }
    }

    fn grade(&self, answer: &AnswerPayload) -> SaveAnswerResponse {
        let is_correct = match (self.question.question_type, answer) {
            (QuestionType::SingleChoice, AnswerPayload::Text(id)) => {
                self.correct.len() == 1 && &self.correct[0] == id
            }
            (QuestionType::MultipleChoice, AnswerPayload::Options(ids)) => {
                let given: BTreeSet<&String> = ids.iter().collect();
                let expected: BTreeSet<&String> = self.correct.iter().collect();
                given == expected
            }
            _ => false,
        };
        SaveAnswerResponse {
            is_correct,
            correct_answer: self.correct.clone(),
            points_earned: if is_correct {
                f64::from(self.question.points)
            } else {
                0.0
            },
        }
    }
}

/// Endpoint selector for injected failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiEndpoint {
    Start,
    Answer,
    Submit,
    Resume,
}

/// How many times each endpoint was called.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallCounts {
    pub start: usize,
    pub answer: usize,
    pub submit: usize,
    pub resume: usize,
}

#[derive(Debug)]
struct MemorySession {
    /// Creation order; breaks ties between sessions started at the same instant.
    seq: u64,
    quiz_type: QuizType,
    question_ids: Vec<String>,
    started_at: DateTime<Utc>,
    answers: HashMap<String, (AnswerPayload, SaveAnswerResponse)>,
    submitted: bool,
}

#[derive(Debug, Default)]
struct MemoryState {
    next_session: u64,
    sessions: HashMap<String, MemorySession>,
    calls: CallCounts,
    fail_next: HashSet<ApiEndpoint>,
}

/// Simple in-memory Quiz Session API for testing and offline use.
///
/// Grades answers against the bank's answer keys and counts calls per endpoint.
#[derive(Clone)]
pub struct InMemoryQuizApi {
    bank: Arc<Vec<BankQuestion>>,
    time_limit_seconds: u32,
    clock: Clock,
    shuffle: bool,
    state: Arc<Mutex<MemoryState>>,
}

impl InMemoryQuizApi {
    #[must_use]
    pub fn new(bank: Vec<BankQuestion>, time_limit_seconds: u32) -> Self {
        Self {
            bank: Arc::new(bank),
            time_limit_seconds,
            clock: Clock::default(),
            shuffle: false,
            state: Arc::new(Mutex::new(MemoryState::default())),
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Make the next call to `endpoint` fail with `503 Service Unavailable`.
    pub fn fail_next(&self, endpoint: ApiEndpoint) {
        if let Ok(mut guard) = self.state.lock() {
            guard.fail_next.insert(endpoint);
        }
    }

    #[must_use]
    pub fn calls(&self) -> CallCounts {
        self.state
            .lock()
            .map(|guard| guard.calls)
            .unwrap_or_default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>, ApiError> {
        self.state.lock().map_err(|e| ApiError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: e.to_string(),
        })
    }

    fn bank_question(&self, id: &str) -> Option<&BankQuestion> {
        self.bank.iter().find(|q| q.question.id == id)
    }

    fn questions_for(&self, ids: &[String]) -> Vec<QuestionDto> {
        ids.iter()
            .filter_map(|id| self.bank_question(id))
            .map(|q| q.question.clone())
            .collect()
    }
}

fn check_failure(state: &mut MemoryState, endpoint: ApiEndpoint) -> Result<(), ApiError> {
    if state.fail_next.remove(&endpoint) {
        return Err(ApiError::Status {
            status: StatusCode::SERVICE_UNAVAILABLE,
            message: "injected failure".into(),
        });
    }
    Ok(())
}

fn status(status: StatusCode, message: &str) -> ApiError {
    ApiError::Status {
        status,
        message: message.to_string(),
    }
}

#[async_trait]
impl QuizApi for InMemoryQuizApi {
    async fn start_quiz(&self, quiz_type: QuizType) -> Result<StartQuizResponse, ApiError> {
        let mut guard = self.lock()?;
        guard.calls.start += 1;
        check_failure(&mut guard, ApiEndpoint::Start)?;

        let mut question_ids: Vec<String> =
            self.bank.iter().map(|q| q.question.id.clone()).collect();
        if self.shuffle {
            question_ids.shuffle(&mut rand::rng());
        }

        guard.next_session += 1;
        let seq = guard.next_session;
        let session_id = format!("mem-{seq}");
        guard.sessions.insert(
            session_id.clone(),
            MemorySession {
                seq,
                quiz_type,
                question_ids: question_ids.clone(),
                started_at: self.clock.now(),
                answers: HashMap::new(),
                submitted: false,
            },
        );

        Ok(StartQuizResponse {
            session_id,
            questions: self.questions_for(&question_ids),
            time_limit_seconds: self.time_limit_seconds,
        })
    }

    async fn save_answer(
        &self,
        request: &SaveAnswerRequest,
    ) -> Result<SaveAnswerResponse, ApiError> {
        let mut guard = self.lock()?;
        guard.calls.answer += 1;
        check_failure(&mut guard, ApiEndpoint::Answer)?;

        let session = guard
            .sessions
            .get_mut(&request.session_id)
            .ok_or_else(|| status(StatusCode::NOT_FOUND, "session not found"))?;
        if session.submitted {
            return Err(status(StatusCode::CONFLICT, "session already submitted"));
        }
        if !session.question_ids.contains(&request.question_id) {
            return Err(status(StatusCode::BAD_REQUEST, "question not in session"));
        }
        let question = self
            .bank_question(&request.question_id)
            .ok_or_else(|| status(StatusCode::NOT_FOUND, "question not found"))?;

        let response = question.grade(&request.answer);
        session.answers.insert(
            request.question_id.clone(),
            (request.answer.clone(), response.clone()),
        );
        Ok(response)
    }

    async fn submit_quiz(
        &self,
        request: &SubmitQuizRequest,
    ) -> Result<SubmitQuizResponse, ApiError> {
        let mut guard = self.lock()?;
        guard.calls.submit += 1;
        check_failure(&mut guard, ApiEndpoint::Submit)?;

        let session = guard
            .sessions
            .get_mut(&request.session_id)
            .ok_or_else(|| status(StatusCode::NOT_FOUND, "session not found"))?;
        if session.submitted {
            return Err(status(StatusCode::CONFLICT, "session already submitted"));
        }
        session.submitted = true;

        let mut score = 0.0;
        let mut total_points = 0.0;
        let mut correct_count = 0_u32;
        for id in &session.question_ids {
            if let Some(question) = self.bank_question(id) {
                total_points += f64::from(question.question.points);
            }
            if let Some((_, graded)) = session.answers.get(id) {
                score += graded.points_earned;
                if graded.is_correct {
                    correct_count += 1;
                }
            }
        }
        let percentage = if total_points > 0.0 {
            score / total_points * 100.0
        } else {
            0.0
        };

        Ok(SubmitQuizResponse {
            score,
            total_points,
            correct_count,
            total_questions: u32::try_from(session.question_ids.len()).unwrap_or(u32::MAX),
            percentage,
            passed: Some(percentage >= PASS_PERCENTAGE),
            time_spent_seconds: Some(request.time_spent_seconds),
        })
    }

    async fn resume_quiz(
        &self,
        quiz_type: QuizType,
    ) -> Result<Option<ResumeQuizResponse>, ApiError> {
        let mut guard = self.lock()?;
        guard.calls.resume += 1;
        check_failure(&mut guard, ApiEndpoint::Resume)?;

        let open = guard
            .sessions
            .iter()
            .filter(|(_, s)| !s.submitted && s.quiz_type == quiz_type)
            .max_by_key(|(_, s)| (s.started_at, s.seq));
        let Some((session_id, session)) = open else {
            return Ok(None);
        };

        let elapsed = self.clock.seconds_since(session.started_at);
        let time_remaining_seconds = self.time_limit_seconds.saturating_sub(elapsed);
        if time_remaining_seconds == 0 {
            return Ok(None);
        }

        let answers = session
            .question_ids
            .iter()
            .filter_map(|id| {
                session.answers.get(id).map(|(payload, _)| AnswerStateDto {
                    question_id: id.clone(),
                    answer: Some(payload.clone()),
                    is_answered: true,
                    is_skipped: false,
                })
            })
            .collect();
        let current_index = session
            .question_ids
            .iter()
            .position(|id| !session.answers.contains_key(id))
            .unwrap_or(session.question_ids.len().saturating_sub(1));

        Ok(Some(ResumeQuizResponse {
            session_id: session_id.clone(),
            questions: self.questions_for(&session.question_ids),
            time_limit_seconds: self.time_limit_seconds,
            time_remaining_seconds,
            current_index,
            answers,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::time::fixed_clock;

    fn bank() -> Vec<BankQuestion> {
        vec![
            BankQuestion::single("q1", "Pick a", 10, &[("a", "A"), ("b", "B")], "a"),
            BankQuestion::multiple("q2", "Pick a and c", 20, &[("a", "A"), ("b", "B"), ("c", "C")], &["a", "c"]),
            BankQuestion::essay("q3", "Explain", 5),
        ]
    }

    #[tokio::test]
    async fn grades_single_and_multiple_choice() {
        let api = InMemoryQuizApi::new(bank(), 300).with_clock(fixed_clock());
        let started = api.start_quiz(QuizType::Timed).await.unwrap();

        let single = api
            .save_answer(&SaveAnswerRequest {
                session_id: started.session_id.clone(),
                question_id: "q1".into(),
                answer: AnswerPayload::Text("a".into()),
            })
            .await
            .unwrap();
        assert!(single.is_correct);
        assert_eq!(single.points_earned, 10.0);

        let multiple = api
            .save_answer(&SaveAnswerRequest {
                session_id: started.session_id,
                question_id: "q2".into(),
                answer: AnswerPayload::Options(vec!["c".into()]),
            })
            .await
            .unwrap();
        assert!(!multiple.is_correct);
        assert_eq!(multiple.correct_answer, vec!["a".to_string(), "c".to_string()]);
    }

    #[tokio::test]
    async fn injected_failure_hits_once() {
        let api = InMemoryQuizApi::new(bank(), 300);
        api.fail_next(ApiEndpoint::Start);
        assert!(api.start_quiz(QuizType::Mock).await.is_err());
        assert!(api.start_quiz(QuizType::Mock).await.is_ok());
        assert_eq!(api.calls().start, 2);
    }

    #[tokio::test]
    async fn resume_offers_latest_open_session() {
        let api = InMemoryQuizApi::new(bank(), 300).with_clock(fixed_clock());
        assert!(api.resume_quiz(QuizType::Timed).await.unwrap().is_none());

        let started = api.start_quiz(QuizType::Timed).await.unwrap();
        api.save_answer(&SaveAnswerRequest {
            session_id: started.session_id.clone(),
            question_id: "q1".into(),
            answer: AnswerPayload::Text("b".into()),
        })
        .await
        .unwrap();

        let resumed = api.resume_quiz(QuizType::Timed).await.unwrap().unwrap();
        assert_eq!(resumed.session_id, started.session_id);
        assert_eq!(resumed.current_index, 1);
        assert_eq!(resumed.answers.len(), 1);
        assert!(api.resume_quiz(QuizType::Mock).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn resume_picks_newest_session_when_start_times_tie() {
        let api = InMemoryQuizApi::new(bank(), 300).with_clock(fixed_clock());
        for _ in 0..5 {
            api.start_quiz(QuizType::Timed).await.unwrap();
        }
        for _ in 0..10 {
            let resumed = api.resume_quiz(QuizType::Timed).await.unwrap().unwrap();
            assert_eq!(resumed.session_id, "mem-5");
        }
    }

    #[tokio::test]
    async fn second_submit_conflicts() {
        let api = InMemoryQuizApi::new(bank(), 300);
        let started = api.start_quiz(QuizType::Timed).await.unwrap();
        let request = SubmitQuizRequest {
            session_id: started.session_id,
            final_state: Vec::new(),
            time_spent_seconds: 12,
        };
        let result = api.submit_quiz(&request).await.unwrap();
        assert_eq!(result.total_points, 35.0);
        assert_eq!(result.passed, Some(false));
        let err = api.submit_quiz(&request).await.unwrap_err();
        assert!(matches!(err, ApiError::Status { status, .. } if status == StatusCode::CONFLICT));
    }
}
