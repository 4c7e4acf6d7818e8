use std::sync::Arc;

use chrono::Duration;
use tracing::{debug, info, warn};

use quiz_core::model::{
    AnswerInput, AnswerValue, FeedbackRecord, QuestionType, QuizResult, QuizSession, QuizType,
    SessionId,
};
use quiz_core::{Clock, TickOutcome};

use super::attempt::QuizAttempt;
use crate::api::{
    AnswerPayload, AnswerStateDto, QuestionDto, QuizApi, SaveAnswerRequest, SubmitQuizRequest,
};
use crate::config::SessionConfig;
use crate::error::SessionError;

/// What happened after an answer action.
#[derive(Debug, Clone, PartialEq)]
pub enum AnswerOutcome {
    /// Selection recorded locally; nothing sent yet.
    Staged,
    /// Choice answer saved and graded; feedback is now showing.
    Graded(FeedbackRecord),
    /// Essay answer saved.
    Saved,
}

/// What a timer tick did to the attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum TickEvent {
    Idle,
    Running {
        remaining: u32,
        /// True when the feedback dwell elapsed and the cursor moved on.
        advanced: bool,
    },
    /// Time ran out and the attempt was submitted.
    Expired(QuizResult),
}

/// Orchestrates attempt start, answering and submission against the Quiz Session API.
#[derive(Clone)]
pub struct QuizLoopService {
    clock: Clock,
    api: Arc<dyn QuizApi>,
    config: SessionConfig,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(clock: Clock, api: Arc<dyn QuizApi>) -> Self {
        Self {
            clock,
            api,
            config: SessionConfig::default(),
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// Step a fixed clock forward; a system clock keeps following real time.
    pub fn advance_clock(&mut self, delta: Duration) {
        self.clock.advance(delta);
    }

    fn dwell(&self) -> Duration {
        Duration::from_std(self.config.feedback_dwell).unwrap_or_else(|_| Duration::seconds(2))
    }

    /// Start a new attempt of the given type.
    ///
    /// Nothing changes locally when the call fails, so it can simply be retried.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Api` for backend failures, `SessionError::Question`
    /// for malformed questions and `SessionError::Empty` for an empty question set.
    pub async fn start_session(&self, quiz_type: QuizType) -> Result<QuizAttempt, SessionError> {
        let response = self.api.start_quiz(quiz_type).await.inspect_err(|err| {
            warn!(%quiz_type, error = %err, "failed to start quiz");
        })?;

        let session = self.build_session(
            response.session_id,
            quiz_type,
            response.questions,
            response.time_limit_seconds,
        )?;
        let attempt = QuizAttempt::begin(session)?;
        info!(
            session_id = %attempt.session().id(),
            questions = attempt.session().total_questions(),
            time_limit = attempt.session().time_limit_seconds(),
            "quiz session started"
        );
        Ok(attempt)
    }

    /// Recover an in-progress attempt if the backend still has one.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` for backend failures or saved answers that do not
    /// fit their questions.
    pub async fn resume_session(
        &self,
        quiz_type: QuizType,
    ) -> Result<Option<QuizAttempt>, SessionError> {
        let Some(response) = self.api.resume_quiz(quiz_type).await? else {
            debug!(%quiz_type, "nothing to resume");
            return Ok(None);
        };

        let session = self.build_session(
            response.session_id,
            quiz_type,
            response.questions,
            response.time_limit_seconds,
        )?;
        let restored: Vec<_> = response
            .answers
            .into_iter()
            .filter_map(|dto| restore_entry(&session, dto))
            .collect();

        let mut attempt = QuizAttempt::begin_with_remaining(session, response.time_remaining_seconds)?;
        attempt.restore_answers(restored, response.current_index)?;
        info!(
            session_id = %attempt.session().id(),
            remaining = attempt.seconds_remaining(),
            answered = attempt.stats().answered,
            "quiz session resumed"
        );
        Ok(Some(attempt))
    }

    fn build_session(
        &self,
        session_id: String,
        quiz_type: QuizType,
        questions: Vec<QuestionDto>,
        time_limit_seconds: u32,
    ) -> Result<QuizSession, SessionError> {
        let questions = questions
            .into_iter()
            .map(QuestionDto::into_question)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(QuizSession::new(
            SessionId::new(session_id),
            quiz_type,
            questions,
            time_limit_seconds,
            self.clock.now(),
        ))
    }

    /// Apply a learner selection to the current question.
    ///
    /// Single-choice answers are saved right away; multiple-choice and essay
    /// selections are staged until [`QuizLoopService::submit_answer`].
    ///
    /// # Errors
    ///
    /// Returns `SessionError` when the attempt refuses the input or the save fails.
    pub async fn select_answer(
        &self,
        attempt: &mut QuizAttempt,
        input: AnswerInput,
    ) -> Result<AnswerOutcome, SessionError> {
        attempt.select(input)?;
        let is_single = attempt
            .current_question()
            .is_some_and(|q| q.question_type() == QuestionType::SingleChoice);
        if is_single {
            return self.submit_answer(attempt).await;
        }
        Ok(AnswerOutcome::Staged)
    }

    /// Save the current question's selection.
    ///
    /// On failure the question is left unanswered and the selection stays staged
    /// so the learner can retry.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NothingSelected` for an empty selection and
    /// `SessionError::Api` when the backend call fails.
    pub async fn submit_answer(
        &self,
        attempt: &mut QuizAttempt,
    ) -> Result<AnswerOutcome, SessionError> {
        let pending = attempt.pending_answer()?;
        let request = SaveAnswerRequest {
            session_id: attempt.session().id().as_str().to_owned(),
            question_id: pending.question_id.as_str().to_owned(),
            answer: AnswerPayload::from(&pending.value),
        };

        let response = self.api.save_answer(&request).await.inspect_err(|err| {
            warn!(
                session_id = %request.session_id,
                question_id = %request.question_id,
                error = %err,
                "failed to save answer"
            );
        })?;

        if pending.value.question_type().is_choice() {
            let record = FeedbackRecord::from(response);
            debug!(
                question_id = %request.question_id,
                is_correct = record.is_correct,
                points = record.points_earned,
                "answer graded"
            );
            let advance_at = self.clock.now() + self.dwell();
            attempt.record_graded(pending.index, record.clone(), advance_at);
            Ok(AnswerOutcome::Graded(record))
        } else {
            debug!(question_id = %request.question_id, "essay answer saved");
            attempt.record_saved(pending.index);
            Ok(AnswerOutcome::Saved)
        }
    }

    /// Skip the current question. Purely local; resolved at submission.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the attempt is not accepting input.
    pub fn skip_question(&self, attempt: &mut QuizAttempt) -> Result<bool, SessionError> {
        let index = attempt.current_index();
        let skipped = attempt.skip()?;
        debug!(index, skipped, "skip requested");
        Ok(skipped)
    }

    /// Close graded feedback once its dwell has passed; moves to the next question.
    pub fn advance_after_feedback(&self, attempt: &mut QuizAttempt) -> bool {
        attempt.poll_feedback(self.clock.now())
    }

    /// Handle one timer tick: counts down, auto-advances after feedback and
    /// forces submission when time runs out.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Api` when the forced submission fails. The attempt
    /// stays `Expired` and [`QuizLoopService::submit_quiz`] can be retried.
    pub async fn on_tick(&self, attempt: &mut QuizAttempt) -> Result<TickEvent, SessionError> {
        self.on_elapsed(attempt, 1).await
    }

    /// Apply `seconds` timer ticks at once, for hosts that could not take every
    /// tick as it came. Stops counting at expiry.
    ///
    /// # Errors
    ///
    /// Same as [`QuizLoopService::on_tick`].
    pub async fn on_elapsed(
        &self,
        attempt: &mut QuizAttempt,
        seconds: u32,
    ) -> Result<TickEvent, SessionError> {
        let mut outcome = TickOutcome::Idle;
        for _ in 0..seconds {
            outcome = attempt.tick();
            if !matches!(outcome, TickOutcome::Running { .. }) {
                break;
            }
        }
        if seconds > 1 {
            debug!(seconds, ?outcome, "applied delayed ticks");
        }

        match outcome {
            TickOutcome::Idle => Ok(TickEvent::Idle),
            TickOutcome::Running { remaining } => {
                let advanced = attempt.poll_feedback(self.clock.now());
                Ok(TickEvent::Running {
                    remaining,
                    advanced,
                })
            }
            TickOutcome::Expired => {
                info!(
                    session_id = %attempt.session().id(),
                    index = attempt.current_index(),
                    "time is up, submitting"
                );
                let result = self.submit_quiz(attempt).await?;
                Ok(TickEvent::Expired(result))
            }
        }
    }

    /// Submit the attempt. Only the first successful call reaches the backend;
    /// later calls return the stored result.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Api` when the backend call fails (the attempt goes
    /// back to its previous status), or `SessionError::Submitting` while another
    /// submission is in flight.
    pub async fn submit_quiz(&self, attempt: &mut QuizAttempt) -> Result<QuizResult, SessionError> {
        if let Some(result) = attempt.result() {
            return Ok(result.clone());
        }

        let previous = attempt.begin_submit()?;
        let time_spent = attempt.time_spent_seconds();
        let request = SubmitQuizRequest {
            session_id: attempt.session().id().as_str().to_owned(),
            final_state: attempt
                .final_state()
                .into_iter()
                .map(|entry| AnswerStateDto {
                    question_id: entry.question_id.as_str().to_owned(),
                    answer: entry.selected.as_ref().map(AnswerPayload::from),
                    is_answered: entry.is_answered,
                    is_skipped: entry.is_skipped,
                })
                .collect(),
            time_spent_seconds: time_spent,
        };

        match self.api.submit_quiz(&request).await {
            Ok(response) => {
                let result = response.into_result(time_spent);
                attempt.complete(result.clone(), self.clock.now());
                info!(
                    session_id = %request.session_id,
                    score = result.score,
                    total = result.total_points,
                    "quiz submitted"
                );
                Ok(result)
            }
            Err(err) => {
                warn!(session_id = %request.session_id, error = %err, "failed to submit quiz");
                attempt.submit_failed(previous);
                Err(err.into())
            }
        }
    }
}

type RestoredAnswer = (usize, Option<AnswerValue>, bool, bool);

fn restore_entry(session: &QuizSession, dto: AnswerStateDto) -> Option<RestoredAnswer> {
    let index = session
        .questions()
        .iter()
        .position(|q| q.id().as_str() == dto.question_id)?;
    let question_type = session.questions()[index].question_type();
    let selected = dto
        .answer
        .and_then(|payload| payload.into_value(question_type));
    Some((index, selected, dto.is_answered, dto.is_skipped))
}
