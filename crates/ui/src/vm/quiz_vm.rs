use quiz_core::model::{AnswerInput, OptionId, QuizType, SessionStatus};
use services::{QuizAttempt, QuizLoopService, TickEvent};

use crate::views::ViewError;
use crate::vm::header_vm::{QuizHeaderVm, map_quiz_header};
use crate::vm::nav_vm::{QuizNavVm, map_quiz_nav};
use crate::vm::question_vm::{QuestionCardVm, map_question_card};
use crate::vm::result_vm::{QuizResultVm, map_quiz_result};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    /// Pick an option by id.
    Select(OptionId),
    /// Pick an option by its 1-based position on the card.
    Choose(usize),
    /// Replace the essay text.
    Type(String),
    SubmitAnswer,
    Skip,
    Next,
    Previous,
    Jump(usize),
    DismissFeedback,
    SubmitQuiz,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizPhase {
    NotStarted,
    Answering,
    Feedback,
    Expired,
    Submitting,
    Completed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizOutcome {
    Continue,
    /// The cursor moved on after feedback.
    Advanced,
    Completed,
}

/// Everything the quiz screen draws, detached from the attempt.
#[derive(Clone, Debug, PartialEq)]
pub struct QuizScreenVm {
    pub phase: QuizPhase,
    pub header: Option<QuizHeaderVm>,
    pub nav: Option<QuizNavVm>,
    pub question: Option<QuestionCardVm>,
    pub result: Option<QuizResultVm>,
}

/// Screen state for one quiz run. Holds no attempt until started.
pub struct QuizVm {
    quiz_type: QuizType,
    attempt: Option<QuizAttempt>,
    last_error: Option<ViewError>,
}

impl QuizVm {
    #[must_use]
    pub fn new(quiz_type: QuizType) -> Self {
        Self {
            quiz_type,
            attempt: None,
            last_error: None,
        }
    }

    #[must_use]
    pub fn quiz_type(&self) -> QuizType {
        self.quiz_type
    }

    #[must_use]
    pub fn attempt(&self) -> Option<&QuizAttempt> {
        self.attempt.as_ref()
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.attempt
            .as_ref()
            .map_or(SessionStatus::NotStarted, QuizAttempt::status)
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        let Some(attempt) = self.attempt.as_ref() else {
            return QuizPhase::NotStarted;
        };
        match attempt.status() {
            SessionStatus::NotStarted => QuizPhase::NotStarted,
            SessionStatus::InProgress if attempt.is_feedback_blocking() => QuizPhase::Feedback,
            SessionStatus::InProgress => QuizPhase::Answering,
            SessionStatus::Expired => QuizPhase::Expired,
            SessionStatus::Submitting => QuizPhase::Submitting,
            SessionStatus::Completed => QuizPhase::Completed,
        }
    }

    #[must_use]
    pub fn last_error(&self) -> Option<ViewError> {
        self.last_error
    }

    #[must_use]
    pub fn header(&self) -> Option<QuizHeaderVm> {
        self.attempt.as_ref().map(map_quiz_header)
    }

    #[must_use]
    pub fn nav(&self) -> Option<QuizNavVm> {
        self.attempt.as_ref().map(map_quiz_nav)
    }

    #[must_use]
    pub fn question(&self) -> Option<QuestionCardVm> {
        self.attempt.as_ref().and_then(map_question_card)
    }

    #[must_use]
    pub fn result(&self) -> Option<QuizResultVm> {
        self.attempt
            .as_ref()
            .and_then(QuizAttempt::result)
            .map(map_quiz_result)
    }

    #[must_use]
    pub fn screen(&self) -> QuizScreenVm {
        QuizScreenVm {
            phase: self.phase(),
            header: self.header(),
            nav: self.nav(),
            question: self.question(),
            result: self.result(),
        }
    }

    /// Start a fresh attempt unless one is already running.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::EmptySession` when the quiz has no questions and
    /// `ViewError::Network` when the backend cannot be reached.
    pub async fn start(&mut self, quiz_loop: &QuizLoopService) -> Result<(), ViewError> {
        if self.attempt.as_ref().is_some_and(|a| !a.is_complete()) {
            return Ok(());
        }
        let started = quiz_loop.start_session(self.quiz_type).await;
        let attempt = self.record(started)?;
        self.attempt = Some(attempt);
        Ok(())
    }

    /// Pick up an unfinished attempt, or start a new one when there is none.
    /// Returns whether an attempt was resumed.
    ///
    /// # Errors
    ///
    /// Same as [`QuizVm::start`].
    pub async fn resume_or_start(&mut self, quiz_loop: &QuizLoopService) -> Result<bool, ViewError> {
        let resumed = quiz_loop.resume_session(self.quiz_type).await;
        match self.record(resumed)? {
            Some(attempt) => {
                self.attempt = Some(attempt);
                Ok(true)
            }
            None => {
                self.start(quiz_loop).await?;
                Ok(false)
            }
        }
    }

    /// Drop the running attempt client-side.
    pub fn abandon(&mut self) {
        if let Some(attempt) = self.attempt.take() {
            let _ = attempt.abandon();
        }
        self.last_error = None;
    }

    /// # Errors
    ///
    /// Returns a `ViewError` describing why the intent was refused. The attempt
    /// is left as it was.
    pub async fn apply(
        &mut self,
        quiz_loop: &QuizLoopService,
        intent: QuizIntent,
    ) -> Result<QuizOutcome, ViewError> {
        let attempt = self.attempt.as_mut().ok_or(ViewError::NotStarted)?;
        let outcome = match intent {
            QuizIntent::Select(option) => quiz_loop
                .select_answer(attempt, AnswerInput::Option(option))
                .await
                .map(|_| QuizOutcome::Continue),
            QuizIntent::Choose(position) => {
                let option = attempt
                    .current_question()
                    .and_then(|question| question.option_at(position))
                    .map(|option| option.id.clone())
                    .ok_or(ViewError::InvalidAnswer);
                match option {
                    Ok(option) => quiz_loop
                        .select_answer(attempt, AnswerInput::Option(option))
                        .await
                        .map(|_| QuizOutcome::Continue),
                    Err(err) => {
                        self.last_error = Some(err);
                        return Err(err);
                    }
                }
            }
            QuizIntent::Type(text) => quiz_loop
                .select_answer(attempt, AnswerInput::Text(text))
                .await
                .map(|_| QuizOutcome::Continue),
            QuizIntent::SubmitAnswer => quiz_loop
                .submit_answer(attempt)
                .await
                .map(|_| QuizOutcome::Continue),
            QuizIntent::Skip => quiz_loop
                .skip_question(attempt)
                .map(|_| QuizOutcome::Continue),
            QuizIntent::Next => attempt.next().map(|_| QuizOutcome::Continue),
            QuizIntent::Previous => attempt.previous().map(|_| QuizOutcome::Continue),
            QuizIntent::Jump(index) => attempt.jump_to(index).map(|_| QuizOutcome::Continue),
            QuizIntent::DismissFeedback => {
                attempt.dismiss_feedback();
                Ok(QuizOutcome::Continue)
            }
            QuizIntent::SubmitQuiz => quiz_loop
                .submit_quiz(attempt)
                .await
                .map(|_| QuizOutcome::Completed),
        };
        self.record(outcome)
    }

    /// Feed one timer tick to the attempt.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::Network` when the submission forced by expiry fails.
    pub async fn tick(&mut self, quiz_loop: &QuizLoopService) -> Result<QuizOutcome, ViewError> {
        self.elapse(quiz_loop, 1).await
    }

    /// Feed `seconds` timer ticks at once, e.g. after the host was busy.
    ///
    /// # Errors
    ///
    /// Same as [`QuizVm::tick`].
    pub async fn elapse(
        &mut self,
        quiz_loop: &QuizLoopService,
        seconds: u32,
    ) -> Result<QuizOutcome, ViewError> {
        let Some(attempt) = self.attempt.as_mut() else {
            return Ok(QuizOutcome::Continue);
        };
        let event = quiz_loop.on_elapsed(attempt, seconds).await;
        let outcome = event.map(|event| match event {
            TickEvent::Expired(_) => QuizOutcome::Completed,
            TickEvent::Running { advanced: true, .. } => QuizOutcome::Advanced,
            TickEvent::Running { .. } | TickEvent::Idle => QuizOutcome::Continue,
        });
        self.record(outcome)
    }

    fn record<T>(&mut self, result: Result<T, services::SessionError>) -> Result<T, ViewError> {
        match result {
            Ok(value) => {
                self.last_error = None;
                Ok(value)
            }
            Err(err) => {
                let view_err = ViewError::from(&err);
                self.last_error = Some(view_err);
                Err(view_err)
            }
        }
    }
}
