use chrono::{DateTime, Utc};
use std::fmt;

use quiz_core::model::{
    AnswerError, AnswerInput, AnswerState, AnswerTracker, AnswerValue, Feedback, FeedbackGate,
    FeedbackRecord, QuestionId, QuizResult, QuizSession, SessionQuestion, SessionStatus,
};
use quiz_core::{CountdownTimer, Navigator, TickOutcome, TimerState};

use super::progress::QuizStats;
use crate::error::SessionError;

//
// ─── PENDING ANSWER ────────────────────────────────────────────────────────────
//

/// The current question's selection, ready to be sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAnswer {
    pub index: usize,
    pub question_id: QuestionId,
    pub value: AnswerValue,
}

/// Per-question entry of the state sent on submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalAnswer {
    pub question_id: QuestionId,
    /// The saved answer. Staged or edited-but-unsaved selections are not reported.
    pub selected: Option<AnswerValue>,
    pub is_answered: bool,
    pub is_skipped: bool,
}

//
// ─── ATTEMPT ───────────────────────────────────────────────────────────────────
//

/// In-memory state of one timed quiz attempt.
///
/// Owns the countdown, per-question answers, the feedback gate and the question
/// cursor. Every mutation goes through this type; only the loop service
/// (`QuizLoopService`) talks to the backend and feeds results back in.
pub struct QuizAttempt {
    session: QuizSession,
    tracker: AnswerTracker,
    timer: CountdownTimer,
    nav: Navigator,
    gate: FeedbackGate,
    status: SessionStatus,
    result: Option<QuizResult>,
    completed_at: Option<DateTime<Utc>>,
}

impl QuizAttempt {
    /// Start a fresh attempt: timer running, first question visited.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if the session has no questions.
    pub fn begin(session: QuizSession) -> Result<Self, SessionError> {
        let limit = session.time_limit_seconds();
        Self::begin_with_remaining(session, limit)
    }

    pub(crate) fn begin_with_remaining(
        session: QuizSession,
        seconds_remaining: u32,
    ) -> Result<Self, SessionError> {
        if session.total_questions() == 0 {
            return Err(SessionError::Empty);
        }

        let tracker = AnswerTracker::new(session.questions());
        let nav = Navigator::new(session.total_questions());
        let mut timer = CountdownTimer::new();
        timer.start(seconds_remaining);

        let mut attempt = Self {
            session,
            tracker,
            timer,
            nav,
            gate: FeedbackGate::new(),
            status: SessionStatus::InProgress,
            result: None,
            completed_at: None,
        };
        attempt.tracker.mark_visited(0);
        Ok(attempt)
    }

    /// Rehydrate saved answers from a resumed attempt and move to `current_index`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Answer` if a saved answer does not fit its question.
    pub(crate) fn restore_answers(
        &mut self,
        answers: impl IntoIterator<Item = (usize, Option<AnswerValue>, bool, bool)>,
        current_index: usize,
    ) -> Result<(), SessionError> {
        for (index, selected, is_answered, is_skipped) in answers {
            self.tracker
                .restore(index, selected, is_answered, is_skipped)?;
        }
        let index = self.nav.jump_to(current_index);
        self.tracker.mark_visited(index);
        Ok(())
    }

    // ─── Accessors ─────────────────────────────────────────────────────────────

    #[must_use]
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.nav.current()
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&SessionQuestion> {
        self.session.question(self.nav.current())
    }

    #[must_use]
    pub fn current_answer(&self) -> Option<&AnswerState> {
        self.tracker.get(self.nav.current())
    }

    #[must_use]
    pub fn answers(&self) -> &[AnswerState] {
        self.tracker.states()
    }

    #[must_use]
    pub fn timer(&self) -> TimerState {
        self.timer.state()
    }

    #[must_use]
    pub fn seconds_remaining(&self) -> u32 {
        self.timer.seconds_remaining()
    }

    /// Seconds used so far out of the time limit.
    #[must_use]
    pub fn time_spent_seconds(&self) -> u32 {
        self.session
            .time_limit_seconds()
            .saturating_sub(self.timer.seconds_remaining())
    }

    #[must_use]
    pub fn feedback(&self) -> Option<&Feedback> {
        self.gate.current()
    }

    #[must_use]
    pub fn is_feedback_blocking(&self) -> bool {
        self.gate.is_blocking()
    }

    #[must_use]
    pub fn feedback_deadline(&self) -> Option<DateTime<Utc>> {
        self.gate.advance_at()
    }

    #[must_use]
    pub fn result(&self) -> Option<&QuizResult> {
        self.result.as_ref()
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.status.is_terminal()
    }

    #[must_use]
    pub fn is_last_question(&self) -> bool {
        self.nav.is_last()
    }

    #[must_use]
    pub fn can_go_previous(&self) -> bool {
        self.status.accepts_input() && !self.gate.is_blocking() && self.nav.has_previous()
    }

    #[must_use]
    pub fn can_go_next(&self) -> bool {
        self.status.accepts_input() && !self.gate.is_blocking() && self.nav.has_next()
    }

    /// Whether the submit button is offered: always on the last question,
    /// elsewhere the learner has to ask for it explicitly.
    #[must_use]
    pub fn submit_enabled(&self) -> bool {
        self.status.can_submit() && (self.nav.is_last() || self.status == SessionStatus::Expired)
    }

    /// Whether the current question still accepts an answer edit.
    #[must_use]
    pub fn can_edit_answer(&self) -> bool {
        self.ensure_editable().is_ok()
    }

    #[must_use]
    pub fn stats(&self) -> QuizStats {
        QuizStats::from_tracker(&self.tracker)
    }

    // ─── Guards ────────────────────────────────────────────────────────────────

    fn ensure_in_progress(&self) -> Result<(), SessionError> {
        match self.status {
            SessionStatus::InProgress => Ok(()),
            SessionStatus::Expired => Err(SessionError::Expired),
            SessionStatus::Submitting => Err(SessionError::Submitting),
            SessionStatus::Completed | SessionStatus::NotStarted => Err(SessionError::Completed),
        }
    }

    fn ensure_unblocked(&self) -> Result<(), SessionError> {
        self.ensure_in_progress()?;
        if self.gate.is_blocking() {
            return Err(SessionError::FeedbackPending);
        }
        Ok(())
    }

    fn ensure_editable(&self) -> Result<(), SessionError> {
        self.ensure_unblocked()?;
        let index = self.nav.current();
        match self.tracker.get(index) {
            Some(state) if state.is_answered() && state.question_type().is_choice() => {
                Err(SessionError::AlreadyAnswered { index })
            }
            _ => Ok(()),
        }
    }

    // ─── Answering ─────────────────────────────────────────────────────────────

    /// Record a selection on the current question without saving it.
    ///
    /// Choice questions lock once their answer is saved; essays stay editable.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the attempt is not in progress, feedback is
    /// blocking, the question is locked, or the input does not fit the question.
    pub fn select(&mut self, input: AnswerInput) -> Result<&AnswerValue, SessionError> {
        self.ensure_editable()?;
        let index = self.nav.current();
        if let AnswerInput::Option(option) = &input {
            let known = self
                .session
                .question(index)
                .is_some_and(|question| question.has_option(option));
            if !known {
                return Err(AnswerError::UnknownOption {
                    option: option.clone(),
                }
                .into());
            }
        }
        Ok(self.tracker.select(index, input)?)
    }

    /// The current selection, if it can be saved right now.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NothingSelected` for an empty selection, plus the
    /// same guards as [`QuizAttempt::select`].
    pub fn pending_answer(&self) -> Result<PendingAnswer, SessionError> {
        self.ensure_editable()?;
        let index = self.nav.current();
        let question = self.session.question(index).ok_or(SessionError::Empty)?;
        let value = self
            .tracker
            .get(index)
            .and_then(AnswerState::selected)
            .filter(|value| !value.is_empty())
            .cloned()
            .ok_or(SessionError::NothingSelected)?;
        Ok(PendingAnswer {
            index,
            question_id: question.id().clone(),
            value,
        })
    }

    /// Mark a choice answer saved and show its grading.
    ///
    /// `advance_at` is ignored on the last question, where feedback stays until
    /// dismissed or the attempt is submitted.
    pub(crate) fn record_graded(
        &mut self,
        index: usize,
        record: FeedbackRecord,
        advance_at: DateTime<Utc>,
    ) {
        self.tracker.mark_answered(index);
        let is_last = index + 1 >= self.session.total_questions();
        let advance_at = (!is_last).then_some(advance_at);
        self.gate.open_graded(index, record, advance_at);
    }

    /// Mark an essay answer saved. Shows a non-blocking "saved" note.
    pub(crate) fn record_saved(&mut self, index: usize) {
        self.tracker.mark_answered(index);
        self.gate.open_saved(index);
    }

    /// Skip the current question and move on when there is a next one.
    ///
    /// Returns `false` when the question already has a saved answer.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the attempt is not in progress or feedback is blocking.
    pub fn skip(&mut self) -> Result<bool, SessionError> {
        self.ensure_unblocked()?;
        let index = self.nav.current();
        if !self.tracker.mark_skipped(index) {
            return Ok(false);
        }
        if self.nav.has_next() {
            self.move_to(index + 1);
        }
        Ok(true)
    }

    // ─── Feedback ──────────────────────────────────────────────────────────────

    /// Close graded feedback and move to the next question.
    ///
    /// On the last question the feedback stays up; returns whether the cursor moved.
    pub fn advance_after_feedback(&mut self) -> bool {
        if !self.gate.is_blocking() || self.gate.advance_at().is_none() {
            return false;
        }
        self.gate.dismiss();
        if !self.status.accepts_input() || !self.nav.has_next() {
            return false;
        }
        let next = self.nav.current() + 1;
        self.move_to(next);
        true
    }

    /// Auto-advance once the feedback dwell has elapsed at `now`.
    pub fn poll_feedback(&mut self, now: DateTime<Utc>) -> bool {
        if self.gate.is_due(now) {
            return self.advance_after_feedback();
        }
        false
    }

    /// Acknowledge feedback without moving. Returns whether anything was dismissed.
    pub fn dismiss_feedback(&mut self) -> bool {
        self.gate.dismiss().is_some()
    }

    // ─── Navigation ────────────────────────────────────────────────────────────

    fn move_to(&mut self, index: usize) -> usize {
        if self.gate.current().is_some_and(|f| f.question_index != index) {
            self.gate.dismiss();
        }
        let index = self.nav.jump_to(index);
        self.tracker.mark_visited(index);
        index
    }

    /// # Errors
    ///
    /// Returns `SessionError` if the attempt is not in progress or feedback is blocking.
    pub fn previous(&mut self) -> Result<usize, SessionError> {
        self.ensure_unblocked()?;
        let target = self.nav.current().saturating_sub(1);
        Ok(self.move_to(target))
    }

    /// # Errors
    ///
    /// Returns `SessionError` if the attempt is not in progress or feedback is blocking.
    pub fn next(&mut self) -> Result<usize, SessionError> {
        self.ensure_unblocked()?;
        let target = self.nav.current() + 1;
        Ok(self.move_to(target))
    }

    /// Jump straight to `index` (clamped to the last question).
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the attempt is not in progress or feedback is blocking.
    pub fn jump_to(&mut self, index: usize) -> Result<usize, SessionError> {
        self.ensure_unblocked()?;
        Ok(self.move_to(index))
    }

    // ─── Timer ─────────────────────────────────────────────────────────────────

    /// Advance the countdown by one second. Expiry moves the attempt to `Expired`.
    pub fn tick(&mut self) -> TickOutcome {
        if self.status != SessionStatus::InProgress {
            return TickOutcome::Idle;
        }
        let outcome = self.timer.tick();
        if outcome == TickOutcome::Expired {
            self.status = SessionStatus::Expired;
        }
        outcome
    }

    // ─── Submission ────────────────────────────────────────────────────────────

    /// Freeze the attempt for submission. Returns the status to restore on failure.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Submitting` or `SessionError::Completed` if a
    /// submission is already underway or done.
    pub(crate) fn begin_submit(&mut self) -> Result<SessionStatus, SessionError> {
        match self.status {
            SessionStatus::InProgress | SessionStatus::Expired => {}
            SessionStatus::Submitting => return Err(SessionError::Submitting),
            SessionStatus::Completed | SessionStatus::NotStarted => {
                return Err(SessionError::Completed);
            }
        }
        let previous = self.status;
        self.timer.stop();
        self.status = SessionStatus::Submitting;
        Ok(previous)
    }

    pub(crate) fn submit_failed(&mut self, previous: SessionStatus) {
        self.status = previous;
        if previous == SessionStatus::InProgress {
            let remaining = self.timer.seconds_remaining();
            self.timer.start(remaining);
        }
    }

    pub(crate) fn complete(&mut self, result: QuizResult, completed_at: DateTime<Utc>) {
        self.timer.stop();
        self.gate.dismiss();
        self.status = SessionStatus::Completed;
        self.result = Some(result);
        self.completed_at = Some(completed_at);
    }

    /// Snapshot of every question's answer state for the submit call.
    #[must_use]
    pub fn final_state(&self) -> Vec<FinalAnswer> {
        self.session
            .questions()
            .iter()
            .zip(self.tracker.states())
            .map(|(question, state)| FinalAnswer {
                question_id: question.id().clone(),
                selected: state.saved().cloned(),
                is_answered: state.is_answered(),
                is_skipped: state.is_skipped(),
            })
            .collect()
    }

    /// Stop the countdown and drop the attempt client-side.
    pub fn abandon(mut self) -> QuizSession {
        self.timer.stop();
        self.session
    }
}

impl fmt::Debug for QuizAttempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizAttempt")
            .field("session_id", self.session.id())
            .field("questions_len", &self.session.total_questions())
            .field("current", &self.nav.current())
            .field("status", &self.status)
            .field("seconds_remaining", &self.timer.seconds_remaining())
            .field("feedback_blocking", &self.gate.is_blocking())
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use quiz_core::model::{
        Difficulty, OptionId, QuestionOption, QuestionType, QuizType, SessionId,
    };
    use quiz_core::time::fixed_now;

    fn question(id: &str, question_type: QuestionType) -> SessionQuestion {
        let options = if question_type.is_choice() {
            vec![QuestionOption::new("a", "A"), QuestionOption::new("b", "B")]
        } else {
            Vec::new()
        };
        SessionQuestion::new(
            QuestionId::new(id),
            format!("Question {id}"),
            question_type,
            Difficulty::Medium,
            10,
            options,
        )
        .unwrap()
    }

    fn build_attempt(limit: u32) -> QuizAttempt {
        let session = QuizSession::new(
            SessionId::new("s1"),
            QuizType::Timed,
            vec![
                question("q1", QuestionType::SingleChoice),
                question("q2", QuestionType::MultipleChoice),
                question("q3", QuestionType::Essay),
            ],
            limit,
            fixed_now(),
        );
        QuizAttempt::begin(session).unwrap()
    }

    fn record() -> FeedbackRecord {
        FeedbackRecord {
            is_correct: true,
            correct_answer: vec![OptionId::new("a")],
            points_earned: 10.0,
        }
    }

    fn opt(id: &str) -> AnswerInput {
        AnswerInput::Option(OptionId::new(id))
    }

    #[test]
    fn empty_session_returns_error() {
        let session = QuizSession::new(
            SessionId::new("s0"),
            QuizType::Mock,
            Vec::new(),
            60,
            fixed_now(),
        );
        assert!(matches!(
            QuizAttempt::begin(session).unwrap_err(),
            SessionError::Empty
        ));
    }

    #[test]
    fn begin_visits_first_question() {
        let attempt = build_attempt(300);
        assert_eq!(attempt.status(), SessionStatus::InProgress);
        assert!(attempt.answers()[0].is_visited());
        assert!(!attempt.answers()[1].is_visited());
        assert_eq!(attempt.seconds_remaining(), 300);
    }

    #[test]
    fn unknown_option_is_rejected() {
        let mut attempt = build_attempt(300);
        let err = attempt.select(opt("z")).unwrap_err();
        assert!(matches!(
            err,
            SessionError::Answer(AnswerError::UnknownOption { .. })
        ));
    }

    #[test]
    fn graded_feedback_blocks_input_until_advance() {
        let mut attempt = build_attempt(300);
        attempt.select(opt("a")).unwrap();
        let pending = attempt.pending_answer().unwrap();
        attempt.record_graded(pending.index, record(), fixed_now() + Duration::seconds(2));

        assert!(attempt.is_feedback_blocking());
        assert!(matches!(
            attempt.select(opt("b")),
            Err(SessionError::FeedbackPending)
        ));
        assert!(matches!(attempt.next(), Err(SessionError::FeedbackPending)));
        assert!(matches!(attempt.skip(), Err(SessionError::FeedbackPending)));

        assert!(!attempt.poll_feedback(fixed_now()));
        assert!(attempt.poll_feedback(fixed_now() + Duration::seconds(2)));
        assert_eq!(attempt.current_index(), 1);
        assert!(attempt.feedback().is_none());
    }

    #[test]
    fn answered_choice_question_is_locked() {
        let mut attempt = build_attempt(300);
        attempt.select(opt("a")).unwrap();
        attempt.record_graded(0, record(), fixed_now());
        attempt.advance_after_feedback();
        attempt.previous().unwrap();
        assert!(matches!(
            attempt.select(opt("b")),
            Err(SessionError::AlreadyAnswered { index: 0 })
        ));
        assert!(!attempt.skip().unwrap());
    }

    #[test]
    fn last_question_feedback_does_not_auto_advance() {
        let session = QuizSession::new(
            SessionId::new("s2"),
            QuizType::Timed,
            vec![
                question("q1", QuestionType::SingleChoice),
                question("q2", QuestionType::SingleChoice),
            ],
            120,
            fixed_now(),
        );
        let mut attempt = QuizAttempt::begin(session).unwrap();
        attempt.next().unwrap();
        assert!(attempt.is_last_question());
        attempt.select(opt("a")).unwrap();
        let pending = attempt.pending_answer().unwrap();
        attempt.record_graded(pending.index, record(), fixed_now());

        assert!(attempt.feedback_deadline().is_none());
        assert!(!attempt.poll_feedback(fixed_now() + Duration::days(1)));
        assert!(attempt.is_feedback_blocking());
        assert!(attempt.submit_enabled());
        assert!(attempt.dismiss_feedback());
        assert!(!attempt.is_feedback_blocking());
        assert_eq!(attempt.current_index(), 1);
    }

    #[test]
    fn essay_feedback_never_blocks() {
        let mut attempt = build_attempt(300);
        attempt.jump_to(2).unwrap();
        attempt.select(AnswerInput::Text("ownership moves".into())).unwrap();
        attempt.record_saved(2);
        assert!(!attempt.is_feedback_blocking());
        attempt
            .select(AnswerInput::Text("ownership moves values".into()))
            .unwrap();
        assert!(attempt.answers()[2].is_answered());
        assert!(attempt.previous().is_ok());
    }

    #[test]
    fn skip_advances_and_never_marks_answered() {
        let mut attempt = build_attempt(300);
        assert!(attempt.skip().unwrap());
        assert_eq!(attempt.current_index(), 1);
        assert!(attempt.answers()[0].is_skipped());
        assert!(!attempt.answers()[0].is_answered());
        assert!(attempt.answers()[1].is_visited());
    }

    #[test]
    fn skip_on_last_question_stays() {
        let mut attempt = build_attempt(300);
        attempt.jump_to(2).unwrap();
        assert!(attempt.skip().unwrap());
        assert_eq!(attempt.current_index(), 2);
    }

    #[test]
    fn navigation_is_clamped() {
        let mut attempt = build_attempt(300);
        assert_eq!(attempt.previous().unwrap(), 0);
        assert_eq!(attempt.jump_to(99).unwrap(), 2);
        assert_eq!(attempt.next().unwrap(), 2);
        assert!(!attempt.can_go_next());
        assert!(attempt.can_go_previous());
    }

    #[test]
    fn empty_selection_is_not_pending() {
        let mut attempt = build_attempt(300);
        attempt.jump_to(1).unwrap();
        attempt.select(opt("a")).unwrap();
        attempt.select(opt("a")).unwrap();
        assert!(matches!(
            attempt.pending_answer(),
            Err(SessionError::NothingSelected)
        ));
    }

    #[test]
    fn expiry_freezes_input() {
        let mut attempt = build_attempt(2);
        assert_eq!(attempt.tick(), TickOutcome::Running { remaining: 1 });
        assert_eq!(attempt.tick(), TickOutcome::Expired);
        assert_eq!(attempt.status(), SessionStatus::Expired);
        assert_eq!(attempt.tick(), TickOutcome::Idle);
        assert!(matches!(attempt.select(opt("a")), Err(SessionError::Expired)));
        assert!(matches!(attempt.next(), Err(SessionError::Expired)));
        assert!(attempt.submit_enabled());
        assert!(attempt.timer().is_expired);
    }

    #[test]
    fn failed_submit_restores_status_and_timer() {
        let mut attempt = build_attempt(10);
        attempt.tick();
        let previous = attempt.begin_submit().unwrap();
        assert_eq!(attempt.status(), SessionStatus::Submitting);
        assert_eq!(attempt.tick(), TickOutcome::Idle);
        assert!(matches!(attempt.begin_submit(), Err(SessionError::Submitting)));

        attempt.submit_failed(previous);
        assert_eq!(attempt.status(), SessionStatus::InProgress);
        assert_eq!(attempt.tick(), TickOutcome::Running { remaining: 8 });
    }

    #[test]
    fn skipped_question_reports_no_answer() {
        let mut attempt = build_attempt(300);
        attempt.jump_to(1).unwrap();
        attempt.select(opt("a")).unwrap();
        assert!(attempt.skip().unwrap());

        let state = attempt.final_state();
        assert!(state[1].is_skipped);
        assert_eq!(state[1].selected, None);
        assert!(attempt.answers()[1].selected().is_none());
    }

    #[test]
    fn edited_essay_submits_last_saved_text() {
        let mut attempt = build_attempt(300);
        attempt.jump_to(2).unwrap();
        attempt.select(AnswerInput::Text("ownership".into())).unwrap();
        attempt.record_saved(2);
        attempt.select(AnswerInput::Text("   ".into())).unwrap();

        assert!(attempt.answers()[2].has_unsaved_edit());
        assert!(matches!(
            attempt.pending_answer(),
            Err(SessionError::NothingSelected)
        ));
        let state = attempt.final_state();
        assert!(state[2].is_answered);
        assert_eq!(state[2].selected, Some(AnswerValue::Essay("ownership".into())));
    }

    #[test]
    fn staged_selection_is_not_submitted() {
        let mut attempt = build_attempt(300);
        attempt.jump_to(1).unwrap();
        attempt.select(opt("b")).unwrap();
        let state = attempt.final_state();
        assert!(!state[1].is_answered);
        assert_eq!(state[1].selected, None);
    }

    #[test]
    fn restore_keeps_first_question_visited() {
        let mut attempt = build_attempt(300);
        attempt
            .restore_answers(
                vec![
                    (0, None, false, false),
                    (1, None, false, true),
                ],
                2,
            )
            .unwrap();
        assert!(attempt.answers()[0].is_visited());
        assert!(attempt.answers()[1].is_skipped());
        assert_eq!(attempt.current_index(), 2);
    }

    #[test]
    fn final_state_lists_every_question() {
        let mut attempt = build_attempt(300);
        attempt.select(opt("b")).unwrap();
        attempt.record_graded(0, record(), fixed_now());
        attempt.advance_after_feedback();
        attempt.skip().unwrap();

        let state = attempt.final_state();
        assert_eq!(state.len(), 3);
        assert!(state[0].is_answered);
        assert_eq!(state[0].selected, Some(AnswerValue::Single(OptionId::new("b"))));
        assert!(state[1].is_skipped);
        assert!(!state[2].is_answered && !state[2].is_skipped);
    }
}
