use dioxus::prelude::*;
use services::SessionError;

/// Presentation-facing error. Carries no source; the services layer logs details.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    EmptySession,
    NotStarted,
    Completed,
    TimeUp,
    Submitting,
    FeedbackPending,
    Locked,
    NothingSelected,
    InvalidAnswer,
    Network,
    /// The backend refused the request; repeating it will not help.
    Rejected,
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ViewError::EmptySession => "This quiz has no questions yet.",
            ViewError::NotStarted => "Start a quiz first.",
            ViewError::Completed => "This quiz has already been submitted.",
            ViewError::TimeUp => "Time is up. Your answers are being submitted.",
            ViewError::Submitting => "Submitting your answers...",
            ViewError::FeedbackPending => "Hold on, feedback for this question is still showing.",
            ViewError::Locked => "This question already has a saved answer.",
            ViewError::NothingSelected => "Pick an answer first.",
            ViewError::InvalidAnswer => "That answer does not fit this question.",
            ViewError::Network => "Could not reach the quiz server. Please try again.",
            ViewError::Rejected => "The quiz server rejected this request.",
            ViewError::Unknown => "Something went wrong. Please try again.",
        }
    }

    /// Whether repeating the same action may succeed.
    #[must_use]
    pub fn is_retryable(self) -> bool {
        matches!(self, ViewError::Network | ViewError::Unknown)
    }
}

impl From<&SessionError> for ViewError {
    fn from(err: &SessionError) -> Self {
        match err {
            SessionError::Empty => ViewError::EmptySession,
            SessionError::Completed => ViewError::Completed,
            SessionError::Expired => ViewError::TimeUp,
            SessionError::Submitting => ViewError::Submitting,
            SessionError::FeedbackPending => ViewError::FeedbackPending,
            SessionError::AlreadyAnswered { .. } => ViewError::Locked,
            SessionError::NothingSelected => ViewError::NothingSelected,
            SessionError::Answer(_) => ViewError::InvalidAnswer,
            SessionError::Api(api) if api.is_retryable() => ViewError::Network,
            SessionError::Api(_) => ViewError::Rejected,
            _ => ViewError::Unknown,
        }
    }
}

impl From<SessionError> for ViewError {
    fn from(err: SessionError) -> Self {
        ViewError::from(&err)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(*err),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use services::ApiError;

    #[test]
    fn session_errors_map_to_view_errors() {
        assert_eq!(ViewError::from(SessionError::Empty), ViewError::EmptySession);
        assert_eq!(
            ViewError::from(SessionError::AlreadyAnswered { index: 2 }),
            ViewError::Locked
        );
        assert_eq!(ViewError::from(SessionError::Expired), ViewError::TimeUp);
        assert!(!ViewError::Locked.is_retryable());
        assert!(ViewError::Network.is_retryable());
    }

    #[test]
    fn malformed_backend_reply_is_not_retryable() {
        let err = SessionError::Api(ApiError::Payload("missing score".into()));
        let view = ViewError::from(&err);
        assert_eq!(view, ViewError::Rejected);
        assert!(!view.is_retryable());
    }
}
