use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use quiz_core::model::QuizType;
use services::QuizLoopService;

pub trait UiApp: Send + Sync {
    fn quiz_type(&self) -> QuizType;
    fn resume_on_launch(&self) -> bool;

    fn quiz_loop(&self) -> Arc<QuizLoopService>;
}

#[derive(Clone)]
pub struct AppContext {
    quiz_type: QuizType,
    resume_on_launch_configured: bool,
    resume_on_launch_once: Arc<AtomicBool>,

    quiz_loop: Arc<QuizLoopService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        let resume_on_launch_configured = app.resume_on_launch();
        Self {
            quiz_type: app.quiz_type(),
            resume_on_launch_configured,
            resume_on_launch_once: Arc::new(AtomicBool::new(resume_on_launch_configured)),
            quiz_loop: app.quiz_loop(),
        }
    }

    #[must_use]
    pub fn quiz_type(&self) -> QuizType {
        self.quiz_type
    }

    /// True only for the first caller when resuming was requested at launch.
    #[must_use]
    pub fn take_resume_on_launch(&self) -> bool {
        self.resume_on_launch_once.swap(false, Ordering::AcqRel)
    }

    #[must_use]
    pub fn resume_on_launch_configured(&self) -> bool {
        self.resume_on_launch_configured
    }

    #[must_use]
    pub fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }
}

// Provided by the composition root in `crates/app`.

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}

#[cfg(test)]
mod tests {
    use super::*;
    use services::{Clock, InMemoryQuizApi};

    struct TestApp {
        quiz_loop: Arc<QuizLoopService>,
    }

    impl UiApp for TestApp {
        fn quiz_type(&self) -> QuizType {
            QuizType::Mock
        }

        fn resume_on_launch(&self) -> bool {
            true
        }

        fn quiz_loop(&self) -> Arc<QuizLoopService> {
            Arc::clone(&self.quiz_loop)
        }
    }

    #[test]
    fn resume_flag_is_taken_once() {
        let api = Arc::new(InMemoryQuizApi::new(Vec::new(), 60));
        let app: Arc<dyn UiApp> = Arc::new(TestApp {
            quiz_loop: Arc::new(QuizLoopService::new(Clock::default(), api)),
        });
        let context = build_app_context(&app);

        assert_eq!(context.quiz_type(), QuizType::Mock);
        assert!(context.take_resume_on_launch());
        assert!(!context.take_resume_on_launch());
        assert!(context.resume_on_launch_configured());
    }
}
