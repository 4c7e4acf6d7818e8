use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use quiz_core::model::QuizType;
use quiz_core::time::fixed_clock;
use services::api::BankQuestion;
use services::{InMemoryQuizApi, QuizLoopService, SessionConfig};

use crate::context::{UiApp, build_app_context};
use crate::views::quiz::QuizTestHandles;
use crate::views::{HomeView, QuizView};
use crate::vm::QuizVm;

#[derive(Clone)]
struct TestApp {
    quiz_type: QuizType,
    resume: bool,
    quiz_loop: Arc<QuizLoopService>,
}

impl UiApp for TestApp {
    fn quiz_type(&self) -> QuizType {
        self.quiz_type
    }

    fn resume_on_launch(&self) -> bool {
        self.resume
    }

    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    Quiz(QuizType),
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    quiz_handles: Option<QuizTestHandles>,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    if let Some(handles) = props.quiz_handles.clone() {
        use_context_provider(|| handles);
    }
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::Quiz(quiz_type) => rsx! { QuizView { quiz_type } },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub api: InMemoryQuizApi,
    pub quiz_handles: Option<QuizTestHandles>,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Let spawned work finish and re-render.
    pub async fn settle(&mut self) {
        self.drive_async().await;
        self.drive_async().await;
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }

    pub fn dispatch(&self) -> Callback<crate::vm::QuizIntent> {
        self.quiz_handles
            .as_ref()
            .expect("quiz handles")
            .dispatch()
    }

    pub fn vm(&self) -> Signal<Option<QuizVm>> {
        self.quiz_handles.as_ref().expect("quiz handles").vm()
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn sample_bank() -> Vec<BankQuestion> {
    vec![
        BankQuestion::single(
            "q1",
            "What is two plus two",
            10,
            &[("three", "3"), ("four", "4")],
            "four",
        ),
        BankQuestion::multiple(
            "q2",
            "Pick the even numbers",
            10,
            &[("two", "2"), ("three", "3"), ("six", "6")],
            &["two", "six"],
        ),
        BankQuestion::essay("q3", "Explain why two is prime", 5),
    ]
}

pub fn setup_view_harness(view: ViewKind, bank: Vec<BankQuestion>, limit: u32) -> ViewHarness {
    let api = InMemoryQuizApi::new(bank, limit).with_clock(fixed_clock());
    setup_view_harness_with_api(view, api, false)
}

pub fn setup_view_harness_with_api(
    view: ViewKind,
    api: InMemoryQuizApi,
    resume: bool,
) -> ViewHarness {
    let quiz_loop = QuizLoopService::new(fixed_clock(), Arc::new(api.clone()))
        .with_config(SessionConfig::default());
    let quiz_type = match view {
        ViewKind::Quiz(quiz_type) => quiz_type,
        ViewKind::Home => QuizType::Timed,
    };
    let quiz_handles = match view {
        ViewKind::Quiz(_) => Some(QuizTestHandles::default()),
        ViewKind::Home => None,
    };

    let app = Arc::new(TestApp {
        quiz_type,
        resume,
        quiz_loop: Arc::new(quiz_loop),
    });

    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app,
            view,
            quiz_handles: quiz_handles.clone(),
        },
    );

    ViewHarness {
        dom,
        api,
        quiz_handles,
    }
}
