use dioxus::prelude::*;
use dioxus_router::Link;

use quiz_core::model::QuizType;
use services::TickerHandle;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{QuizIntent, QuizPhase, QuizScreenVm, QuizVm};

use super::components::{QuestionCard, QuizHeader, QuizNavigationPanel, QuizResults};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

/// Put a checked-out vm back and refresh what the screen draws from it.
fn check_in(mut vm: Signal<Option<QuizVm>>, mut screen: Signal<QuizScreenVm>, local: QuizVm) {
    screen.set(local.screen());
    vm.set(Some(local));
}

fn countdown_running(phase: QuizPhase) -> bool {
    matches!(phase, QuizPhase::Answering | QuizPhase::Feedback)
}

#[component]
pub fn QuizView(quiz_type: QuizType) -> Element {
    let ctx = use_context::<AppContext>();
    let quiz_loop = ctx.quiz_loop();

    // `None` while a request holds the vm.
    let vm = use_signal(|| Some(QuizVm::new(quiz_type)));
    let screen = use_signal(|| QuizVm::new(quiz_type).screen());
    let error = use_signal(|| None::<ViewError>);
    let resumed = use_signal(|| false);

    let quiz_loop_for_resource = quiz_loop.clone();
    let resource = use_resource(move || {
        let quiz_loop = quiz_loop_for_resource.clone();
        let ctx = ctx.clone();
        let mut vm = vm;
        let mut error = error;
        let mut resumed = resumed;

        async move {
            let Some(mut local) = vm.write().take() else {
                return Err(ViewError::Unknown);
            };
            let started = if ctx.take_resume_on_launch() {
                local.resume_or_start(&quiz_loop).await
            } else {
                local.start(&quiz_loop).await.map(|()| false)
            };
            check_in(vm, screen, local);
            resumed.set(started?);
            error.set(None);
            Ok::<_, ViewError>(())
        }
    });

    let quiz_loop_for_timer = quiz_loop.clone();
    use_future(move || {
        let quiz_loop = quiz_loop_for_timer.clone();
        let mut vm = vm;
        let mut error = error;

        async move {
            let (_ticker, mut ticks) = TickerHandle::every_second();
            let mut owed = 0_u32;
            while let Some(elapsed) = ticks.recv().await {
                if !countdown_running(screen.peek().phase) {
                    owed = 0;
                    continue;
                }
                owed = owed.saturating_add(elapsed);
                // A request is in flight; its seconds are applied on the next tick.
                let Some(mut local) = vm.write().take() else {
                    continue;
                };
                let result = local.elapse(&quiz_loop, owed).await;
                owed = 0;
                check_in(vm, screen, local);
                if let Err(err) = result {
                    error.set(Some(err));
                }
            }
        }
    });

    let dispatch_intent = {
        let quiz_loop = quiz_loop.clone();
        use_callback(move |intent: QuizIntent| {
            let quiz_loop = quiz_loop.clone();
            let mut vm = vm;
            let mut error = error;

            spawn(async move {
                let Some(mut local) = vm.write().take() else {
                    return;
                };
                let result = local.apply(&quiz_loop, intent).await;

                // Always put the vm back so the screen stays usable after errors.
                check_in(vm, screen, local);

                match result {
                    Ok(_) => error.set(None),
                    Err(err) => error.set(Some(err)),
                }
            });
        })
    };

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<QuizTestHandles>() {
                handles.register(dispatch_intent, vm);
            }
        }
    }

    let on_key = use_callback(move |evt: KeyboardEvent| {
        let (phase, has_options) = {
            let screen = screen.read();
            let has_options = screen
                .question
                .as_ref()
                .is_some_and(|card| !card.options.is_empty());
            (screen.phase, has_options)
        };
        // Essays keep the keys for the text area.
        if phase != QuizPhase::Answering || !has_options {
            return;
        }
        match evt.data.key() {
            Key::ArrowLeft => {
                evt.prevent_default();
                dispatch_intent.call(QuizIntent::Previous);
            }
            Key::ArrowRight => {
                evt.prevent_default();
                dispatch_intent.call(QuizIntent::Next);
            }
            Key::Character(value) => {
                if let Ok(position) = value.parse::<usize>() {
                    if position >= 1 {
                        evt.prevent_default();
                        dispatch_intent.call(QuizIntent::Choose(position));
                    }
                }
            }
            _ => {}
        }
    });

    let state = view_state_from_resource(resource);
    let busy = vm.read().is_none();
    let current = screen.read().clone();

    rsx! {
        div { class: "page quiz-page", id: "quiz-root", tabindex: "0", onkeydown: on_key,
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "alert", "{err.message()}" }
                    if err.is_retryable() {
                        button {
                            class: "btn btn-secondary",
                            r#type: "button",
                            onclick: move |_| {
                                let mut resource = resource;
                                resource.restart();
                            },
                            "Retry"
                        }
                    }
                    Link { to: Route::Home {}, "Back to start" }
                },
                ViewState::Ready(()) => rsx! {
                    if resumed() && current.result.is_none() {
                        p { class: "notice", "Resuming your unfinished quiz." }
                    }
                    if let Some(err) = *error.read() {
                        p { class: "alert", role: "alert", "{err.message()}" }
                    }
                    if let Some(result) = current.result.clone() {
                        QuizResults { result }
                    } else {
                        if let Some(header) = current.header.clone() {
                            QuizHeader { header }
                        }
                        div { class: "quiz-body",
                            if let Some(nav) = current.nav.clone() {
                                QuizNavigationPanel { nav, busy, on_intent: dispatch_intent }
                            }
                            if let Some(card) = current.question.clone() {
                                QuestionCard { card, busy, on_intent: dispatch_intent }
                            }
                        }
                    }
                },
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct QuizTestHandles {
    dispatch: Rc<RefCell<Option<Callback<QuizIntent>>>>,
    vm: Rc<RefCell<Option<Signal<Option<QuizVm>>>>>,
}

#[cfg(test)]
impl QuizTestHandles {
    pub(crate) fn register(&self, dispatch: Callback<QuizIntent>, vm: Signal<Option<QuizVm>>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.vm.borrow_mut() = Some(vm);
    }

    pub(crate) fn dispatch(&self) -> Callback<QuizIntent> {
        (*self.dispatch.borrow()).expect("quiz dispatch registered")
    }

    pub(crate) fn vm(&self) -> Signal<Option<QuizVm>> {
        (*self.vm.borrow()).expect("quiz vm registered")
    }
}
