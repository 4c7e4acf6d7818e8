use dioxus::prelude::*;
use dioxus_router::Link;

use quiz_core::model::QuizType;

use crate::context::AppContext;
use crate::routes::Route;
use crate::vm::quiz_title;

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let configured = ctx.quiz_type();
    let choices: Vec<(QuizType, &'static str, &'static str)> = [QuizType::Timed, QuizType::Mock]
        .into_iter()
        .map(|quiz_type| {
            let class = if quiz_type == configured {
                "home-choice home-choice--default"
            } else {
                "home-choice"
            };
            (quiz_type, quiz_title(quiz_type), class)
        })
        .collect();

    rsx! {
        div { class: "page home-page",
            h2 { "Choose a quiz" }
            ul { class: "home-choices",
                for (quiz_type, title, class) in choices {
                    li { key: "{quiz_type}", class: "{class}",
                        Link { to: Route::Quiz { quiz_type }, "{title}" }
                    }
                }
            }
            if ctx.resume_on_launch_configured() {
                p { class: "home-note", "An unfinished attempt will be picked up where you left it." }
            }
        }
    }
}
