use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use quiz_core::model::QuizType;

use crate::views::{HomeView, QuizView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/quiz/:quiz_type", QuizView)] Quiz { quiz_type: QuizType },
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            header { class: "topbar",
                Link { to: Route::Home {}, "Zonata" }
            }
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}
