use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::views::{HomeView, PracticeView, ReviewView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/practice/:test_id", PracticeView)] Practice { test_id: u64 },
        #[route("/review/:test_id", ReviewView)] Review { test_id: u64 },
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            nav { class: "topbar",
                h1 { "Exam Practice" }
                Link { to: Route::Home {}, "Choose a test" }
            }
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}
