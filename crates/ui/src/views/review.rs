use dioxus::prelude::*;
use dioxus_router::Link;
use exam_core::model::TestId;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::components::ReviewSummary;
use crate::views::{ViewState, view_state_from_resource};
use crate::vm::map_review;

#[component]
pub fn ReviewView(test_id: u64) -> Element {
    let ctx = use_context::<AppContext>();
    let review = ctx.review();

    let resource = use_resource(move || {
        let review = review.clone();
        async move { review.load(TestId::new(test_id)).await }
    });
    let state = view_state_from_resource(resource);
    let vm = match &state {
        ViewState::Ready(screen) => screen.report().map(map_review),
        ViewState::Idle | ViewState::Loading => None,
    };

    rsx! {
        div { class: "page review-page",
            header { class: "review-header",
                h2 { "Results for test {test_id}" }
                Link { class: "btn btn-secondary", to: Route::Practice { test_id }, "Practice again" }
            }
            match vm {
                Some(vm) => rsx! {
                    ReviewSummary { vm }
                },
                None => rsx! {
                    p { class: "loading", "Loading results..." }
                },
            }
        }
    }
}
