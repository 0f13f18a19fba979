use dioxus::prelude::*;
use dioxus_router::use_navigator;
use exam_core::model::TestId;

use crate::context::AppContext;
use crate::routes::Route;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Destination {
    Practice,
    Review,
}

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let input = use_signal(|| {
        ctx.initial_test_id()
            .map(|id| id.to_string())
            .unwrap_or_default()
    });
    let error = use_signal(|| None::<String>);

    let open = use_callback(move |destination: Destination| {
        let mut error = error;
        match input.read().parse::<TestId>() {
            Ok(id) => {
                error.set(None);
                let route = match destination {
                    Destination::Practice => Route::Practice { test_id: id.value() },
                    Destination::Review => Route::Review { test_id: id.value() },
                };
                let _ = navigator.push(route);
            }
            Err(err) => error.set(Some(err.to_string())),
        }
    });

    rsx! {
        div { class: "page home-page",
            h2 { "Open a test" }
            p { class: "home-hint", "Enter the id of a purchased test to practice it or to see its results." }
            form {
                class: "home-form",
                onsubmit: move |evt| {
                    evt.prevent_default();
                    open.call(Destination::Practice);
                },
                input {
                    id: "test-id",
                    r#type: "text",
                    inputmode: "numeric",
                    placeholder: "Test id",
                    value: "{input}",
                    oninput: move |evt| {
                        let mut input = input;
                        input.set(evt.value());
                    },
                }
                button { class: "btn btn-primary", r#type: "submit", "Start practice" }
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: move |_| open.call(Destination::Review),
                    "View results"
                }
            }
            if let Some(message) = error.read().as_ref() {
                p { class: "form-error", "{message}" }
            }
        }
    }
}
