use std::time::Duration;

use dioxus::prelude::*;
use dioxus_router::use_navigator;
use exam_core::model::TestId;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::components::{QuestionCard, TimeUpBanner, TimerBadge};
use crate::views::{ViewState, view_state_from_resource};
use crate::vm::{NavItemVm, PracticeIntent, PracticeVm, TimerVm, intent_for_key};

fn nav_item_class(item: NavItemVm) -> &'static str {
    match (item.current, item.answered) {
        (true, _) => "nav-item nav-item--current",
        (false, true) => "nav-item nav-item--answered",
        (false, false) => "nav-item",
    }
}

#[component]
pub fn PracticeView(test_id: u64) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let practice = ctx.practice();

    let vm = use_signal(|| None::<PracticeVm>);
    let finishing = use_signal(|| false);

    let resource = use_resource(move || {
        let practice = practice.clone();
        let mut vm = vm;
        async move {
            let session = practice.start_or_empty(TestId::new(test_id)).await;
            vm.set(Some(PracticeVm::new(session)));
        }
    });
    let state = view_state_from_resource(resource);

    use_future(move || {
        let mut vm = vm;
        async move {
            loop {
                tokio::time::sleep(Duration::from_secs(1)).await;
                let running = vm
                    .read()
                    .as_ref()
                    .is_some_and(|vm| matches!(vm.timer(), TimerVm::Running(_)));
                if running && let Some(vm) = vm.write().as_mut() {
                    vm.tick();
                }
            }
        }
    });

    let dispatch = use_callback(move |intent: PracticeIntent| {
        let mut vm = vm;
        if let Some(vm) = vm.write().as_mut() {
            vm.apply(intent);
        }
    });

    let on_finish = use_callback(move |()| {
        let mut vm = vm;
        let mut finishing = finishing;
        let Some(current) = vm.write().take() else {
            return;
        };
        finishing.set(true);
        spawn(async move {
            let test_id = current.finish().await;
            let _ = navigator.push(Route::Review {
                test_id: test_id.value(),
            });
        });
    });

    let on_key = use_callback(move |evt: KeyboardEvent| {
        if let Some(intent) = intent_for_key(&evt.data.key()) {
            evt.prevent_default();
            dispatch.call(intent);
        }
    });

    let vm_guard = vm.read();
    let current = vm_guard.as_ref();
    let question = current.and_then(PracticeVm::question);
    let timer = current.map_or(TimerVm::Untimed, PracticeVm::timer);
    let progress_label = current.map(PracticeVm::progress_label).unwrap_or_default();
    let answered_label = current.map(PracticeVm::answered_label).unwrap_or_default();
    let started_label = current.map(PracticeVm::started_label).unwrap_or_default();
    let nav_items = current.map(PracticeVm::nav_items).unwrap_or_default();
    let can_prev = current.is_some_and(PracticeVm::can_prev);
    let can_next = current.is_some_and(PracticeVm::can_next);
    let can_pause = current.is_some_and(PracticeVm::can_pause);
    let paused = current.is_some_and(PracticeVm::is_paused);
    let time_up = current.is_some_and(PracticeVm::is_time_up);
    let has_questions = current.is_some_and(PracticeVm::has_questions);

    rsx! {
        div { class: "page practice-page", id: "practice-root", tabindex: "0", onkeydown: on_key,
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { class: "loading", "Loading test..." }
                },
                ViewState::Ready(()) if finishing() => rsx! {
                    p { class: "loading", "Saving your answers..." }
                },
                ViewState::Ready(()) => rsx! {
                    header { class: "practice-header",
                        div { class: "practice-header__meta",
                            span { class: "practice-progress", "{progress_label}" }
                            span { class: "practice-answered", "{answered_label}" }
                            span { class: "practice-started", "{started_label}" }
                        }
                        div { class: "practice-header__actions",
                            TimerBadge { timer: timer.clone() }
                            if can_pause {
                                button {
                                    class: "btn btn-secondary",
                                    id: "practice-pause",
                                    onclick: move |_| {
                                        dispatch.call(if paused { PracticeIntent::Resume } else { PracticeIntent::Pause });
                                    },
                                    if paused { "Resume" } else { "Pause" }
                                }
                            }
                            button {
                                class: "btn btn-primary",
                                id: "practice-finish",
                                onclick: move |_| on_finish.call(()),
                                "Finish"
                            }
                        }
                    }
                    if time_up {
                        TimeUpBanner {}
                    }
                    match question {
                        Some(question) => rsx! {
                            QuestionCard {
                                question,
                                locked: time_up || paused,
                                on_toggle: move |index| dispatch.call(PracticeIntent::Toggle(index)),
                            }
                        },
                        None => rsx! {
                            p { class: "empty", "This test has no questions." }
                        },
                    }
                    if has_questions {
                        footer { class: "practice-footer",
                            button {
                                class: "btn btn-secondary",
                                disabled: !can_prev,
                                onclick: move |_| dispatch.call(PracticeIntent::Prev),
                                "Previous"
                            }
                            button {
                                class: "btn btn-ghost",
                                onclick: move |_| dispatch.call(PracticeIntent::Reveal),
                                "Show answer"
                            }
                            button {
                                class: "btn btn-secondary",
                                disabled: !can_next,
                                onclick: move |_| dispatch.call(PracticeIntent::Next),
                                "Next"
                            }
                        }
                        nav { class: "question-grid",
                            for item in nav_items {
                                button {
                                    key: "{item.index}",
                                    class: nav_item_class(item),
                                    onclick: move |_| dispatch.call(PracticeIntent::Goto(item.index)),
                                    "{item.number}"
                                }
                            }
                        }
                    }
                },
            }
        }
    }
}
