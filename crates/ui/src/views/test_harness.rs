use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use exam_core::model::TestId;
use exam_core::time::fixed_now;
use serde_json::Value;
use services::{Clock, InMemoryBackend, PracticeService, ReviewService, SessionContext};

use crate::context::{UiApp, build_app_context};
use crate::views::{HomeView, PracticeView, ReviewView};

#[derive(Clone)]
struct TestApp {
    initial_test_id: Option<TestId>,
    practice: Arc<PracticeService>,
    review: Arc<ReviewService>,
}

impl UiApp for TestApp {
    fn initial_test_id(&self) -> Option<TestId> {
        self.initial_test_id
    }

    fn practice(&self) -> Arc<PracticeService> {
        Arc::clone(&self.practice)
    }

    fn review(&self) -> Arc<ReviewService> {
        Arc::clone(&self.review)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    Practice(u64),
    Review(u64),
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
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
        ViewKind::Practice(test_id) => rsx! { PracticeView { test_id } },
        ViewKind::Review(test_id) => rsx! { ReviewView { test_id } },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub backend: Arc<InMemoryBackend>,
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

    /// Drive until `needle` shows up or the attempts run out.
    pub async fn drive_until(&mut self, needle: &str) -> String {
        for _ in 0..20 {
            let html = self.render();
            if html.contains(needle) {
                return html;
            }
            self.drive_async().await;
        }
        self.render()
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(view: ViewKind, backend: InMemoryBackend) -> ViewHarness {
    let backend = Arc::new(backend);
    let context = SessionContext::default();
    let practice = Arc::new(PracticeService::new(
        backend.clone(),
        Clock::fixed(fixed_now()),
        context.clone(),
    ));
    let review = Arc::new(ReviewService::new(backend.clone(), context));

    let app = Arc::new(TestApp {
        initial_test_id: Some(TestId::new(42)),
        practice,
        review,
    });

    let mut harness = ViewHarness {
        dom: VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view }),
        backend,
    };
    harness.rebuild();
    harness
}

/// Backend holding `view_model` (and optionally a scored record) for `test_id`.
pub fn backend_with(test_id: u64, view_model: Value, record: Option<Value>) -> InMemoryBackend {
    let id = TestId::new(test_id);
    let backend = InMemoryBackend::new().with_view(id, view_model);
    match record {
        Some(record) => backend.with_record(id, record),
        None => backend,
    }
}
