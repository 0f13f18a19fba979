use std::sync::Arc;

use exam_core::model::TestId;
use services::{PracticeService, ReviewService};

pub trait UiApp: Send + Sync {
    /// Test to open directly on launch, if any.
    fn initial_test_id(&self) -> Option<TestId>;

    fn practice(&self) -> Arc<PracticeService>;
    fn review(&self) -> Arc<ReviewService>;
}

#[derive(Clone)]
pub struct AppContext {
    initial_test_id: Option<TestId>,
    practice: Arc<PracticeService>,
    review: Arc<ReviewService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            initial_test_id: app.initial_test_id(),
            practice: app.practice(),
            review: app.review(),
        }
    }

    #[must_use]
    pub fn initial_test_id(&self) -> Option<TestId> {
        self.initial_test_id
    }

    #[must_use]
    pub fn practice(&self) -> Arc<PracticeService> {
        Arc::clone(&self.practice)
    }

    #[must_use]
    pub fn review(&self) -> Arc<ReviewService> {
        Arc::clone(&self.review)
    }
}

// This context is provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
