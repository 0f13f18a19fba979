//! Port to the remote exam backend.
//!
//! Payloads cross this boundary as raw JSON; `exam_core::mapper` turns them
//! into domain types.

mod http;
mod memory;

use async_trait::async_trait;
use exam_core::model::TestId;
use serde_json::Value;

use crate::error::BackendError;

pub use http::HttpExamBackend;
pub use memory::InMemoryBackend;

/// Contract for the exam/question/answer backend.
#[async_trait]
pub trait ExamBackend: Send + Sync {
    /// Fetch the test view model (questions, options, current selections, settings).
    ///
    /// # Errors
    ///
    /// Returns `BackendError` if the request fails or the body is not JSON.
    async fn fetch_test_view(&self, test_id: TestId) -> Result<Value, BackendError>;

    /// Store an updated view model carrying one question's new selection.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` if the request fails.
    async fn submit_selection(&self, test_id: TestId, view_model: &Value) -> Result<(), BackendError>;

    /// Fetch the scored buyer-test record used for review.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` if the request fails or the body is not JSON.
    async fn fetch_review_record(&self, test_id: TestId) -> Result<Value, BackendError>;
}
