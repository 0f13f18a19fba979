use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use exam_core::model::TestId;
use serde_json::Value;

use super::ExamBackend;
use crate::error::BackendError;

/// In-process backend for tests and offline demos.
///
/// Submitted view models replace the stored view, so a later fetch sees them.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    views: Mutex<HashMap<TestId, Value>>,
    records: Mutex<HashMap<TestId, Value>>,
    submissions: Mutex<Vec<(TestId, Value)>>,
    offline: AtomicBool,
}

impl InMemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_view(self, test_id: TestId, view_model: Value) -> Self {
        lock(&self.views).insert(test_id, view_model);
        self
    }

    #[must_use]
    pub fn with_record(self, test_id: TestId, record: Value) -> Self {
        lock(&self.records).insert(test_id, record);
        self
    }

    /// Make every call fail with `BackendError::Unavailable` until switched back.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::Release);
    }

    /// Every view model passed to `submit_selection`, oldest first.
    #[must_use]
    pub fn submissions(&self) -> Vec<(TestId, Value)> {
        lock(&self.submissions).clone()
    }

    fn ensure_online(&self) -> Result<(), BackendError> {
        if self.offline.load(Ordering::Acquire) {
            Err(BackendError::Unavailable("in-memory backend is offline".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ExamBackend for InMemoryBackend {
    async fn fetch_test_view(&self, test_id: TestId) -> Result<Value, BackendError> {
        self.ensure_online()?;
        lock(&self.views)
            .get(&test_id)
            .cloned()
            .ok_or_else(|| BackendError::NotFound(format!("test {test_id}")))
    }

    async fn submit_selection(&self, test_id: TestId, view_model: &Value) -> Result<(), BackendError> {
        self.ensure_online()?;
        lock(&self.submissions).push((test_id, view_model.clone()));
        lock(&self.views).insert(test_id, view_model.clone());
        Ok(())
    }

    async fn fetch_review_record(&self, test_id: TestId) -> Result<Value, BackendError> {
        self.ensure_online()?;
        lock(&self.records)
            .get(&test_id)
            .cloned()
            .ok_or_else(|| BackendError::NotFound(format!("test {test_id}")))
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
