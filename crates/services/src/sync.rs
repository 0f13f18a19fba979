//! Write-behind delivery of selection changes.
//!
//! Every payload is the whole view model, so the backend keeps whichever
//! document lands last. At most one submission per test is in flight.
//! Changes made while it is outstanding collapse into the newest document,
//! which is sent once the in-flight call settles. Which questions are still
//! waiting is tracked per question id.

use std::collections::HashSet;
use std::mem;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use exam_core::model::{QuestionId, TestId};
use serde_json::Value;
use tokio::runtime::Handle;
use tokio::sync::Notify;
use tracing::{debug, warn};

use crate::backend::ExamBackend;

#[derive(Debug, Default)]
struct Queue {
    in_flight: bool,
    sending: HashSet<QuestionId>,
    queued: HashSet<QuestionId>,
    latest: Option<Value>,
}

impl Queue {
    fn pending_len(&self) -> usize {
        self.sending.union(&self.queued).count()
    }

    /// Promote the queued document to in flight, or go idle when there is none.
    fn advance(&mut self) -> Option<Value> {
        self.sending = mem::take(&mut self.queued);
        let next = self.latest.take();
        self.in_flight = next.is_some();
        next
    }
}

type SharedQueue = Arc<Mutex<Queue>>;

#[derive(Clone)]
pub struct SelectionSync {
    backend: Arc<dyn ExamBackend>,
    test_id: TestId,
    queue: SharedQueue,
    idle: Arc<Notify>,
}

impl SelectionSync {
    #[must_use]
    pub fn new(backend: Arc<dyn ExamBackend>, test_id: TestId) -> Self {
        Self {
            backend,
            test_id,
            queue: Arc::default(),
            idle: Arc::new(Notify::new()),
        }
    }

    /// Queue `payload`, the full view model after a change to `question_id`.
    ///
    /// Returns immediately. Failures are logged and never surface here.
    pub fn submit(&self, question_id: QuestionId, payload: Value) {
        let mut queue = lock(&self.queue);
        if queue.in_flight {
            if queue.latest.replace(payload).is_some() {
                debug!(test_id = %self.test_id, question = %question_id, "superseded pending selection");
            }
            queue.queued.insert(question_id);
            return;
        }

        let Ok(handle) = Handle::try_current() else {
            warn!(test_id = %self.test_id, question = %question_id, "no async runtime; selection not sent");
            return;
        };
        queue.in_flight = true;
        queue.sending.insert(question_id);
        drop(queue);

        handle.spawn(drain(
            Arc::clone(&self.backend),
            Flight {
                test_id: self.test_id,
                queue: Arc::clone(&self.queue),
                idle: Arc::clone(&self.idle),
                landed: false,
            },
            payload,
        ));
    }

    /// Questions whose latest change has not been delivered yet.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        lock(&self.queue).pending_len()
    }

    /// Resolve once nothing is in flight or queued.
    pub async fn wait_idle(&self) {
        loop {
            let mut notified = std::pin::pin!(self.idle.notified());
            notified.as_mut().enable();
            if self.pending_len() == 0 {
                return;
            }
            notified.await;
        }
    }
}

/// The single in-flight delivery for a test.
///
/// Dropping it before the queue went idle (the task panicked or was
/// cancelled) clears the queue so waiters are released.
struct Flight {
    test_id: TestId,
    queue: SharedQueue,
    idle: Arc<Notify>,
    landed: bool,
}

impl Flight {
    fn advance(&mut self) -> Option<Value> {
        let mut queue = lock(&self.queue);
        let next = queue.advance();
        if next.is_none() {
            self.landed = true;
            self.idle.notify_waiters();
        }
        next
    }
}

impl Drop for Flight {
    fn drop(&mut self) {
        if self.landed {
            return;
        }
        let mut queue = lock(&self.queue);
        warn!(
            test_id = %self.test_id,
            questions = queue.pending_len(),
            "selection delivery aborted; unsent changes dropped"
        );
        *queue = Queue::default();
        self.idle.notify_waiters();
    }
}

async fn drain(backend: Arc<dyn ExamBackend>, mut flight: Flight, first: Value) {
    let mut next = Some(first);
    while let Some(payload) = next {
        if let Err(err) = backend.submit_selection(flight.test_id, &payload).await {
            warn!(test_id = %flight.test_id, error = %err, "failed to store selection");
        }
        next = flight.advance();
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
