use std::sync::Arc;
use std::time::Duration;

use exam_core::model::{Question, QuestionId, Selection, TestId};
use exam_core::{
    Clock, CountdownTick, ExamSession, Navigator, ToggleOutcome, apply_selection, map_view_model,
};
use serde_json::Value;
use tracing::{info, warn};

use crate::backend::ExamBackend;
use crate::context::SessionContext;
use crate::error::SessionError;
use crate::sync::SelectionSync;

/// Opens practice attempts against the backend.
#[derive(Clone)]
pub struct PracticeService {
    backend: Arc<dyn ExamBackend>,
    clock: Clock,
    context: SessionContext,
}

impl PracticeService {
    #[must_use]
    pub fn new(backend: Arc<dyn ExamBackend>, clock: Clock, context: SessionContext) -> Self {
        Self {
            backend,
            clock,
            context,
        }
    }

    #[must_use]
    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    /// Fetch the test view and build a session from it.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Backend` if the view model cannot be fetched.
    pub async fn start(&self, test_id: TestId) -> Result<PracticeSession, SessionError> {
        let raw = {
            let _loading = self.context.loading.begin();
            self.backend.fetch_test_view(test_id).await?
        };
        let mapped = map_view_model(&raw);
        info!(%test_id, questions = mapped.questions.len(), "practice session started");

        Ok(PracticeSession {
            test_id,
            exam: ExamSession::new(mapped, self.clock.now()),
            raw,
            sync: SelectionSync::new(Arc::clone(&self.backend), test_id),
        })
    }

    /// Like `start`, but a failed fetch yields an empty session.
    pub async fn start_or_empty(&self, test_id: TestId) -> PracticeSession {
        match self.start(test_id).await {
            Ok(session) => session,
            Err(err) => {
                warn!(%test_id, error = %err, "could not load test; showing an empty session");
                PracticeSession {
                    test_id,
                    exam: ExamSession::empty(self.clock.now()),
                    raw: Value::Null,
                    sync: SelectionSync::new(Arc::clone(&self.backend), test_id),
                }
            }
        }
    }
}

/// A running attempt: local state plus the view model mirrored to the backend.
///
/// Selection changes apply locally first and are then queued for delivery;
/// a failed delivery never rolls them back.
#[derive(Clone)]
pub struct PracticeSession {
    test_id: TestId,
    exam: ExamSession,
    raw: Value,
    sync: SelectionSync,
}

impl PracticeSession {
    #[must_use]
    pub fn test_id(&self) -> TestId {
        self.test_id
    }

    #[must_use]
    pub fn exam(&self) -> &ExamSession {
        &self.exam
    }

    /// The view model as last sent (or about to be sent) to the backend.
    #[must_use]
    pub fn view_model(&self) -> &Value {
        &self.raw
    }

    #[must_use]
    pub fn navigator(&self) -> &Navigator {
        self.exam.navigator()
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.exam.current_question()
    }

    #[must_use]
    pub fn current_selection(&self) -> Option<&Selection> {
        self.exam.current_selection()
    }

    /// Writes queued or in flight.
    #[must_use]
    pub fn pending_writes(&self) -> usize {
        self.sync.pending_len()
    }

    //
    // ─── SELECTION ────────────────────────────────────────────────────────────
    //

    /// Toggle an option on the question with backend id `question_id`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::State` for an unknown question or once time is up.
    pub fn toggle_option(
        &mut self,
        question_id: &QuestionId,
        option_index: usize,
    ) -> Result<ToggleOutcome, SessionError> {
        let outcome = self.exam.toggle_option(question_id, option_index)?;
        self.queue_write(outcome);
        Ok(outcome)
    }

    /// Toggle an option on the question under the cursor.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::State` for an empty session or once time is up.
    pub fn toggle_current(&mut self, option_index: usize) -> Result<ToggleOutcome, SessionError> {
        let outcome = self.exam.toggle_current(option_index)?;
        self.queue_write(outcome);
        Ok(outcome)
    }

    fn queue_write(&mut self, outcome: ToggleOutcome) {
        if !outcome.changed {
            return;
        }
        let (Some(question), Some(selection)) = (
            self.exam.question(outcome.position),
            self.exam.selection(outcome.position),
        ) else {
            return;
        };
        self.raw = apply_selection(&self.raw, outcome.position, question, selection);
        self.sync.submit(question.id.clone(), self.raw.clone());
    }

    //
    // ─── NAVIGATION ───────────────────────────────────────────────────────────
    //

    pub fn goto(&mut self, index: isize) -> usize {
        self.exam.goto(index)
    }

    pub fn first(&mut self) -> usize {
        self.exam.first()
    }

    pub fn prev(&mut self) -> usize {
        self.exam.prev()
    }

    pub fn next(&mut self) -> usize {
        self.exam.next()
    }

    pub fn last(&mut self) -> usize {
        self.exam.last()
    }

    pub fn reveal_answer(&mut self) {
        self.exam.reveal_answer();
    }

    //
    // ─── TIMER ────────────────────────────────────────────────────────────────
    //

    /// Advance the countdown by one second.
    pub fn tick(&mut self) -> CountdownTick {
        let was_up = self.exam.is_time_up();
        let tick = self.exam.tick();
        if !was_up && tick == CountdownTick::Expired {
            info!(test_id = %self.test_id, "time is up");
        }
        tick
    }

    pub fn pause(&mut self) -> bool {
        self.exam.pause()
    }

    pub fn resume(&mut self) {
        self.exam.resume();
    }

    #[must_use]
    pub fn is_time_up(&self) -> bool {
        self.exam.is_time_up()
    }

    /// Wait up to `timeout` for queued writes, then hand back the test id for review.
    pub async fn finish(self, timeout: Duration) -> TestId {
        if tokio::time::timeout(timeout, self.sync.wait_idle()).await.is_err() {
            warn!(
                test_id = %self.test_id,
                pending = self.sync.pending_len(),
                "finished with selections still unsent"
            );
        }
        info!(
            test_id = %self.test_id,
            answered = self.exam.answered_count(),
            total = self.exam.total(),
            "practice session finished"
        );
        self.test_id
    }
}
