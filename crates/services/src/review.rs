use std::sync::Arc;

use exam_core::model::TestId;
use exam_core::{ReviewReport, ReviewScreen, aggregate, map_review_record};
use tracing::{info, warn};

use crate::backend::ExamBackend;
use crate::context::SessionContext;

/// Builds the post-attempt review from the scored record and the question bank.
#[derive(Clone)]
pub struct ReviewService {
    backend: Arc<dyn ExamBackend>,
    context: SessionContext,
}

impl ReviewService {
    #[must_use]
    pub fn new(backend: Arc<dyn ExamBackend>, context: SessionContext) -> Self {
        Self { backend, context }
    }

    /// Fetch both payloads concurrently and aggregate them.
    ///
    /// Never fails: a fetch error yields an empty, `Pending` report.
    pub async fn load(&self, test_id: TestId) -> ReviewScreen {
        let (record, bank) = {
            let _loading = self.context.loading.begin();
            tokio::join!(
                self.backend.fetch_review_record(test_id),
                self.backend.fetch_test_view(test_id)
            )
        };

        let report = match (record, bank) {
            (Ok(record), Ok(bank)) => aggregate(&map_review_record(&record, &bank)),
            (Err(err), _) | (_, Err(err)) => {
                warn!(%test_id, error = %err, "could not load review; showing an empty report");
                ReviewReport::empty()
            }
        };

        for review in report.inconsistent() {
            warn!(
                %test_id,
                question = %review.question.id,
                status = ?review.status,
                "backend mark disagrees with the answer key"
            );
        }
        info!(
            %test_id,
            correct = report.correct,
            incorrect = report.incorrect,
            unanswered = report.unanswered,
            outcome = ?report.outcome,
            "review ready"
        );

        ReviewScreen::default().finish(report)
    }
}
