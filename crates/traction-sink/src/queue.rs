//! Sequential submission of pending action items.

use tracing::{info, warn};

use traction_core::types::{ActionItem, ItemStatus};

use crate::sink::TaskSink;
use crate::types::TaskSubmission;

/// Per-batch outcome counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubmissionSummary {
    pub sent: usize,
    pub failed: usize,
    pub skipped: usize,
}

/// Walks a batch of items and submits each pending one in order.
///
/// Submission is strictly sequential, and a rejected item never aborts the
/// batch: its status and error detail are recorded and the walk moves on.
/// Items already sent, or already marked failed, are skipped.
pub struct SubmissionQueue<S: TaskSink> {
    sink: S,
    source_label: String,
}

impl<S: TaskSink> SubmissionQueue<S> {
    pub fn new(sink: S, source_label: impl Into<String>) -> Self {
        Self {
            sink,
            source_label: source_label.into(),
        }
    }

    /// Submit every pending item, mutating statuses in place.
    pub async fn submit_pending(&self, items: &mut [ActionItem]) -> SubmissionSummary {
        let mut summary = SubmissionSummary::default();

        for item in items.iter_mut() {
            if item.status != ItemStatus::Pending {
                summary.skipped += 1;
                continue;
            }
            let task = TaskSubmission::from_item(item, &self.source_label);
            match self.sink.submit(&task).await {
                Ok(()) => {
                    item.status = ItemStatus::Sent;
                    item.error_detail = None;
                    summary.sent += 1;
                    info!(title = %item.text, "Task submitted");
                }
                Err(err) => {
                    item.status = ItemStatus::Error;
                    item.error_detail = Some(err.to_string());
                    summary.failed += 1;
                    warn!(title = %item.text, %err, "Task submission failed");
                }
            }
        }

        info!(
            sent = summary.sent,
            failed = summary.failed,
            skipped = summary.skipped,
            "Submission batch complete"
        );
        summary
    }
}
