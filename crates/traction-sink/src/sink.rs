//! The task sink abstraction.

use async_trait::async_trait;

use crate::error::SinkError;
use crate::types::TaskSubmission;

/// Destination for extracted action items.
///
/// Implementations submit one task at a time; batching and status tracking
/// live in the submission queue.
#[async_trait]
pub trait TaskSink: Send + Sync {
    async fn submit(&self, task: &TaskSubmission) -> Result<(), SinkError>;
}
