//! Task submission for Traction.
//!
//! Hands extracted action items to an external task tracker. The `TaskSink`
//! trait abstracts the destination; `HttpTaskSink` targets a Notion-style
//! pages API, and `SubmissionQueue` walks pending items sequentially,
//! recording per-item success or failure without aborting the batch.

pub mod error;
pub mod http;
pub mod queue;
pub mod sink;
pub mod types;

pub use error::SinkError;
pub use http::HttpTaskSink;
pub use queue::{SubmissionQueue, SubmissionSummary};
pub use sink::TaskSink;
pub use types::TaskSubmission;
