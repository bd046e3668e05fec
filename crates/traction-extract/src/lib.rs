//! Extraction core for Traction.
//!
//! Scans transcript text for action-item candidates with heuristic regex
//! patterns, enriches each candidate with an assignee and due date, and
//! filters repeats through a session-scoped dedup ledger.

pub mod infer;
pub mod ledger;
pub mod patterns;
pub mod pipeline;

pub use infer::{infer_assignee, infer_due_date, InferredAttributes};
pub use ledger::DedupLedger;
pub use patterns::{PatternFamily, PatternHit, PatternSet};
pub use pipeline::Extractor;
