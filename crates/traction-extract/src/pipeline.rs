//! Extraction pipeline: scan, enrich, dedup, emit.

use chrono::NaiveDate;
use tracing::debug;

use traction_core::types::ActionItem;

use crate::infer::infer;
use crate::ledger::DedupLedger;
use crate::patterns::PatternSet;

/// Runs one extraction pass over a transcript and emits the action items
/// not yet recorded in the ledger.
///
/// A pass is synchronous and reentrant: invoking it repeatedly against a
/// growing transcript has no effect beyond ledger and item emission, so the
/// incremental scheduler may call it as often as it likes.
pub struct Extractor {
    patterns: PatternSet,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor {
    pub fn new() -> Self {
        Self {
            patterns: PatternSet::new(),
        }
    }

    /// Scan the whole transcript and emit items for candidates the ledger
    /// has not seen. Each emitted text is recorded before the next candidate
    /// is considered, so duplicates within one pass also collapse.
    pub fn extract(
        &self,
        transcript: &str,
        today: NaiveDate,
        ledger: &mut DedupLedger,
    ) -> Vec<ActionItem> {
        let mut emitted = Vec::new();

        for candidate in self.patterns.scan(transcript) {
            if ledger.seen(&candidate) {
                continue;
            }
            let attrs = infer(&candidate, today);
            ledger.record(&candidate);
            debug!(text = %candidate, assignee = %attrs.assignee, "Action item extracted");
            emitted.push(ActionItem::new(candidate, attrs.assignee, attrs.due_date));
        }

        emitted
    }
}
