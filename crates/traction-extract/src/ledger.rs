//! Session-scoped dedup ledger for emitted candidate texts.

use std::collections::HashSet;

/// Records every emitted action-item text, lower-cased, for the life of a
/// session.
///
/// Keyed by exact text only: near-duplicate phrasings (different punctuation,
/// extra words) are distinct entries and will both be emitted. Entries are
/// never evicted; the ledger is cleared only together with the transcript.
#[derive(Debug, Default)]
pub struct DedupLedger {
    seen: HashSet<String>,
}

impl DedupLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether this text has been emitted before, case-insensitively.
    pub fn seen(&self, text: &str) -> bool {
        self.seen.contains(&text.to_lowercase())
    }

    /// Record a text as emitted.
    pub fn record(&mut self, text: &str) {
        self.seen.insert(text.to_lowercase());
    }

    /// Forget everything. Invoked only when the whole session is cleared.
    pub fn clear(&mut self) {
        self.seen.clear();
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
