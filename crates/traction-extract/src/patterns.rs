//! Regex-based candidate pattern matching.
//!
//! Provides the heuristic pattern families that pull raw action-item
//! candidates out of transcript text.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// The heuristic family a pattern belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternFamily {
    /// Text following an explicit cue word ("action item", "todo", ...).
    ExplicitMarker,
    /// A whole sentence containing an obligation modal ("will", "should", ...).
    ModalObligation,
    /// A whole sentence containing a deadline phrase ("by friday", "due tomorrow", ...).
    DeadlineBearing,
}

/// A single compiled pattern linked to its family.
pub struct CandidatePattern {
    pub regex: Regex,
    pub family: PatternFamily,
}

/// A raw match before attribute enrichment.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternHit {
    pub family: PatternFamily,
    pub text: String,
}

/// Collection of all candidate patterns, compiled once and reused.
///
/// The three families are applied independently and unioned: hits come out
/// in pattern-list order, then left to right within each pattern. Overlaps
/// and duplicates across families are yielded as-is; dedup happens later.
pub struct PatternSet {
    patterns: Vec<CandidatePattern>,
}

impl Default for PatternSet {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternSet {
    /// Create a new PatternSet with all compiled patterns.
    pub fn new() -> Self {
        let families: Vec<(&str, PatternFamily)> = vec![
            (
                r"(?i)(?:action item|task|todo|to do|follow up|followup)(?:\s*:|\s+for\s+)?\s*([^.!?]+[.!?])",
                PatternFamily::ExplicitMarker,
            ),
            (
                r"(?i)([^.!?]*(?:will|should|needs to|has to|going to)\s+[^.!?]*[.!?])",
                PatternFamily::ModalObligation,
            ),
            (
                r"(?i)([^.!?]*\b(?:by|before|due)\s+(?:monday|tuesday|wednesday|thursday|friday|saturday|sunday|tomorrow|next week|end of day|eod)[^.!?]*[.!?])",
                PatternFamily::DeadlineBearing,
            ),
        ];

        let patterns = families
            .into_iter()
            .map(|(pat, family)| CandidatePattern {
                regex: Regex::new(pat).expect("Invalid candidate regex"),
                family,
            })
            .collect();

        Self { patterns }
    }

    /// Find all hits in the given text, in pattern-list then offset order.
    pub fn hits(&self, text: &str) -> Vec<PatternHit> {
        let mut hits = Vec::new();

        for pattern in &self.patterns {
            for caps in pattern.regex.captures_iter(text) {
                let captured = caps.get(1).map_or("", |m| m.as_str()).trim();
                let candidate = if captured.is_empty() {
                    caps.get(0).map_or("", |m| m.as_str()).trim()
                } else {
                    captured
                };
                if candidate.is_empty() {
                    continue;
                }
                hits.push(PatternHit {
                    family: pattern.family,
                    text: candidate.to_string(),
                });
            }
        }

        hits
    }

    /// Candidate texts only, in the same order as [`hits`](Self::hits).
    pub fn scan(&self, text: &str) -> Vec<String> {
        self.hits(text).into_iter().map(|h| h.text).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ps() -> PatternSet {
        PatternSet::new()
    }

    // =====================================================================
    // Explicit marker tests
    // =====================================================================

    #[test]
    fn test_action_item_colon() {
        let hits = ps().hits("Action item: prepare the slides.");
        let h = hits
            .iter()
            .find(|h| h.family == PatternFamily::ExplicitMarker)
            .unwrap();
        assert_eq!(h.text, "prepare the slides.");
    }

    #[test]
    fn test_task_for() {
        let hits = ps().hits("There is a task for reviewing the contract.");
        let h = hits
            .iter()
            .find(|h| h.family == PatternFamily::ExplicitMarker)
            .unwrap();
        assert_eq!(h.text, "reviewing the contract.");
    }

    #[test]
    fn test_todo_marker() {
        let hits = ps().hits("TODO update the changelog.");
        let h = hits
            .iter()
            .find(|h| h.family == PatternFamily::ExplicitMarker)
            .unwrap();
        assert_eq!(h.text, "update the changelog.");
    }

    #[test]
    fn test_to_do_marker() {
        let hits = ps().hits("Still to do: archive old tickets.");
        assert!(hits
            .iter()
            .any(|h| h.family == PatternFamily::ExplicitMarker
                && h.text == "archive old tickets."));
    }

    #[test]
    fn test_follow_up_marker() {
        let hits = ps().hits("Follow up with the vendor about pricing.");
        let h = hits
            .iter()
            .find(|h| h.family == PatternFamily::ExplicitMarker)
            .unwrap();
        assert_eq!(h.text, "with the vendor about pricing.");
    }

    #[test]
    fn test_marker_case_insensitive() {
        let hits = ps().hits("ACTION ITEM: ship the build.");
        assert!(hits
            .iter()
            .any(|h| h.family == PatternFamily::ExplicitMarker && h.text == "ship the build."));
    }

    #[test]
    fn test_marker_requires_terminator() {
        let hits = ps().hits("action item: ship the build");
        assert!(hits
            .iter()
            .all(|h| h.family != PatternFamily::ExplicitMarker));
    }

    // =====================================================================
    // Modal obligation tests
    // =====================================================================

    #[test]
    fn test_will_sentence() {
        let hits = ps().hits("Sarah will send the summary.");
        let h = hits
            .iter()
            .find(|h| h.family == PatternFamily::ModalObligation)
            .unwrap();
        assert_eq!(h.text, "Sarah will send the summary.");
    }

    #[test]
    fn test_modal_sentence_starts_after_previous_terminator() {
        let hits = ps().hits("That was fine. Sarah will send the summary.");
        let h = hits
            .iter()
            .find(|h| h.family == PatternFamily::ModalObligation)
            .unwrap();
        assert_eq!(h.text, "Sarah will send the summary.");
    }

    #[test]
    fn test_needs_to_sentence() {
        let hits = ps().hits("The build needs to pass before release!");
        let h = hits
            .iter()
            .find(|h| h.family == PatternFamily::ModalObligation)
            .unwrap();
        assert_eq!(h.text, "The build needs to pass before release!");
    }

    #[test]
    fn test_going_to_sentence() {
        let hits = ps().hits("We are going to migrate the database?");
        assert!(hits
            .iter()
            .any(|h| h.family == PatternFamily::ModalObligation
                && h.text == "We are going to migrate the database?"));
    }

    #[test]
    fn test_multiple_modal_sentences_in_order() {
        let hits = ps().hits("Mike will draft the memo. Emily should review it.");
        let modal: Vec<&PatternHit> = hits
            .iter()
            .filter(|h| h.family == PatternFamily::ModalObligation)
            .collect();
        assert_eq!(modal.len(), 2);
        assert_eq!(modal[0].text, "Mike will draft the memo.");
        assert_eq!(modal[1].text, "Emily should review it.");
    }

    // =====================================================================
    // Deadline-bearing tests
    // =====================================================================

    #[test]
    fn test_by_weekday() {
        let hits = ps().hits("Submit the expense report by Friday.");
        let h = hits
            .iter()
            .find(|h| h.family == PatternFamily::DeadlineBearing)
            .unwrap();
        assert_eq!(h.text, "Submit the expense report by Friday.");
    }

    #[test]
    fn test_due_tomorrow() {
        let hits = ps().hits("The invoice is due tomorrow.");
        assert!(hits
            .iter()
            .any(|h| h.family == PatternFamily::DeadlineBearing
                && h.text == "The invoice is due tomorrow."));
    }

    #[test]
    fn test_before_eod() {
        let hits = ps().hits("Send the numbers before eod.");
        assert!(hits
            .iter()
            .any(|h| h.family == PatternFamily::DeadlineBearing
                && h.text == "Send the numbers before eod."));
    }

    #[test]
    fn test_by_next_week() {
        let hits = ps().hits("Finish the audit by next week.");
        assert!(hits
            .iter()
            .any(|h| h.family == PatternFamily::DeadlineBearing));
    }

    #[test]
    fn test_deadline_word_requires_deadline_term() {
        // "by" followed by something outside the vocabulary is not a deadline
        let hits = ps().hits("The song is by an unknown artist.");
        assert!(hits
            .iter()
            .all(|h| h.family != PatternFamily::DeadlineBearing));
    }

    // =====================================================================
    // Cross-family behavior
    // =====================================================================

    #[test]
    fn test_families_overlap_and_union() {
        // Contains a modal and a deadline term, so two families hit the
        // same sentence and both candidates are yielded.
        let hits = ps().hits("John will send the report by Friday.");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].family, PatternFamily::ModalObligation);
        assert_eq!(hits[1].family, PatternFamily::DeadlineBearing);
        assert_eq!(hits[0].text, hits[1].text);
    }

    #[test]
    fn test_scan_preserves_hit_order() {
        let set = ps();
        let text = "Action item: call the client. Alex should log the outcome.";
        let hits = set.hits(text);
        let scanned = set.scan(text);
        assert_eq!(
            scanned,
            hits.iter().map(|h| h.text.clone()).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_no_candidates_in_plain_text() {
        let hits = ps().hits("It rained all afternoon. The coffee was good.");
        assert!(hits.is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert!(ps().scan("").is_empty());
    }
}
