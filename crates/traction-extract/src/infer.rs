//! Assignee and due-date inference for candidate phrases.
//!
//! Works from a fixed assignee roster and a small controlled date
//! vocabulary; everything outside those is left unset.

use chrono::{Datelike, Days, NaiveDate};
use regex::Regex;
use std::sync::OnceLock;

/// Attributes inferred from a single candidate phrase.
#[derive(Debug, Clone, PartialEq)]
pub struct InferredAttributes {
    /// Roster name as it appeared in the text, or empty when none matched.
    pub assignee: String,
    pub due_date: Option<NaiveDate>,
}

fn assignee_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\b(john|sarah|mike|emily|alex|david)\b")
            .expect("Invalid assignee regex")
    })
}

fn date_term_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\b(tomorrow|monday|tuesday|wednesday|thursday|friday|next week)\b")
            .expect("Invalid date term regex")
    })
}

/// Weekday index, Sunday = 0 through Saturday = 6.
fn weekday_index(term: &str) -> Option<i64> {
    match term {
        "sunday" => Some(0),
        "monday" => Some(1),
        "tuesday" => Some(2),
        "wednesday" => Some(3),
        "thursday" => Some(4),
        "friday" => Some(5),
        "saturday" => Some(6),
        _ => None,
    }
}

/// First roster name found in the text, preserving its casing.
///
/// Returns the empty string when no roster name occurs. Only one assignee
/// is ever extracted; later names in the same phrase are ignored.
pub fn infer_assignee(text: &str) -> String {
    assignee_regex()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map_or(String::new(), |m| m.as_str().to_string())
}

/// Resolve the first date term in the text against `today`.
///
/// "tomorrow" is one day out, "next week" seven; a weekday name resolves
/// to its next occurrence, where the named day falling on `today` resolves
/// to `today` itself rather than a week out.
pub fn infer_due_date(text: &str, today: NaiveDate) -> Option<NaiveDate> {
    let caps = date_term_regex().captures(text)?;
    let term = caps.get(1).map_or("", |m| m.as_str()).to_lowercase();

    match term.as_str() {
        "tomorrow" => today.checked_add_days(Days::new(1)),
        "next week" => today.checked_add_days(Days::new(7)),
        day => {
            let target = weekday_index(day)?;
            let current = today.weekday().num_days_from_sunday() as i64;
            let offset = (target - current + 7) % 7;
            today.checked_add_days(Days::new(offset as u64))
        }
    }
}

/// Infer both attributes for a candidate phrase.
pub fn infer(text: &str, today: NaiveDate) -> InferredAttributes {
    InferredAttributes {
        assignee: infer_assignee(text),
        due_date: infer_due_date(text, today),
    }
}
