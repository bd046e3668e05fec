//! Core types and value objects shared across the Traction crates.
//!
//! Defines stream chunks, transcript segments, action items, and their
//! supporting identifiers and enumerations.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// =============================================================================
// Enums
// =============================================================================

/// Submission lifecycle states for an extracted action item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    /// Extracted, not yet handed to the sink.
    Pending,
    /// Accepted by the sink.
    Sent,
    /// Rejected by the sink; `error_detail` carries the reason.
    Error,
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemStatus::Pending => write!(f, "pending"),
            ItemStatus::Sent => write!(f, "sent"),
            ItemStatus::Error => write!(f, "error"),
        }
    }
}

impl std::str::FromStr for ItemStatus {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ItemStatus::Pending),
            "sent" => Ok(ItemStatus::Sent),
            "error" => Ok(ItemStatus::Error),
            _ => Err(format!("Unknown item status: {}", s)),
        }
    }
}

// =============================================================================
// Newtype Wrappers - Identity
// =============================================================================

/// Unique identifier for an action item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(pub Uuid);

impl ItemId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

/// Unique identifier for a flushed transcript segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SegmentId(pub Uuid);

impl SegmentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SegmentId {
    fn default() -> Self {
        Self::new()
    }
}

/// Unique identifier for a streaming session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Newtype Wrappers - Temporal
// =============================================================================

/// Unix timestamp in milliseconds since epoch.
///
/// Compared by value. Two Timestamps with the same inner value are equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub fn now() -> Self {
        Self(Utc::now().timestamp_millis())
    }

    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt.timestamp_millis())
    }

    pub fn to_datetime(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.0).unwrap_or_default()
    }
}

// =============================================================================
// Stream input
// =============================================================================

/// One fragment of text delivered by the transcription source.
///
/// Metadata fields are optional on the wire; missing values resolve to
/// `false` / `"unknown"` when a segment is flushed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StreamChunk {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_input: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
}

impl StreamChunk {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_input: None,
            device: None,
        }
    }
}

// =============================================================================
// Domain structs
// =============================================================================

/// A flushed, immutable span of transcript text.
///
/// Created by the chunk aggregator; appended to an ordered, append-only
/// history. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    pub id: SegmentId,
    pub text: String,
    pub captured_at: Timestamp,
    pub is_local_speaker: bool,
    pub device_label: String,
}

/// An enriched, deduplicated, submission-tracked unit of extracted work.
///
/// Created once per unique (case-insensitive) text; the submission workflow
/// mutates only `status` and `error_detail` afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionItem {
    pub id: ItemId,
    pub text: String,
    /// Roster name found in the text, or empty when none matched.
    pub assignee: String,
    /// Concrete calendar date resolved at extraction time.
    pub due_date: Option<NaiveDate>,
    pub status: ItemStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_detail: Option<String>,
    pub extracted_at: Timestamp,
}

impl ActionItem {
    pub fn new(text: impl Into<String>, assignee: impl Into<String>, due_date: Option<NaiveDate>) -> Self {
        Self {
            id: ItemId::new(),
            text: text.into(),
            assignee: assignee.into(),
            due_date,
            status: ItemStatus::Pending,
            error_detail: None,
            extracted_at: Timestamp::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_item_status_display() {
        assert_eq!(ItemStatus::Pending.to_string(), "pending");
        assert_eq!(ItemStatus::Sent.to_string(), "sent");
        assert_eq!(ItemStatus::Error.to_string(), "error");
    }

    #[test]
    fn test_item_status_from_str() {
        assert_eq!(ItemStatus::from_str("pending").unwrap(), ItemStatus::Pending);
        assert_eq!(ItemStatus::from_str("sent").unwrap(), ItemStatus::Sent);
        assert_eq!(ItemStatus::from_str("error").unwrap(), ItemStatus::Error);
    }

    #[test]
    fn test_item_status_from_str_unknown() {
        let err = ItemStatus::from_str("retrying").unwrap_err();
        assert_eq!(err, "Unknown item status: retrying");
    }

    #[test]
    fn test_item_status_serde_round_trip() {
        for status in [ItemStatus::Pending, ItemStatus::Sent, ItemStatus::Error] {
            let json = serde_json::to_string(&status).unwrap();
            let back: ItemStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(back, status);
        }
    }

    #[test]
    fn test_item_status_serde_snake_case() {
        let json = serde_json::to_string(&ItemStatus::Pending).unwrap();
        assert_eq!(json, "\"pending\"");
    }

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(ItemId::new(), ItemId::new());
        assert_ne!(SegmentId::new(), SegmentId::new());
        assert_ne!(SessionId::new(), SessionId::new());
    }

    #[test]
    fn test_timestamp_now_is_recent() {
        let ts = Timestamp::now();
        let now = Utc::now().timestamp_millis();
        assert!((now - ts.0).abs() < 5_000);
    }

    #[test]
    fn test_timestamp_datetime_round_trip() {
        let dt = Utc::now();
        let ts = Timestamp::from_datetime(dt);
        assert_eq!(ts.to_datetime().timestamp_millis(), dt.timestamp_millis());
    }

    #[test]
    fn test_timestamp_ordering() {
        assert!(Timestamp(1_000) < Timestamp(2_000));
        assert_eq!(Timestamp(1_000), Timestamp(1_000));
    }

    #[test]
    fn test_stream_chunk_defaults() {
        let chunk = StreamChunk::new("hello");
        assert_eq!(chunk.text, "hello");
        assert!(chunk.is_input.is_none());
        assert!(chunk.device.is_none());
    }

    #[test]
    fn test_stream_chunk_deserialize_without_metadata() {
        let chunk: StreamChunk = serde_json::from_str(r#"{"text": "hi"}"#).unwrap();
        assert_eq!(chunk.text, "hi");
        assert!(chunk.is_input.is_none());
        assert!(chunk.device.is_none());
    }

    #[test]
    fn test_action_item_new_defaults() {
        let item = ActionItem::new("Prepare the report.", "John", None);
        assert_eq!(item.text, "Prepare the report.");
        assert_eq!(item.assignee, "John");
        assert!(item.due_date.is_none());
        assert_eq!(item.status, ItemStatus::Pending);
        assert!(item.error_detail.is_none());
    }

    #[test]
    fn test_action_item_serde_round_trip() {
        let item = ActionItem::new(
            "Review by Friday.",
            "",
            NaiveDate::from_ymd_opt(2026, 8, 7),
        );
        let json = serde_json::to_string(&item).unwrap();
        let back: ActionItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn test_action_item_serde_omits_empty_error_detail() {
        let item = ActionItem::new("Do the thing.", "", None);
        let json = serde_json::to_string(&item).unwrap();
        assert!(!json.contains("error_detail"));
    }
}
