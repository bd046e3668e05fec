//! Submission payload types.

use chrono::NaiveDate;

use traction_core::types::ActionItem;

/// Destination-neutral view of one action item ready for submission.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskSubmission {
    /// The extracted action-item text, used as the task title.
    pub title: String,
    /// Roster name, or empty when the item carries no assignee.
    pub assignee: String,
    pub due_date: Option<NaiveDate>,
    /// Human-readable label of the meeting the item came from.
    pub source_label: String,
}

impl TaskSubmission {
    pub fn from_item(item: &ActionItem, source_label: &str) -> Self {
        Self {
            title: item.text.clone(),
            assignee: item.assignee.clone(),
            due_date: item.due_date,
            source_label: source_label.to_string(),
        }
    }
}
