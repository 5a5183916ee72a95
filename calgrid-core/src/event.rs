//! Event types shared by the state machines and the store client.
//!
//! The remote store speaks JSON objects of the shape
//! `{id, title, description, selectedDate}` where `selectedDate` is a
//! zero-padded `YYYY-MM-DD` string. `chrono::NaiveDate` serializes to
//! exactly that form, so dates are compared as calendar days and never as
//! timestamps.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

/// A single-day schedule entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// Assigned by the remote store; `None` until the entry is persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// The calendar day the entry is anchored to.
    #[serde(rename = "selectedDate")]
    pub date: NaiveDate,
}

/// Payload for create and update calls, before the store has assigned an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    #[serde(rename = "selectedDate")]
    pub date: NaiveDate,
}

impl EventDraft {
    /// Reject drafts where both text fields are blank.
    ///
    /// Whitespace-only input does not count as content.
    pub fn validate(&self) -> StoreResult<()> {
        if self.title.trim().is_empty() && self.description.trim().is_empty() {
            return Err(StoreError::EmptyEvent);
        }
        Ok(())
    }
}
