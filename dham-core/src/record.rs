//! Listing record types.
//!
//! `ListRecord` is the shape shared by public and admin event listings.
//! `Activity` is the social-activity card. Both implement [`Listable`], which
//! is the only thing the filter, pager and controller know about a record.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// IDENTITY
// ============================================================================

/// Opaque record identifier assigned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

// ============================================================================
// LISTABLE
// ============================================================================

/// A record that can be searched, date-filtered and paged.
pub trait Listable {
    type Id: PartialEq + Clone + fmt::Debug;

    fn id(&self) -> &Self::Id;

    fn title(&self) -> &str;

    /// Calendar date in `YYYY-MM-DD` form.
    fn date(&self) -> &str;

    /// Search predicate. `needle_lower` is already lowercased; an empty needle
    /// matches everything.
    fn matches_term(&self, needle_lower: &str) -> bool {
        self.title().to_lowercase().contains(needle_lower)
    }
}

// ============================================================================
// EVENT RECORD
// ============================================================================

/// An event as listed on the public and admin event pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListRecord {
    pub id: RecordId,
    pub title: String,
    pub date: String,
    pub summary: String,
    /// Long-form description. May contain markup; display only.
    pub detail: String,
    pub location: Option<String>,
    pub media: Vec<String>,
}

impl ListRecord {
    /// First media URI, used as the card image.
    pub fn cover(&self) -> Option<&str> {
        self.media.first().map(String::as_str)
    }
}

impl Listable for ListRecord {
    type Id = RecordId;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn date(&self) -> &str {
        &self.date
    }
}

/// Event fields as entered in the admin editor.
///
/// `id` is `None` for a new event; the backend assigns one on create.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDraft {
    pub id: Option<RecordId>,
    pub title: String,
    pub date: String,
    pub summary: String,
    pub detail: String,
    pub location: String,
    pub media: Vec<String>,
}

impl EventDraft {
    pub fn is_update(&self) -> bool {
        self.id.is_some()
    }
}

impl From<&ListRecord> for EventDraft {
    fn from(record: &ListRecord) -> Self {
        Self {
            id: Some(record.id.clone()),
            title: record.title.clone(),
            date: record.date.clone(),
            summary: record.summary.clone(),
            detail: record.detail.clone(),
            location: record.location.clone().unwrap_or_default(),
            media: record.media.clone(),
        }
    }
}

// ============================================================================
// SOCIAL ACTIVITY
// ============================================================================

/// A social activity card. Matches the search term against title or category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: u32,
    pub title: String,
    pub summary: String,
    #[serde(default)]
    pub media: Option<String>,
    pub date: String,
    pub participants: u32,
    pub category: String,
}

impl Listable for Activity {
    type Id = u32;

    fn id(&self) -> &u32 {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn date(&self) -> &str {
        &self.date
    }

    fn matches_term(&self, needle_lower: &str) -> bool {
        self.title.to_lowercase().contains(needle_lower)
            || self.category.to_lowercase().contains(needle_lower)
    }
}

// ============================================================================
// DATES
// ============================================================================

/// Normalize a backend date into `YYYY-MM-DD`.
///
/// Accepts a plain calendar date or an RFC 3339 timestamp; timestamps are
/// reduced to their UTC calendar date.
pub fn normalize_date(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.format("%Y-%m-%d").to_string());
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|ts| ts.naive_utc().date().format("%Y-%m-%d").to_string())
}
