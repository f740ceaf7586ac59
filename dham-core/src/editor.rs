//! Admin event editor model.
//!
//! Holds the editable fields of one event while the editor drawer is open.
//! The long description lives behind [`RichTextField`]; everything else is
//! a single-line text field.

use crate::record::{EventDraft, ListRecord, RecordId};
use crate::richtext::RichTextField;
use crate::validation::ValidationErrors;

/// Editor fields in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorField {
    Title,
    Summary,
    Date,
    Location,
    Media,
    Detail,
}

impl EditorField {
    pub fn all() -> &'static [EditorField] {
        &[
            EditorField::Title,
            EditorField::Summary,
            EditorField::Date,
            EditorField::Location,
            EditorField::Media,
            EditorField::Detail,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            EditorField::Title => "Title",
            EditorField::Summary => "Short description",
            EditorField::Date => "Date (YYYY-MM-DD)",
            EditorField::Location => "Location",
            EditorField::Media => "Image URLs (comma separated)",
            EditorField::Detail => "Description",
        }
    }

    /// Key used by validation messages for this field.
    pub fn error_key(&self) -> &'static str {
        match self {
            EditorField::Title => "title",
            EditorField::Summary => "summary",
            EditorField::Date => "date",
            EditorField::Location => "location",
            EditorField::Media => "media",
            EditorField::Detail => "detail",
        }
    }

    fn index(&self) -> usize {
        Self::all().iter().position(|f| f == self).unwrap_or(0)
    }

    pub fn next(&self) -> EditorField {
        let all = Self::all();
        all[(self.index() + 1) % all.len()]
    }

    pub fn previous(&self) -> EditorField {
        let all = Self::all();
        let idx = self.index();
        all[if idx == 0 { all.len() - 1 } else { idx - 1 }]
    }
}

pub struct EventEditor<F> {
    id: Option<RecordId>,
    pub title: String,
    pub summary: String,
    pub date: String,
    pub location: String,
    pub media: String,
    pub detail: F,
    pub focus: EditorField,
    pub errors: ValidationErrors,
    pub submitting: bool,
}

impl<F: RichTextField> EventEditor<F> {
    /// Empty editor for a new event.
    pub fn create(detail: F) -> Self {
        Self {
            id: None,
            title: String::new(),
            summary: String::new(),
            date: String::new(),
            location: String::new(),
            media: String::new(),
            detail,
            focus: EditorField::Title,
            errors: ValidationErrors::new(),
            submitting: false,
        }
    }

    /// Editor pre-filled from an existing event.
    pub fn edit(record: &ListRecord, mut detail: F) -> Self {
        detail.set_value(&record.detail);
        Self {
            id: Some(record.id.clone()),
            title: record.title.clone(),
            summary: record.summary.clone(),
            date: record.date.clone(),
            location: record.location.clone().unwrap_or_default(),
            media: record.media.join(", "),
            detail,
            focus: EditorField::Title,
            errors: ValidationErrors::new(),
            submitting: false,
        }
    }

    pub fn is_update(&self) -> bool {
        self.id.is_some()
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_previous(&mut self) {
        self.focus = self.focus.previous();
    }

    /// Single-line buffer for the focused field. `None` for the description.
    pub fn focused_line_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            EditorField::Title => Some(&mut self.title),
            EditorField::Summary => Some(&mut self.summary),
            EditorField::Date => Some(&mut self.date),
            EditorField::Location => Some(&mut self.location),
            EditorField::Media => Some(&mut self.media),
            EditorField::Detail => None,
        }
    }

    pub fn line(&self, field: EditorField) -> String {
        match field {
            EditorField::Title => self.title.clone(),
            EditorField::Summary => self.summary.clone(),
            EditorField::Date => self.date.clone(),
            EditorField::Location => self.location.clone(),
            EditorField::Media => self.media.clone(),
            EditorField::Detail => self.detail.value(),
        }
    }

    pub fn error_for(&self, field: EditorField) -> Option<&str> {
        self.errors.get(field.error_key())
    }

    pub fn to_draft(&self) -> EventDraft {
        EventDraft {
            id: self.id.clone(),
            title: self.title.trim().to_string(),
            date: self.date.trim().to_string(),
            summary: self.summary.trim().to_string(),
            detail: self.detail.value(),
            location: self.location.trim().to_string(),
            media: self
                .media
                .split(',')
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}
