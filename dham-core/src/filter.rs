//! Search and date-range filtering over an in-memory record set.
//!
//! Everything here is a pure function of its inputs. Filtering is a stable
//! filter, never a sort: survivors keep the order of the full set.

use crate::record::Listable;
use serde::{Deserialize, Serialize};

/// Suggestions shown under the search box.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;

// ============================================================================
// DATE RANGE
// ============================================================================

/// Inclusive date bounds in `YYYY-MM-DD` form, compared lexically.
///
/// Each bound is applied on its own. A start after the end is kept as given,
/// so both comparisons run and the result may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl DateRange {
    pub fn new(start: Option<&str>, end: Option<&str>) -> Self {
        Self {
            start: non_empty(start),
            end: non_empty(end),
        }
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// True when both bounds are set and the start is after the end.
    pub fn is_inverted(&self) -> bool {
        matches!((&self.start, &self.end), (Some(s), Some(e)) if s > e)
    }

    pub fn contains(&self, date: &str) -> bool {
        if let Some(start) = &self.start {
            if date < start.as_str() {
                return false;
            }
        }
        if let Some(end) = &self.end {
            if date > end.as_str() {
                return false;
            }
        }
        true
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

// ============================================================================
// CRITERIA
// ============================================================================

/// Search term plus date bounds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub term: String,
    pub range: DateRange,
}

impl FilterCriteria {
    pub fn new(term: impl Into<String>, range: DateRange) -> Self {
        Self {
            term: term.into(),
            range,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.term.is_empty() && self.range.is_unbounded()
    }

    pub fn matches<R: Listable>(&self, record: &R) -> bool {
        record.matches_term(&self.term.to_lowercase()) && self.range.contains(record.date())
    }
}

/// Records whose title contains `term` (case-insensitive) and whose date lies
/// within the inclusive bounds.
pub fn filter_records<R: Listable + Clone>(
    full: &[R],
    term: &str,
    start: Option<&str>,
    end: Option<&str>,
) -> Vec<R> {
    apply(full, &FilterCriteria::new(term, DateRange::new(start, end)))
}

/// Same as [`filter_records`] with prepared criteria.
pub fn apply<R: Listable + Clone>(full: &[R], criteria: &FilterCriteria) -> Vec<R> {
    let needle = criteria.term.to_lowercase();
    full.iter()
        .filter(|record| record.matches_term(&needle) && criteria.range.contains(record.date()))
        .cloned()
        .collect()
}

// ============================================================================
// SUGGESTIONS
// ============================================================================

/// Up to `limit` records matching `term`, in full-set order.
///
/// Date bounds are ignored. An empty term yields nothing: it turns the
/// dropdown off rather than listing everything.
pub fn suggest<R: Listable + Clone>(full: &[R], term: &str, limit: usize) -> Vec<R> {
    if term.is_empty() {
        return Vec::new();
    }
    let needle = term.to_lowercase();
    full.iter()
        .filter(|record| record.matches_term(&needle))
        .take(limit)
        .cloned()
        .collect()
}

/// Dropdown contents and visibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionState<R> {
    pub items: Vec<R>,
    pub visible: bool,
}

impl<R> Default for SuggestionState<R> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            visible: false,
        }
    }
}

impl<R: Listable + Clone> SuggestionState<R> {
    pub fn refresh(&mut self, full: &[R], term: &str, limit: usize) {
        self.items = suggest(full, term, limit);
        self.visible = !term.is_empty() && !self.items.is_empty();
    }

    /// Title of the suggestion at `index`, hiding the dropdown.
    ///
    /// The title is returned verbatim; two records with the same title are
    /// indistinguishable here.
    pub fn accept(&mut self, index: usize) -> Option<String> {
        let title = self.items.get(index).map(|r| r.title().to_string())?;
        self.visible = false;
        Some(title)
    }

    pub fn dismiss(&mut self) {
        self.visible = false;
    }
}
