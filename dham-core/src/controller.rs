//! List-filter-paginate controller.
//!
//! One generic controller backs every listing screen. It owns the full set
//! fetched from the backend and derives the filtered set, the suggestion
//! dropdown and the visible page from it.
//!
//! Invariants:
//! - any change to the search term or a date bound resets the page to 1;
//! - the full set is replaced wholesale by a fetch, or spliced by
//!   [`ListController::remove_local`] / [`ListController::upsert_local`];
//! - a fetch completion carrying a superseded ticket is discarded.

use crate::filter::{self, DateRange, FilterCriteria, SuggestionState, DEFAULT_SUGGESTION_LIMIT};
use crate::pager::{self, PageSize};
use crate::record::Listable;

// ============================================================================
// FETCH SEQUENCING
// ============================================================================

/// Sequence number handed out when a fetch starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FetchTicket(u64);

impl FetchTicket {
    pub fn sequence(self) -> u64 {
        self.0
    }
}

/// What happened to a fetch result handed to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The full set was replaced.
    Applied { count: usize },
    /// A newer fetch was started after this one; the result was dropped.
    Stale,
}

// ============================================================================
// CONTROLLER
// ============================================================================

#[derive(Debug, Clone)]
pub struct ListController<R> {
    full: Vec<R>,
    filtered: Vec<R>,
    criteria: FilterCriteria,
    page_size: PageSize,
    page_index: usize,
    suggestion_limit: usize,
    suggestions: SuggestionState<R>,
    latest_ticket: u64,
    in_flight: Option<FetchTicket>,
}

impl<R: Listable + Clone> ListController<R> {
    pub fn new(page_size: PageSize) -> Self {
        Self {
            full: Vec::new(),
            filtered: Vec::new(),
            criteria: FilterCriteria::default(),
            page_size,
            page_index: 1,
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
            suggestions: SuggestionState::default(),
            latest_ticket: 0,
            in_flight: None,
        }
    }

    pub fn with_suggestion_limit(mut self, limit: usize) -> Self {
        self.suggestion_limit = limit;
        self
    }

    /// Controller pre-loaded with a static set (no fetch involved).
    pub fn with_records(page_size: PageSize, records: Vec<R>) -> Self {
        let mut controller = Self::new(page_size);
        controller.replace_full_set(records);
        controller
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn full_set(&self) -> &[R] {
        &self.full
    }

    pub fn filtered(&self) -> &[R] {
        &self.filtered
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn search_term(&self) -> &str {
        &self.criteria.term
    }

    pub fn range(&self) -> &DateRange {
        &self.criteria.range
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn total_pages(&self) -> usize {
        pager::total_pages(self.filtered.len(), self.page_size)
    }

    pub fn page_slice(&self) -> &[R] {
        pager::paginate(&self.filtered, self.page_size, self.page_index)
    }

    pub fn suggestions(&self) -> &SuggestionState<R> {
        &self.suggestions
    }

    pub fn find(&self, id: &R::Id) -> Option<&R> {
        self.full.iter().find(|r| r.id() == id)
    }

    // ------------------------------------------------------------------------
    // Filter inputs
    // ------------------------------------------------------------------------

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.criteria.term = term.into();
        self.refilter();
    }

    pub fn set_start_date(&mut self, start: Option<&str>) {
        self.criteria.range = DateRange::new(start, self.criteria.range.end.as_deref());
        self.refilter();
    }

    pub fn set_end_date(&mut self, end: Option<&str>) {
        self.criteria.range = DateRange::new(self.criteria.range.start.as_deref(), end);
        self.refilter();
    }

    pub fn clear_filters(&mut self) {
        self.criteria = FilterCriteria::default();
        self.refilter();
    }

    /// Replace the search term with the title of suggestion `index`.
    pub fn accept_suggestion(&mut self, index: usize) -> bool {
        match self.suggestions.accept(index) {
            Some(title) => {
                self.criteria.term = title;
                self.refilter();
                self.suggestions.dismiss();
                true
            }
            None => false,
        }
    }

    pub fn dismiss_suggestions(&mut self) {
        self.suggestions.dismiss();
    }

    // ------------------------------------------------------------------------
    // Paging
    // ------------------------------------------------------------------------

    pub fn next_page(&mut self) {
        self.page_index = pager::next_page(self.page_index, self.total_pages());
    }

    pub fn previous_page(&mut self) {
        self.page_index = pager::previous_page(self.page_index);
    }

    pub fn go_to_page(&mut self, index: usize) {
        self.page_index = pager::jump_to(index, self.total_pages());
    }

    // ------------------------------------------------------------------------
    // Full set
    // ------------------------------------------------------------------------

    /// Replace the full set with a fresh fetch result.
    pub fn replace_full_set(&mut self, records: Vec<R>) {
        self.full = records;
        self.refilter();
    }

    /// Start a fetch. Any fetch still in flight is superseded.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.latest_ticket += 1;
        let ticket = FetchTicket(self.latest_ticket);
        self.in_flight = Some(ticket);
        ticket
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn complete_fetch(&mut self, ticket: FetchTicket, records: Vec<R>) -> FetchOutcome {
        if ticket.0 != self.latest_ticket {
            tracing::debug!(
                ticket = ticket.0,
                latest = self.latest_ticket,
                "Discarding stale fetch result"
            );
            return FetchOutcome::Stale;
        }
        self.in_flight = None;
        let count = records.len();
        self.replace_full_set(records);
        FetchOutcome::Applied { count }
    }

    /// Record a failed fetch. The full set stays at its last good value.
    pub fn fail_fetch(&mut self, ticket: FetchTicket) -> FetchOutcome {
        if ticket.0 != self.latest_ticket {
            return FetchOutcome::Stale;
        }
        self.in_flight = None;
        FetchOutcome::Applied {
            count: self.full.len(),
        }
    }

    /// Drop a record from the full set after a confirmed delete.
    pub fn remove_local(&mut self, id: &R::Id) -> Option<R> {
        let position = self.full.iter().position(|r| r.id() == id)?;
        let removed = self.full.remove(position);
        self.resplice();
        Some(removed)
    }

    /// Insert or replace a record returned by the backend.
    pub fn upsert_local(&mut self, record: R) {
        if let Some(existing) = self.full.iter_mut().find(|r| r.id() == record.id()) {
            *existing = record;
        } else {
            self.full.push(record);
        }
        self.resplice();
    }

    // ------------------------------------------------------------------------
    // Derivation
    // ------------------------------------------------------------------------

    fn derive(&mut self) {
        self.filtered = filter::apply(&self.full, &self.criteria);
        self.suggestions
            .refresh(&self.full, &self.criteria.term, self.suggestion_limit);
    }

    fn refilter(&mut self) {
        self.derive();
        self.page_index = 1;
    }

    // A local splice keeps the reader on their page unless it no longer exists.
    fn resplice(&mut self) {
        self.derive();
        self.page_index = pager::jump_to(self.page_index, self.total_pages());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{ListRecord, RecordId};

    fn record(id: usize, title: &str, date: &str) -> ListRecord {
        ListRecord {
            id: RecordId::new(id.to_string()),
            title: title.to_string(),
            date: date.to_string(),
            summary: String::new(),
            detail: String::new(),
            location: None,
            media: Vec::new(),
        }
    }

    fn controller(len: usize, page_size: usize) -> ListController<ListRecord> {
        let records = (0..len)
            .map(|i| {
                let title = if i < 7 { format!("Aarti {i}") } else { format!("Bhajan {i}") };
                record(i, &title, &format!("2025-01-{:02}", i + 1))
            })
            .collect();
        ListController::with_records(PageSize::new(page_size).unwrap(), records)
    }

    #[test]
    fn test_new_controller_is_empty() {
        let c: ListController<ListRecord> = ListController::new(PageSize::new(5).unwrap());
        assert!(c.page_slice().is_empty());
        assert_eq!(c.total_pages(), 0);
        assert_eq!(c.page_index(), 1);
        assert!(!c.is_loading());
    }

    #[test]
    fn test_filter_change_resets_page() {
        let mut c = controller(12, 5);
        c.go_to_page(3);
        assert_eq!(c.page_index(), 3);
        c.set_search_term("aarti");
        assert_eq!(c.filtered().len(), 7);
        assert_eq!(c.page_index(), 1);
        assert_eq!(c.page_slice().len(), 5);

        c.go_to_page(2);
        c.set_start_date(Some("2025-01-02"));
        assert_eq!(c.page_index(), 1);

        c.go_to_page(2);
        c.set_end_date(Some("2025-01-03"));
        assert_eq!(c.page_index(), 1);
        assert_eq!(c.filtered().len(), 2);
    }

    #[test]
    fn test_navigation_stays_in_bounds() {
        let mut c = controller(12, 5);
        c.previous_page();
        assert_eq!(c.page_index(), 1);
        c.next_page();
        c.next_page();
        c.next_page();
        assert_eq!(c.page_index(), 3);
        assert_eq!(c.page_slice().len(), 2);
    }

    #[test]
    fn test_stale_fetch_is_discarded() {
        let mut c: ListController<ListRecord> = ListController::new(PageSize::new(5).unwrap());
        let first = c.begin_fetch();
        let second = c.begin_fetch();
        assert_eq!(
            c.complete_fetch(second, vec![record(1, "New", "2025-01-01")]),
            FetchOutcome::Applied { count: 1 }
        );
        assert_eq!(
            c.complete_fetch(first, vec![record(2, "Old", "2025-01-01"), record(3, "Old", "2025-01-02")]),
            FetchOutcome::Stale
        );
        assert_eq!(c.full_set().len(), 1);
        assert_eq!(c.full_set()[0].title, "New");
        assert!(!c.is_loading());
    }

    #[test]
    fn test_failed_fetch_keeps_last_good_set() {
        let mut c = controller(3, 5);
        let ticket = c.begin_fetch();
        assert!(c.is_loading());
        c.fail_fetch(ticket);
        assert!(!c.is_loading());
        assert_eq!(c.full_set().len(), 3);
    }

    #[test]
    fn test_remove_local_reclamps_page() {
        let mut c = controller(11, 5);
        c.go_to_page(3);
        assert_eq!(c.page_slice().len(), 1);
        let removed = c.remove_local(&RecordId::new("10"));
        assert!(removed.is_some());
        assert_eq!(c.total_pages(), 2);
        assert_eq!(c.page_index(), 2);
        assert_eq!(c.page_slice().len(), 5);
    }

    #[test]
    fn test_remove_local_unknown_id_is_noop() {
        let mut c = controller(4, 5);
        assert!(c.remove_local(&RecordId::new("missing")).is_none());
        assert_eq!(c.full_set().len(), 4);
    }

    #[test]
    fn test_upsert_local_replaces_in_place() {
        let mut c = controller(3, 5);
        c.upsert_local(record(1, "Renamed", "2025-01-02"));
        assert_eq!(c.full_set().len(), 3);
        assert_eq!(c.full_set()[1].title, "Renamed");
        c.upsert_local(record(99, "Added", "2025-02-01"));
        assert_eq!(c.full_set().len(), 4);
    }

    #[test]
    fn test_accept_suggestion_sets_title_verbatim() {
        let mut c = controller(12, 5);
        c.set_search_term("bhajan 1");
        assert!(c.suggestions().visible);
        assert!(c.accept_suggestion(0));
        assert_eq!(c.search_term(), "Bhajan 10");
        assert!(!c.suggestions().visible);
        assert_eq!(c.filtered().len(), 1);
    }
}
