//! Dham Test Utilities
//!
//! Shared test infrastructure for the dham workspace:
//! - A scriptable in-memory events backend
//! - Proptest generators for records and filter inputs
//! - Fixtures for the common listing scenarios
//! - Assertions for ordering and filter soundness

pub use dham_core::{
    Activity, BackendError, BackendResult, EventDraft, EventsBackend, ListRecord, Listable,
    RecordId,
};

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

// ============================================================================
// MOCK BACKEND
// ============================================================================

/// A backend call, as seen by [`MockEventsBackend`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCall {
    List,
    Get(RecordId),
    Create(String),
    Update(RecordId),
    Delete(RecordId),
}

#[derive(Debug, Default)]
struct MockState {
    records: Vec<ListRecord>,
    failures: VecDeque<BackendError>,
    calls: Vec<BackendCall>,
    next_id: u64,
}

/// In-memory backend. Failures queued with [`MockEventsBackend::fail_next`]
/// are returned, in order, by the next calls regardless of operation.
#[derive(Debug, Default)]
pub struct MockEventsBackend {
    state: Mutex<MockState>,
}

impl MockEventsBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<ListRecord>) -> Self {
        let backend = Self::new();
        backend.lock().records = records;
        backend
    }

    pub fn fail_next(&self, error: BackendError) {
        self.lock().failures.push_back(error);
    }

    pub fn calls(&self) -> Vec<BackendCall> {
        self.lock().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.lock().calls.len()
    }

    pub fn records(&self) -> Vec<ListRecord> {
        self.lock().records.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn begin(&self, call: BackendCall) -> Result<std::sync::MutexGuard<'_, MockState>, BackendError> {
        let mut state = self.lock();
        state.calls.push(call);
        match state.failures.pop_front() {
            Some(err) => Err(err),
            None => Ok(state),
        }
    }
}

fn record_from_draft(id: RecordId, draft: &EventDraft) -> ListRecord {
    ListRecord {
        id,
        title: draft.title.clone(),
        date: draft.date.clone(),
        summary: draft.summary.clone(),
        detail: draft.detail.clone(),
        location: Some(draft.location.clone()).filter(|l| !l.is_empty()),
        media: draft.media.clone(),
    }
}

#[async_trait]
impl EventsBackend for MockEventsBackend {
    async fn list_events(&self) -> BackendResult<Vec<ListRecord>> {
        let state = self.begin(BackendCall::List)?;
        Ok(state.records.clone())
    }

    async fn get_event(&self, id: &RecordId) -> BackendResult<ListRecord> {
        let state = self.begin(BackendCall::Get(id.clone()))?;
        state
            .records
            .iter()
            .find(|r| &r.id == id)
            .cloned()
            .ok_or_else(|| BackendError::application("Event not found"))
    }

    async fn create_event(&self, draft: &EventDraft) -> BackendResult<ListRecord> {
        let mut state = self.begin(BackendCall::Create(draft.title.clone()))?;
        state.next_id += 1;
        let record = record_from_draft(RecordId::new(format!("mock-{}", state.next_id)), draft);
        state.records.push(record.clone());
        Ok(record)
    }

    async fn update_event(&self, draft: &EventDraft) -> BackendResult<ListRecord> {
        let id = draft
            .id
            .clone()
            .ok_or_else(|| BackendError::application("Missing event id"))?;
        let mut state = self.begin(BackendCall::Update(id.clone()))?;
        let record = record_from_draft(id.clone(), draft);
        match state.records.iter_mut().find(|r| r.id == id) {
            Some(existing) => {
                *existing = record.clone();
                Ok(record)
            }
            None => Err(BackendError::application("Event not found")),
        }
    }

    async fn delete_event(&self, id: &RecordId) -> BackendResult<()> {
        let mut state = self.begin(BackendCall::Delete(id.clone()))?;
        let before = state.records.len();
        state.records.retain(|r| &r.id != id);
        if state.records.len() == before {
            return Err(BackendError::application("Failed to delete event"));
        }
        Ok(())
    }
}

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

pub mod generators {
    //! Proptest strategies for records and filter inputs.

    use super::*;
    use proptest::prelude::*;

    /// A calendar date in `YYYY-MM-DD` form between 2023 and 2026.
    pub fn arb_date() -> impl Strategy<Value = String> {
        (2023i32..=2026, 1u32..=12, 1u32..=28)
            .prop_map(|(y, m, d)| format!("{:04}-{:02}-{:02}", y, m, d))
    }

    /// Titles drawn from a small vocabulary so search terms actually hit.
    pub fn arb_title() -> impl Strategy<Value = String> {
        let words = prop::sample::select(vec![
            "Diwali", "Holi", "Aarti", "Bhajan", "Seva", "Mela", "Prep", "Katha", "Yatra",
            "MAHA", "shivratri",
        ]);
        prop::collection::vec(words, 1..4).prop_map(|w| w.join(" "))
    }

    /// A search term: empty, a word fragment, or mixed case.
    pub fn arb_term() -> impl Strategy<Value = String> {
        prop_oneof![
            Just(String::new()),
            prop::sample::select(vec!["diw", "HOLI", "a", "seva", "ratri", "zzz", "Mela Prep"])
                .prop_map(str::to_string),
        ]
    }

    pub fn arb_optional_date() -> impl Strategy<Value = Option<String>> {
        prop::option::of(arb_date())
    }

    pub fn arb_list_record(id: usize) -> impl Strategy<Value = ListRecord> {
        (arb_title(), arb_date(), "[a-z ]{0,30}", prop::option::of("[A-Z][a-z]{2,10}"))
            .prop_map(move |(title, date, summary, location)| ListRecord {
                id: RecordId::new(format!("rec-{}", id)),
                title,
                date,
                summary,
                detail: String::new(),
                location,
                media: Vec::new(),
            })
    }

    /// A full set with unique ids, up to `max` records.
    pub fn arb_record_set(max: usize) -> impl Strategy<Value = Vec<ListRecord>> {
        (0..=max).prop_flat_map(|len| {
            (0..len)
                .map(arb_list_record)
                .collect::<Vec<_>>()
        })
    }

    pub fn arb_activity(id: u32) -> impl Strategy<Value = Activity> {
        (
            arb_title(),
            arb_date(),
            prop::sample::select(vec!["charity", "eldercare", "environment", "education", "health"]),
            0u32..100,
        )
            .prop_map(move |(title, date, category, participants)| Activity {
                id,
                title,
                summary: String::new(),
                media: None,
                date,
                participants,
                category: category.to_string(),
            })
    }
}

// ============================================================================
// TEST FIXTURES
// ============================================================================

pub mod fixtures {
    //! Ready-made records for scenario tests.

    use super::*;

    pub fn event(id: &str, title: &str, date: &str) -> ListRecord {
        ListRecord {
            id: RecordId::new(id),
            title: title.to_string(),
            date: date.to_string(),
            summary: format!("{} at the temple", title),
            detail: format!("<p>{}</p>", title),
            location: Some("Koleshwar Dham".to_string()),
            media: Vec::new(),
        }
    }

    /// Three festival events: two Diwali entries a month apart, one Holi.
    pub fn festival_events() -> Vec<ListRecord> {
        vec![
            event("1", "Diwali Mela", "2025-03-05"),
            event("2", "Holi Fest", "2025-03-20"),
            event("3", "Diwali Prep", "2025-02-01"),
        ]
    }

    /// `count` events titled "Event N", dated one day apart from 2025-01-01.
    pub fn numbered_events(count: usize) -> Vec<ListRecord> {
        (0..count)
            .map(|i| {
                let date = chrono::NaiveDate::from_ymd_opt(2025, 1, 1)
                    .and_then(|d| d.checked_add_days(chrono::Days::new(i as u64)))
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_default();
                event(&i.to_string(), &format!("Event {}", i), &date)
            })
            .collect()
    }

    pub fn valid_draft() -> EventDraft {
        EventDraft {
            id: None,
            title: "Ram Navami Katha".to_string(),
            date: "2099-04-06".to_string(),
            summary: "Evening katha and prasad for all devotees".to_string(),
            detail: "<p>Starts at 6pm</p>".to_string(),
            location: "Main mandap".to_string(),
            media: Vec::new(),
        }
    }
}

// ============================================================================
// CUSTOM ASSERTIONS
// ============================================================================

pub mod assertions {
    //! Assertions shared by the property suites.

    use super::*;

    /// `subset` appears in `full` in the same relative order.
    pub fn assert_ordered_subset<R: Listable>(subset: &[R], full: &[R]) {
        let mut cursor = full.iter();
        for item in subset {
            assert!(
                cursor.any(|candidate| candidate.id() == item.id()),
                "record {:?} missing or out of order",
                item.id()
            );
        }
    }

    pub fn ids(records: &[ListRecord]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbered_events_dates_increase() {
        let events = fixtures::numbered_events(40);
        assert_eq!(events[0].date, "2025-01-01");
        assert_eq!(events[31].date, "2025-02-01");
        assert!(events.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[tokio::test]
    async fn test_mock_fail_next_is_consumed_once() {
        let backend = MockEventsBackend::with_records(fixtures::festival_events());
        backend.fail_next(BackendError::network("offline"));
        assert!(backend.list_events().await.is_err());
        let second = backend.list_events().await;
        assert_eq!(second.map(|r| r.len()), Ok(3));
        assert_eq!(backend.call_count(), 2);
    }

    #[tokio::test]
    async fn test_mock_create_assigns_ids() {
        let backend = MockEventsBackend::new();
        let first = backend.create_event(&fixtures::valid_draft()).await;
        let second = backend.create_event(&fixtures::valid_draft()).await;
        assert_eq!(first.map(|r| r.id), Ok(RecordId::new("mock-1")));
        assert_eq!(second.map(|r| r.id), Ok(RecordId::new("mock-2")));
        assert_eq!(backend.records().len(), 2);
    }

    #[tokio::test]
    async fn test_mock_delete_unknown_is_application_error() {
        let backend = MockEventsBackend::with_records(fixtures::festival_events());
        let result = backend.delete_event(&RecordId::new("nope")).await;
        assert!(matches!(result, Err(BackendError::Application { .. })));
        assert_eq!(backend.calls(), vec![BackendCall::Delete(RecordId::new("nope"))]);
    }
}
