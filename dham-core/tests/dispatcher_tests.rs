//! Mutation dispatcher scenarios against the in-memory backend.
//!
//! The listing only changes after the backend confirms a mutation, a failed
//! mutation leaves it as it was, and an invalid draft never leaves the
//! process.

use chrono::NaiveDate;
use dham_core::{
    BackendError, DeleteRequest, EventDraft, ListController, ListRecord, MutationDispatcher,
    MutationError, MutationOutcome, NoticeLevel, PageSize, RecordId, TECHNICAL_DIFFICULTIES,
};
use dham_test_utils::assertions::ids;
use dham_test_utils::{fixtures, BackendCall, MockEventsBackend};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 15).expect("valid date")
}

fn listing(records: Vec<ListRecord>, size: usize) -> ListController<ListRecord> {
    ListController::with_records(PageSize::new(size).expect("non-zero"), records)
}

// ============================================================================
// DELETE
// ============================================================================

#[tokio::test]
async fn test_delete_success_splices_without_refetch() {
    let backend = MockEventsBackend::with_records(fixtures::festival_events());
    let mut list = listing(fixtures::festival_events(), 3);
    assert_eq!(ids(list.page_slice()), vec!["1", "2", "3"]);

    let request = DeleteRequest::new(RecordId::new("2"), "Holi Fest");
    let dispatcher = MutationDispatcher::new(&backend).with_today(today());
    let result = dispatcher.remove(&mut list, request.confirm()).await;

    assert!(result.is_ok());
    assert_eq!(ids(list.full_set()), vec!["1", "3"]);
    assert_eq!(ids(list.page_slice()), vec!["1", "3"]);
    assert_eq!(backend.calls(), vec![BackendCall::Delete(RecordId::new("2"))]);
}

#[tokio::test]
async fn test_delete_network_failure_leaves_listing() {
    let backend = MockEventsBackend::with_records(fixtures::festival_events());
    backend.fail_next(BackendError::network("connection reset"));
    let mut list = listing(fixtures::festival_events(), 3);

    let request = DeleteRequest::new(RecordId::new("2"), "Holi Fest").confirm();
    let err = MutationDispatcher::new(&backend)
        .remove(&mut list, request)
        .await
        .expect_err("delete should fail");

    assert_eq!(list.full_set(), fixtures::festival_events().as_slice());
    let notice = err.notice();
    assert_eq!(notice.level, NoticeLevel::Error);
    assert_eq!(notice.message, TECHNICAL_DIFFICULTIES);
}

#[tokio::test]
async fn test_delete_application_failure_reports_message() {
    let backend = MockEventsBackend::with_records(fixtures::festival_events());
    backend.fail_next(BackendError::application("Failed to delete event"));
    let mut list = listing(fixtures::festival_events(), 3);

    let request = DeleteRequest::new(RecordId::new("1"), "Diwali Mela").confirm();
    let err = MutationDispatcher::new(&backend)
        .remove(&mut list, request)
        .await
        .expect_err("delete should fail");

    assert!(matches!(err, MutationError::Backend(BackendError::Application { .. })));
    assert!(err.notice().message.contains("Failed to delete event"));
    assert_eq!(list.full_set().len(), 3);
}

#[tokio::test]
async fn test_delete_last_record_on_last_page_moves_back() {
    let records = fixtures::numbered_events(11);
    let backend = MockEventsBackend::with_records(records.clone());
    let mut list = listing(records, 5);
    list.go_to_page(3);
    assert_eq!(list.page_slice().len(), 1);

    let request = DeleteRequest::new(RecordId::new("10"), "Event 10").confirm();
    MutationDispatcher::new(&backend)
        .remove(&mut list, request)
        .await
        .expect("delete succeeds");

    assert_eq!(list.total_pages(), 2);
    assert_eq!(list.page_index(), 2);
    assert_eq!(list.page_slice().len(), 5);
}

#[test]
fn test_delete_prompt_names_the_record() {
    let request = DeleteRequest::new(RecordId::new("2"), "Holi Fest");
    assert_eq!(request.prompt(), "Are you sure you want to delete \"Holi Fest\"?");
    assert_eq!(request.confirm().id(), &RecordId::new("2"));
}

// ============================================================================
// CREATE / UPDATE
// ============================================================================

#[tokio::test]
async fn test_create_appends_server_copy() {
    let backend = MockEventsBackend::new();
    let mut list = listing(fixtures::festival_events(), 3);

    let saved = MutationDispatcher::new(&backend)
        .with_today(today())
        .upsert(&mut list, &fixtures::valid_draft())
        .await
        .expect("create succeeds");

    assert_eq!(saved.id, RecordId::new("mock-1"));
    assert_eq!(list.full_set().len(), 4);
    assert_eq!(list.find(&saved.id).map(|r| r.title.as_str()), Some("Ram Navami Katha"));
}

#[tokio::test]
async fn test_update_replaces_in_place() {
    let backend = MockEventsBackend::with_records(fixtures::festival_events());
    let mut list = listing(fixtures::festival_events(), 3);

    let mut draft = EventDraft::from(&fixtures::festival_events()[1]);
    draft.title = "Holi Utsav".to_string();
    // Existing events may keep a past date.
    draft.date = "2024-03-25".to_string();

    MutationDispatcher::new(&backend)
        .with_today(today())
        .upsert(&mut list, &draft)
        .await
        .expect("update succeeds");

    assert_eq!(ids(list.full_set()), vec!["1", "2", "3"]);
    assert_eq!(list.full_set()[1].title, "Holi Utsav");
    assert_eq!(backend.calls(), vec![BackendCall::Update(RecordId::new("2"))]);
}

#[tokio::test]
async fn test_invalid_draft_never_reaches_backend() {
    let backend = MockEventsBackend::new();
    let mut list = listing(fixtures::festival_events(), 3);

    let mut draft = fixtures::valid_draft();
    draft.title = "Ab".to_string();
    draft.date = "2024-12-31".to_string();

    let err = MutationDispatcher::new(&backend)
        .with_today(today())
        .upsert(&mut list, &draft)
        .await
        .expect_err("validation fails");

    match &err {
        MutationError::Validation(errors) => {
            assert!(errors.get("title").is_some());
            assert_eq!(errors.get("date"), Some("Date cannot be in the past"));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert_eq!(err.notice().level, NoticeLevel::Warning);
    assert_eq!(backend.call_count(), 0);
    assert_eq!(list.full_set().len(), 3);
}

#[tokio::test]
async fn test_create_failure_leaves_listing() {
    let backend = MockEventsBackend::new();
    backend.fail_next(BackendError::network("timeout"));
    let mut list = listing(fixtures::festival_events(), 3);

    let result = MutationDispatcher::new(&backend)
        .with_today(today())
        .upsert(&mut list, &fixtures::valid_draft())
        .await;

    assert!(matches!(result, Err(MutationError::Backend(BackendError::Network { .. }))));
    assert_eq!(list.full_set().len(), 3);
}

// ============================================================================
// DETACHED OUTCOMES
// ============================================================================

#[tokio::test]
async fn test_delete_outcome_applies_later() {
    let backend = MockEventsBackend::with_records(fixtures::festival_events());
    let dispatcher = MutationDispatcher::new(&backend).with_today(today());
    let request = DeleteRequest::new(RecordId::new("3"), "Diwali Prep").confirm();

    let outcome = dispatcher.delete(request).await.expect("delete succeeds");
    assert_eq!(outcome, MutationOutcome::Deleted(RecordId::new("3")));
    assert_eq!(outcome.success_message(), "Event deleted successfully");

    // Two views of the same data both take the splice.
    let mut public = listing(fixtures::festival_events(), 3);
    let mut admin = listing(fixtures::festival_events(), 2);
    outcome.apply(&mut public);
    outcome.apply(&mut admin);
    assert_eq!(ids(public.full_set()), vec!["1", "2"]);
    assert_eq!(ids(admin.full_set()), vec!["1", "2"]);
}

#[tokio::test]
async fn test_save_outcome_distinguishes_create_and_update() {
    let backend = MockEventsBackend::with_records(fixtures::festival_events());
    let dispatcher = MutationDispatcher::new(&backend).with_today(today());

    let created = dispatcher.save(&fixtures::valid_draft()).await.expect("create succeeds");
    assert!(matches!(created, MutationOutcome::Created(ref r) if r.title == "Ram Navami Katha"));
    assert_eq!(created.success_message(), "Event created successfully");

    let mut draft = EventDraft::from(&fixtures::festival_events()[0]);
    draft.title = "Diwali Mela Utsav".to_string();
    let updated = dispatcher.save(&draft).await.expect("update succeeds");
    assert_eq!(updated.success_message(), "Event updated successfully");

    let mut list = listing(fixtures::festival_events(), 3);
    updated.apply(&mut list);
    assert_eq!(list.full_set()[0].title, "Diwali Mela Utsav");
    assert_eq!(list.full_set().len(), 3);
}

#[tokio::test]
async fn test_check_rejects_without_backend_call() {
    let backend = MockEventsBackend::new();
    let dispatcher = MutationDispatcher::new(&backend).with_today(today());

    let mut draft = fixtures::valid_draft();
    draft.date.clear();
    assert!(matches!(dispatcher.check(&draft), Err(MutationError::Validation(_))));
    assert!(matches!(dispatcher.save(&draft).await, Err(MutationError::Validation(_))));
    assert_eq!(backend.call_count(), 0);
}
