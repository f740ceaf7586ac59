//! Property-Based Tests for the listing pipeline
//!
//! Covers the filter, suggestion and paging rules every listing screen
//! relies on:
//! - an empty filter is the identity
//! - the title search is sound and complete
//! - date bounds are inclusive
//! - suggestions are capped and off for an empty term
//! - filter changes always land on page 1
//! - an empty filtered set has no pages

use dham_core::{
    filter_records, paginate, suggest, total_pages, Activity, DateRange, ListController,
    ListRecord, Listable, PageSize,
};
use dham_test_utils::assertions::{assert_ordered_subset, ids};
use dham_test_utils::fixtures;
use dham_test_utils::generators::{
    arb_activity, arb_date, arb_optional_date, arb_record_set, arb_term,
};
use proptest::prelude::*;

fn page_size(n: usize) -> PageSize {
    PageSize::new(n).expect("non-zero page size")
}

// ============================================================================
// FILTER
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_empty_filter_is_identity(set in arb_record_set(30)) {
        let result = filter_records(&set, "", None, None);
        prop_assert_eq!(result, set);
    }

    #[test]
    fn prop_title_search_sound_and_complete(set in arb_record_set(30), term in arb_term()) {
        let needle = term.to_lowercase();
        let result = filter_records(&set, &term, None, None);

        for record in &result {
            prop_assert!(record.title.to_lowercase().contains(&needle));
        }
        let expected = set
            .iter()
            .filter(|r| r.title.to_lowercase().contains(&needle))
            .count();
        prop_assert_eq!(result.len(), expected);
        assert_ordered_subset(&result, &set);
    }

    #[test]
    fn prop_date_bounds_inclusive(
        set in arb_record_set(30),
        a in arb_date(),
        b in arb_date(),
    ) {
        let (start, end) = if a <= b { (a, b) } else { (b, a) };
        let result = filter_records(&set, "", Some(&start), Some(&end));

        for record in &result {
            prop_assert!(start <= record.date && record.date <= end);
        }
        let expected = set
            .iter()
            .filter(|r| start <= r.date && r.date <= end)
            .count();
        prop_assert_eq!(result.len(), expected);
    }

    #[test]
    fn prop_inverted_range_applies_both_bounds(
        set in arb_record_set(30),
        a in arb_date(),
        b in arb_date(),
    ) {
        prop_assume!(a != b);
        let (start, end) = if a > b { (a, b) } else { (b, a) };
        prop_assert!(DateRange::new(Some(&start), Some(&end)).is_inverted());
        // date >= start > end >= date is unsatisfiable.
        prop_assert!(filter_records(&set, "", Some(&start), Some(&end)).is_empty());
    }

    #[test]
    fn prop_open_bounds_match_one_sided(
        set in arb_record_set(30),
        start in arb_optional_date(),
    ) {
        let result = filter_records(&set, "", start.as_deref(), None);
        if let Some(start) = &start {
            prop_assert!(result.iter().all(|r| &r.date >= start));
        } else {
            prop_assert_eq!(result.len(), set.len());
        }
    }

    #[test]
    fn prop_activity_search_covers_category(
        activities in prop::collection::vec(arb_activity(0), 0..20),
        term in arb_term(),
    ) {
        let needle = term.to_lowercase();
        let result: Vec<Activity> = filter_records(&activities, &term, None, None);
        for activity in &result {
            prop_assert!(
                activity.title.to_lowercase().contains(&needle)
                    || activity.category.to_lowercase().contains(&needle)
            );
        }
        prop_assert!(result.len() <= activities.len());
    }
}

// ============================================================================
// SUGGESTIONS
// ============================================================================

proptest! {
    #[test]
    fn prop_suggestions_capped(set in arb_record_set(40), term in arb_term(), limit in 0usize..8) {
        let result = suggest(&set, &term, limit);
        prop_assert!(result.len() <= limit);
        assert_ordered_subset(&result, &set);
    }

    #[test]
    fn prop_empty_term_has_no_suggestions(set in arb_record_set(40), limit in 0usize..8) {
        prop_assert!(suggest(&set, "", limit).is_empty());
    }
}

// ============================================================================
// PAGING
// ============================================================================

proptest! {
    #[test]
    fn prop_empty_set_has_no_pages(size in 1usize..10, index in 0usize..20) {
        let empty: Vec<ListRecord> = Vec::new();
        prop_assert!(paginate(&empty, page_size(size), index).is_empty());
        prop_assert_eq!(total_pages(0, page_size(size)), 0);
    }

    #[test]
    fn prop_pages_partition_filtered_set(set in arb_record_set(40), size in 1usize..8) {
        let size = page_size(size);
        let pages = total_pages(set.len(), size);
        let stitched: Vec<ListRecord> = (1..=pages)
            .flat_map(|i| paginate(&set, size, i).to_vec())
            .collect();
        prop_assert_eq!(stitched, set);
    }

    #[test]
    fn prop_filter_change_resets_page(
        set in arb_record_set(40),
        term in arb_term(),
        start in arb_optional_date(),
        page in 1usize..10,
    ) {
        let mut controller = ListController::with_records(page_size(3), set);
        controller.go_to_page(page);
        controller.set_search_term(term);
        prop_assert_eq!(controller.page_index(), 1);

        controller.go_to_page(page);
        controller.set_start_date(start.as_deref());
        prop_assert_eq!(controller.page_index(), 1);

        controller.go_to_page(page);
        controller.set_end_date(None);
        prop_assert_eq!(controller.page_index(), 1);
    }

    #[test]
    fn prop_navigation_never_leaves_range(set in arb_record_set(30), steps in prop::collection::vec(any::<bool>(), 0..30)) {
        let mut controller = ListController::with_records(page_size(4), set);
        for forward in steps {
            if forward {
                controller.next_page();
            } else {
                controller.previous_page();
            }
            let total = controller.total_pages();
            prop_assert!(controller.page_index() >= 1);
            prop_assert!(controller.page_index() <= total.max(1));
        }
    }
}

// ============================================================================
// SCENARIOS
// ============================================================================

#[test]
fn test_festival_search_with_march_bounds() {
    let set = fixtures::festival_events();
    let result = filter_records(&set, "diwali", Some("2025-03-01"), Some("2025-03-31"));
    assert_eq!(ids(&result), vec!["1"]);
}

#[test]
fn test_twelve_to_seven_lands_on_first_page() {
    let mut set = fixtures::numbered_events(12);
    for record in set.iter_mut().take(7) {
        record.title = format!("Seva {}", record.id);
    }
    let mut controller = ListController::with_records(page_size(5), set);
    controller.go_to_page(3);
    assert_eq!(controller.page_index(), 3);
    assert_eq!(controller.page_slice().len(), 2);

    controller.set_search_term("seva");
    assert_eq!(controller.filtered().len(), 7);
    assert_eq!(controller.page_index(), 1);
    assert_eq!(controller.page_slice().len(), 5);
    assert_eq!(controller.total_pages(), 2);
}

#[test]
fn test_suggestion_accept_filters_by_title() {
    let mut controller = ListController::with_records(page_size(3), fixtures::festival_events());
    controller.set_search_term("di");
    assert!(controller.suggestions().visible);
    assert_eq!(controller.suggestions().items.len(), 2);

    assert!(controller.accept_suggestion(1));
    assert_eq!(controller.search_term(), "Diwali Prep");
    assert!(!controller.suggestions().visible);
    assert_eq!(controller.filtered().len(), 1);
    assert_eq!(controller.filtered()[0].id(), controller.full_set()[2].id());
}

#[test]
fn test_suggestions_ignore_date_bounds() {
    let mut controller = ListController::with_records(page_size(3), fixtures::festival_events());
    controller.set_start_date(Some("2025-03-10"));
    controller.set_search_term("diwali");
    assert!(controller.filtered().is_empty());
    assert_eq!(controller.suggestions().items.len(), 2);
}
