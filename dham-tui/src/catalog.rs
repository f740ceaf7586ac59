//! Bundled social activities.
//!
//! Activities are not served by the backend; the catalog ships with the
//! binary.

use dham_core::Activity;

const SOCIAL_ACTIVITIES: &str = include_str!("../data/social_activities.json");

pub fn social_activities() -> Result<Vec<Activity>, serde_json::Error> {
    serde_json::from_str(SOCIAL_ACTIVITIES)
}
