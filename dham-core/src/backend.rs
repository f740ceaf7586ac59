//! Remote data source seam.
//!
//! The backend owns the canonical event collection. Implementations map
//! their wire format and status conventions into [`BackendError`] at the
//! boundary; nothing past this trait sees a raw status code.

use crate::error::BackendError;
use crate::record::{EventDraft, ListRecord, RecordId};
use async_trait::async_trait;

pub type BackendResult<T> = Result<T, BackendError>;

#[async_trait]
pub trait EventsBackend: Send + Sync {
    /// Every event, in backend order.
    async fn list_events(&self) -> BackendResult<Vec<ListRecord>>;

    async fn get_event(&self, id: &RecordId) -> BackendResult<ListRecord>;

    /// Create an event. The backend assigns the id.
    async fn create_event(&self, draft: &EventDraft) -> BackendResult<ListRecord>;

    /// Update an event. `draft.id` must be set.
    async fn update_event(&self, draft: &EventDraft) -> BackendResult<ListRecord>;

    async fn delete_event(&self, id: &RecordId) -> BackendResult<()>;
}
