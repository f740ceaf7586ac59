//! Admin mutations against the backend, reconciled into a listing.
//!
//! Deletes go through a small typestate: a [`DeleteRequest`] has to be
//! confirmed before the dispatcher will accept it.
//!
//! ```text
//! DeleteRequest::new(id) ─── confirm() ──→ ConfirmedDelete ─── delete() ──→ Deleted(id)
//!          │
//!      (dropped: nothing sent)
//! ```
//!
//! There is no optimistic phase. The listing only changes after the backend
//! has answered successfully, so a failure needs no rollback. `delete` and
//! `save` only talk to the backend and return a [`MutationOutcome`];
//! `remove` and `upsert` also apply it in place.

use crate::backend::EventsBackend;
use crate::controller::ListController;
use crate::error::MutationError;
use crate::record::{EventDraft, ListRecord, RecordId};
use chrono::NaiveDate;

// ============================================================================
// DELETE CONFIRMATION
// ============================================================================

/// A delete the user has asked for but not yet confirmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteRequest {
    id: RecordId,
    title: String,
}

impl DeleteRequest {
    pub fn new(id: RecordId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }

    pub fn id(&self) -> &RecordId {
        &self.id
    }

    pub fn prompt(&self) -> String {
        format!("Are you sure you want to delete \"{}\"?", self.title)
    }

    pub fn confirm(self) -> ConfirmedDelete {
        ConfirmedDelete { id: self.id }
    }
}

/// A delete the user has confirmed. Only obtainable from [`DeleteRequest::confirm`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmedDelete {
    id: RecordId,
}

impl ConfirmedDelete {
    pub fn id(&self) -> &RecordId {
        &self.id
    }
}

// ============================================================================
// OUTCOMES
// ============================================================================

/// A mutation the backend has confirmed, not yet applied to any listing.
///
/// The backend call and the splice are separate steps so the call can run
/// while the listing stays in use; [`MutationOutcome::apply`] is the splice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    Deleted(RecordId),
    Created(ListRecord),
    Updated(ListRecord),
}

impl MutationOutcome {
    pub fn apply(&self, list: &mut ListController<ListRecord>) {
        match self {
            MutationOutcome::Deleted(id) => {
                list.remove_local(id);
            }
            MutationOutcome::Created(record) | MutationOutcome::Updated(record) => {
                list.upsert_local(record.clone());
            }
        }
    }

    pub fn success_message(&self) -> &'static str {
        match self {
            MutationOutcome::Deleted(_) => "Event deleted successfully",
            MutationOutcome::Created(_) => "Event created successfully",
            MutationOutcome::Updated(_) => "Event updated successfully",
        }
    }
}

// ============================================================================
// DISPATCHER
// ============================================================================

pub struct MutationDispatcher<'a, B: EventsBackend + ?Sized> {
    backend: &'a B,
    today: NaiveDate,
}

impl<'a, B: EventsBackend + ?Sized> MutationDispatcher<'a, B> {
    pub fn new(backend: &'a B) -> Self {
        Self {
            backend,
            today: chrono::Local::now().date_naive(),
        }
    }

    /// Override the date new events are validated against.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Validate a draft without touching the backend.
    pub fn check(&self, draft: &EventDraft) -> Result<(), MutationError> {
        draft.validate(self.today).map_err(|errors| {
            tracing::debug!(fields = errors.len(), "Event draft rejected before dispatch");
            MutationError::Validation(errors)
        })
    }

    /// Send a confirmed delete. The caller applies the outcome.
    pub async fn delete(&self, request: ConfirmedDelete) -> Result<MutationOutcome, MutationError> {
        match self.backend.delete_event(&request.id).await {
            Ok(()) => {
                tracing::info!(id = %request.id, "Event deleted");
                Ok(MutationOutcome::Deleted(request.id))
            }
            Err(err) => {
                tracing::warn!(id = %request.id, error = %err, "Event delete failed");
                Err(err.into())
            }
        }
    }

    /// Validate and send a create or update. The caller applies the outcome.
    pub async fn save(&self, draft: &EventDraft) -> Result<MutationOutcome, MutationError> {
        let record = self.send_save(draft).await?;
        Ok(if draft.is_update() {
            MutationOutcome::Updated(record)
        } else {
            MutationOutcome::Created(record)
        })
    }

    /// Delete a confirmed record and splice it out of the listing.
    pub async fn remove(
        &self,
        list: &mut ListController<ListRecord>,
        request: ConfirmedDelete,
    ) -> Result<(), MutationError> {
        self.delete(request).await?.apply(list);
        Ok(())
    }

    /// Create or update an event, then splice the server's copy into the listing.
    pub async fn upsert(
        &self,
        list: &mut ListController<ListRecord>,
        draft: &EventDraft,
    ) -> Result<ListRecord, MutationError> {
        let record = self.send_save(draft).await?;
        list.upsert_local(record.clone());
        Ok(record)
    }

    async fn send_save(&self, draft: &EventDraft) -> Result<ListRecord, MutationError> {
        self.check(draft)?;

        let result = if draft.is_update() {
            self.backend.update_event(draft).await
        } else {
            self.backend.create_event(draft).await
        };

        match result {
            Ok(record) => {
                tracing::info!(id = %record.id, update = draft.is_update(), "Event saved");
                Ok(record)
            }
            Err(err) => {
                tracing::warn!(update = draft.is_update(), error = %err, "Event save failed");
                Err(err.into())
            }
        }
    }
}
