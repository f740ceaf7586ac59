//! Event types for the TUI event loop.

use crossterm::event::KeyEvent;
use dham_core::{BackendResult, FetchTicket, ListRecord, MutationError, MutationOutcome, RecordId};

/// Which event listing a fetch belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListTarget {
    Public,
    Admin,
}

/// Which admin mutation a finished job carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Delete,
    Save,
}

#[derive(Debug, Clone)]
pub enum TuiEvent {
    Input(KeyEvent),
    Resize { width: u16, height: u16 },
    EventsLoaded {
        target: ListTarget,
        ticket: FetchTicket,
        result: BackendResult<Vec<ListRecord>>,
    },
    DetailLoaded {
        id: RecordId,
        result: BackendResult<ListRecord>,
    },
    MutationFinished {
        kind: MutationKind,
        result: Result<MutationOutcome, MutationError>,
    },
}
