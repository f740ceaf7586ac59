//! Dham Core - listing, filtering and mutation logic
//!
//! Everything the trust site's listing screens share: record types, the
//! search/date filter, suggestions, paging, the generic list controller,
//! the backend seam and the admin mutation dispatcher. No I/O lives here.

pub mod backend;
pub mod controller;
pub mod dispatcher;
pub mod editor;
pub mod error;
pub mod filter;
pub mod pager;
pub mod record;
pub mod richtext;
pub mod ui_state;
pub mod validation;

pub use backend::{BackendResult, EventsBackend};
pub use controller::{FetchOutcome, FetchTicket, ListController};
pub use dispatcher::{ConfirmedDelete, DeleteRequest, MutationDispatcher, MutationOutcome};
pub use editor::{EditorField, EventEditor};
pub use error::{BackendError, MutationError, Notice, NoticeLevel, TECHNICAL_DIFFICULTIES};
pub use filter::{
    filter_records, suggest, DateRange, FilterCriteria, SuggestionState, DEFAULT_SUGGESTION_LIMIT,
};
pub use pager::{paginate, total_pages, PageSize, PagerError};
pub use record::{normalize_date, Activity, EventDraft, ListRecord, Listable, RecordId};
pub use richtext::{PlainTextField, RichTextField};
pub use ui_state::{ColorPreference, UiState};
pub use validation::{BookingForm, ContactForm, DonationForm, ValidationErrors};
