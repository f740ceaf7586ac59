//! Reusable widget components.

pub mod detail;
pub mod filter;
pub mod pagination;

pub use detail::DetailPanel;
pub use filter::{FilterBar, SuggestionDropdown};
pub use pagination::PaginationBar;
