//! Page arithmetic over a filtered set.
//!
//! Page indices are 1-based. [`paginate`] never clamps; navigation helpers
//! keep callers inside `1..=total_pages`.

use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PagerError {
    #[error("page size must be greater than zero")]
    ZeroPageSize,
}

/// Number of records per page. Never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct PageSize(NonZeroUsize);

impl PageSize {
    pub fn new(size: usize) -> Result<Self, PagerError> {
        NonZeroUsize::new(size)
            .map(Self)
            .ok_or(PagerError::ZeroPageSize)
    }

    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl TryFrom<usize> for PageSize {
    type Error = PagerError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PageSize> for usize {
    fn from(size: PageSize) -> Self {
        size.get()
    }
}

/// `ceil(len / page_size)`; zero for an empty set.
pub fn total_pages(len: usize, page_size: PageSize) -> usize {
    len.div_ceil(page_size.get())
}

/// Records on page `page_index` (1-based).
///
/// An index of 0 or past the last page yields an empty slice.
pub fn paginate<R>(set: &[R], page_size: PageSize, page_index: usize) -> &[R] {
    if page_index == 0 {
        return &[];
    }
    let size = page_size.get();
    let start = (page_index - 1).saturating_mul(size);
    if start >= set.len() {
        return &[];
    }
    let end = start.saturating_add(size).min(set.len());
    &set[start..end]
}

/// Index after a "previous" action.
pub fn previous_page(index: usize) -> usize {
    index.saturating_sub(1).max(1)
}

/// Index after a "next" action. Stays at 1 when there are no pages.
pub fn next_page(index: usize, total: usize) -> usize {
    (index + 1).min(total).max(1)
}

/// Index after jumping straight to `target`.
pub fn jump_to(target: usize, total: usize) -> usize {
    target.min(total).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(n: usize) -> PageSize {
        PageSize::new(n).unwrap()
    }

    #[test]
    fn test_zero_page_size_rejected() {
        assert_eq!(PageSize::new(0), Err(PagerError::ZeroPageSize));
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, size(5)), 0);
        assert_eq!(total_pages(5, size(5)), 1);
        assert_eq!(total_pages(12, size(5)), 3);
    }

    #[test]
    fn test_paginate_slices() {
        let set: Vec<u32> = (1..=12).collect();
        assert_eq!(paginate(&set, size(5), 1), &[1, 2, 3, 4, 5]);
        assert_eq!(paginate(&set, size(5), 3), &[11, 12]);
        assert!(paginate(&set, size(5), 4).is_empty());
        assert!(paginate(&set, size(5), 0).is_empty());
    }

    #[test]
    fn test_paginate_empty_set() {
        let set: Vec<u32> = Vec::new();
        for index in 0..4 {
            assert!(paginate(&set, size(3), index).is_empty());
        }
    }

    #[test]
    fn test_navigation_clamps() {
        assert_eq!(previous_page(1), 1);
        assert_eq!(previous_page(3), 2);
        assert_eq!(next_page(3, 3), 3);
        assert_eq!(next_page(1, 3), 2);
        assert_eq!(next_page(1, 0), 1);
        assert_eq!(jump_to(9, 3), 3);
        assert_eq!(jump_to(0, 3), 1);
    }

    #[test]
    fn test_page_size_serde() {
        let parsed: PageSize = serde_json::from_str("6").unwrap();
        assert_eq!(parsed.get(), 6);
        assert!(serde_json::from_str::<PageSize>("0").is_err());
    }
}
