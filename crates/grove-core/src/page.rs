//! Pagination types shared by every listing operation.

use serde::{Deserialize, Serialize};

/// A page request: zero-based page index and page size.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u64,
    pub per_page: u64,
}

impl PageRequest {
    /// Largest page size a caller may request.
    pub const MAX_PER_PAGE: u64 = 100;

    pub fn new(page: u64, per_page: u64) -> Self {
        Self {
            page,
            // Zero would make offset math meaningless; page size is caller
            // input, so it is bounded above as well.
            per_page: per_page.clamp(1, Self::MAX_PER_PAGE),
        }
    }

    pub fn offset(&self) -> u64 {
        self.page * self.per_page
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, 10)
    }
}

/// One page of results plus the total row count for page-bar rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64) -> Self {
        Self { items, total }
    }

    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_is_page_times_size() {
        assert_eq!(PageRequest::new(0, 10).offset(), 0);
        assert_eq!(PageRequest::new(3, 20).offset(), 60);
    }

    #[test]
    fn zero_page_size_is_clamped() {
        assert_eq!(PageRequest::new(5, 0).per_page, 1);
    }

    #[test]
    fn oversized_page_size_is_clamped() {
        assert_eq!(
            PageRequest::new(0, u64::MAX).per_page,
            PageRequest::MAX_PER_PAGE
        );
        assert_eq!(PageRequest::new(0, 100).per_page, 100);
    }
}
