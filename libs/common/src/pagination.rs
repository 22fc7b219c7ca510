//! Page-based pagination primitives
//!
//! Both feed endpoints paginate the same way: a 1-based page number and a
//! page size select the slice `[(page - 1) * size, page * size)`, and the
//! `has_next`/`has_prev` flags are derived from the total row count.

use serde::{Deserialize, Serialize};

/// Default page size when the caller does not specify one
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Upper bound on the page size a caller may request
pub const MAX_PAGE_SIZE: u32 = 100;

/// A validated pagination request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    per_page: u32,
}

impl PageRequest {
    /// Create a new page request, clamping out-of-range values
    ///
    /// Pages are 1-based; page 0 is treated as page 1. The page size is
    /// clamped to `1..=MAX_PAGE_SIZE`.
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// 1-based page number
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Number of items per page
    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Row offset of the first item on this page
    pub fn offset(&self) -> i64 {
        i64::from(self.page - 1) * i64::from(self.per_page)
    }

    /// Row limit for this page
    pub fn limit(&self) -> i64 {
        i64::from(self.per_page)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }
}

/// A single page of results plus navigation flags
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub per_page: u32,
    pub total: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl<T> Page<T> {
    /// Assemble a page from the fetched slice and the total row count
    pub fn new(items: Vec<T>, request: PageRequest, total: i64) -> Self {
        let has_next = request.offset() + request.limit() < total;
        let has_prev = request.page() > 1;

        Page {
            items,
            page: request.page(),
            per_page: request.per_page(),
            total,
            has_next,
            has_prev,
        }
    }
}
