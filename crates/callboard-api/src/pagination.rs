//! Offset/limit pagination over filtered record lists

use serde::Serialize;

/// Page size when `limit` is not given
pub const DEFAULT_LIMIT: usize = 50;

/// Pagination information
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationInfo {
    /// Whether there are more results
    pub has_next: bool,

    /// Whether there are previous results
    pub has_prev: bool,

    /// Next page offset
    pub next_offset: Option<usize>,

    /// Previous page offset
    pub prev_offset: Option<usize>,
}

/// A resolved page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// Page size
    pub limit: usize,
    /// Records skipped before the page
    pub offset: usize,
}

impl Page {
    /// Apply defaults to raw query values
    #[must_use]
    pub fn new(limit: Option<u32>, offset: Option<u32>) -> Self {
        let to_usize = |v: u32| usize::try_from(v).unwrap_or(usize::MAX);
        Self {
            limit: limit.map_or(DEFAULT_LIMIT, to_usize),
            offset: offset.map_or(0, to_usize),
        }
    }

    /// The records on this page
    #[must_use]
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.offset.min(items.len());
        let end = start.saturating_add(self.limit).min(items.len());
        items.get(start..end).unwrap_or(&[])
    }

    /// Navigation for a result set of `total` records
    #[must_use]
    pub fn info(&self, total: usize) -> PaginationInfo {
        let next = self.offset.saturating_add(self.limit);
        let has_next = next < total;
        let has_prev = self.offset > 0;

        PaginationInfo {
            has_next,
            has_prev,
            next_offset: has_next.then_some(next),
            prev_offset: has_prev.then(|| {
                self.offset
                    .saturating_sub(self.limit)
                    .min(total.saturating_sub(self.limit))
            }),
        }
    }
}
