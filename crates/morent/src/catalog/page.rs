//! Pagination by slicing.
//!
//! One function serves every paged list: the catalog grid, the home page
//! recommendations and the review list on the detail view.

use std::num::NonZeroUsize;

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};

/// A validated, strictly positive page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PageSize(NonZeroUsize);

impl PageSize {
    /// Create a page size.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] when `size` is zero.
    pub fn new(size: usize) -> Result<Self> {
        NonZeroUsize::new(size)
            .map(Self)
            .ok_or_else(|| Error::invalid_argument("page_size", "must be at least 1"))
    }

    /// The page size as a plain count.
    #[must_use]
    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl TryFrom<usize> for PageSize {
    type Error = Error;

    fn try_from(size: usize) -> Result<Self> {
        Self::new(size)
    }
}

impl std::fmt::Display for PageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The currently visible, possibly truncated, prefix of a matched list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FilteredPage<'a, T> {
    /// Visible items, in input order.
    pub items: &'a [T],
    /// Number of matched items before truncation.
    pub total_count: usize,
    /// True when items exist beyond the visible page.
    pub has_more: bool,
}

impl<T> FilteredPage<'_, T> {
    /// Number of matched items hidden by truncation.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.total_count - self.items.len()
    }

    /// Whether nothing matched at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_count == 0
    }
}

/// Take the first page of `matched`, or all of it when `show_all` is set.
#[must_use]
pub fn paginate<T>(matched: &[T], page_size: PageSize, show_all: bool) -> FilteredPage<'_, T> {
    let total_count = matched.len();
    let visible = if show_all {
        total_count
    } else {
        total_count.min(page_size.get())
    };

    let page = FilteredPage {
        items: &matched[..visible],
        total_count,
        has_more: !show_all && total_count > page_size.get(),
    };
    debug!(
        total = total_count,
        visible,
        page_size = page_size.get(),
        show_all,
        "Paginated list"
    );
    page
}
