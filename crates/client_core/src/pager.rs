//! Slicing search results into pages of 30, 50 or 100 rows.

use shared::protocol::{Repository, RepositorySearchResponse};
use thiserror::Error;

pub type SearchResult = RepositorySearchResponse;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PageSize {
    #[default]
    Thirty,
    Fifty,
    OneHundred,
}

impl PageSize {
    pub const OPTIONS: [PageSize; 3] = [Self::Thirty, Self::Fifty, Self::OneHundred];

    pub fn get(self) -> usize {
        match self {
            Self::Thirty => 30,
            Self::Fifty => 50,
            Self::OneHundred => 100,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unsupported page size {0}, expected one of 30, 50, 100")]
pub struct PageSizeError(pub usize);

impl TryFrom<usize> for PageSize {
    type Error = PageSizeError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::OPTIONS
            .into_iter()
            .find(|size| size.get() == value)
            .ok_or(PageSizeError(value))
    }
}

/// Caller-owned pagination position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageRequest {
    pub page_index: usize,
    pub page_size: PageSize,
}

impl PageRequest {
    /// A new page size always starts again from the first page.
    pub fn with_page_size(self, page_size: PageSize) -> Self {
        Self {
            page_index: 0,
            page_size,
        }
    }

    pub fn with_page_index(self, page_index: usize) -> Self {
        Self { page_index, ..self }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView<'a> {
    pub visible_items: &'a [Repository],
    pub page_index: usize,
    pub page_size: PageSize,
    pub total_count: u64,
    pub range_label: String,
    pub has_previous_page: bool,
    pub has_next_page: bool,
    empty_result: bool,
}

impl PageView<'_> {
    /// The search returned nothing at all, as opposed to an out-of-range page.
    pub fn is_empty_result(&self) -> bool {
        self.empty_result
    }
}

pub fn page(results: &SearchResult, page_index: usize, page_size: PageSize) -> PageView<'_> {
    let size = page_size.get();
    let start = page_index.saturating_mul(size);
    let end = start.saturating_add(size);
    let visible_items = results
        .items
        .get(start..end.min(results.items.len()))
        .unwrap_or(&[]);

    let total_count = results.total_count;
    let low = if total_count == 0 {
        0
    } else {
        (start as u64).saturating_add(1)
    };
    let high = total_count.min(end as u64);

    PageView {
        visible_items,
        page_index,
        page_size,
        total_count,
        range_label: format!("{low}–{high} of {total_count}"),
        has_previous_page: page_index > 0,
        has_next_page: (end as u64) < total_count,
        empty_result: results.items.is_empty(),
    }
}
