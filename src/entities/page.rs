use serde::{Deserialize, Serialize};

/// Pagination envelope as shaped by the server.
///
/// Consumed verbatim: totals and navigation flags are never recomputed on
/// the client. Page indices are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub page_index: u32,
    pub page_size: u32,
    pub total_count: u64,
    pub total_pages: u32,
    pub can_previous_page: bool,
    pub can_next_page: bool,
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

impl<T> Page<T> {
    /// Wrap an unpaginated listing as a single page.
    ///
    /// Used when the list endpoint without pagination is configured; the
    /// server sent everything, so there is exactly one page.
    pub fn single(items: Vec<T>) -> Self {
        let len = items.len();
        Self {
            page_index: 1,
            page_size: len as u32,
            total_count: len as u64,
            total_pages: 1,
            can_previous_page: false,
            can_next_page: false,
            data: items,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Body of a course listing call: either a paginated envelope or, from the
/// unpaginated endpoint, a bare array.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Listing<T> {
    All(Vec<T>),
    Paged(Page<T>),
}

impl<T> Listing<T> {
    pub fn into_page(self) -> Page<T> {
        match self {
            Listing::All(items) => Page::single(items),
            Listing::Paged(page) => page,
        }
    }
}
