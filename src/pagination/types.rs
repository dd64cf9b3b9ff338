//! Pagination types
//!
//! Offset pagination against a total item count reported by the server.

use crate::types::PAGE_SIZE;

/// Query parameter carrying the offset
pub const OFFSET_PARAM: &str = "start";

/// Query parameter carrying the page size
pub const LIMIT_PARAM: &str = "count";

/// Result of the next page computation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextPage {
    /// More pages available, starting at this offset
    Continue {
        /// Offset of the next page
        offset: u32,
    },
    /// No more pages
    Done,
}

impl NextPage {
    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Check if this is a continue result
    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue { .. })
    }
}

/// Position in the history plus the server-reported total
///
/// `total_count` is learned from the first response that carries it and
/// is never replaced afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCursor {
    offset: u32,
    page_size: u32,
    total_count: Option<u32>,
    pages_fetched: u32,
}

impl Default for PageCursor {
    fn default() -> Self {
        Self::new(PAGE_SIZE)
    }
}

impl PageCursor {
    /// Create a cursor at offset 0
    pub fn new(page_size: u32) -> Self {
        Self {
            offset: 0,
            page_size: page_size.max(1),
            total_count: None,
            pages_fetched: 0,
        }
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn total_count(&self) -> Option<u32> {
        self.total_count
    }

    pub fn pages_fetched(&self) -> u32 {
        self.pages_fetched
    }

    /// Query parameters for the page at the current offset
    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            (OFFSET_PARAM, self.offset.to_string()),
            (LIMIT_PARAM, self.page_size.to_string()),
        ]
    }

    /// Record the server total; ignored once a total is known
    ///
    /// Returns true if this call set the total.
    pub fn observe_total(&mut self, total: Option<u32>) -> bool {
        match (self.total_count, total) {
            (None, Some(total)) => {
                self.total_count = Some(total);
                true
            }
            _ => false,
        }
    }

    /// Advance past a processed page and decide whether to continue
    ///
    /// `rows_on_page` is the number of row elements the page contained,
    /// accepted or not. It only matters while the total is still unknown:
    /// a short page is then taken as the last one.
    pub fn advance(&mut self, rows_on_page: usize) -> NextPage {
        self.pages_fetched += 1;
        self.offset = self.offset.saturating_add(self.page_size);

        let done = match self.total_count {
            Some(total) => self.offset >= total,
            None => rows_on_page < self.page_size as usize,
        };

        if done {
            NextPage::Done
        } else {
            NextPage::Continue {
                offset: self.offset,
            }
        }
    }

    /// Number of pages a run will fetch, once the total is known
    pub fn expected_pages(&self) -> Option<u32> {
        self.total_count
            .map(|total| total.div_ceil(self.page_size).max(1))
    }
}
