//! Paged search results.

use serde::{Deserialize, Serialize};

use crate::Error;

/// One page of a paginated search, as returned by the backend.
///
/// Wire shape: `{content: T[], totalPages, totalElements, number, last}`.
/// The counters are required; `number` (the 0-based page index) and `last`
/// may be omitted.
///
/// ## Example
///
/// ```rust
/// use shelfdesk::PagedResult;
///
/// let page: PagedResult<String> = serde_json::from_str(
///     r#"{"content":["a","b"],"totalPages":3,"totalElements":25,"last":false}"#,
/// ).unwrap();
/// assert_eq!(page.len(), 2);
/// assert!(page.has_next());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResult<T> {
    /// The records in this page.
    pub content: Vec<T>,
    /// Total number of pages for the query.
    pub total_pages: u32,
    /// Total number of records for the query.
    pub total_elements: u64,
    /// 0-based index of this page, when the server reports it.
    #[serde(default)]
    pub number: Option<u32>,
    /// Whether this is the final page.
    #[serde(default)]
    pub last: bool,
}

impl<T> PagedResult<T> {
    /// Returns `true` if this page is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Returns the number of records in this page.
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Returns `true` if there are more pages after this one.
    ///
    /// A page flagged `last` never has a successor. Otherwise the page index
    /// is compared against `total_pages`; without an index, only a result
    /// spanning more than one page can continue.
    pub fn has_next(&self) -> bool {
        if self.last {
            return false;
        }
        match self.number {
            Some(index) => index.saturating_add(1) < self.total_pages,
            None => self.total_pages > 1,
        }
    }

    /// Rejects pages whose counters contradict their content.
    pub(crate) fn validate(self) -> Result<Self, Error> {
        if self.total_pages == 0 && !self.content.is_empty() {
            return Err(Error::invalid_response(format!(
                "page holds {} records but reports zero pages",
                self.content.len()
            )));
        }
        if (self.content.len() as u64) > self.total_elements {
            return Err(Error::invalid_response(format!(
                "page holds {} records but reports {} in total",
                self.content.len(),
                self.total_elements
            )));
        }
        Ok(self)
    }
}

impl<T> Default for PagedResult<T> {
    fn default() -> Self {
        Self {
            content: Vec::new(),
            total_pages: 0,
            total_elements: 0,
            number: None,
            last: true,
        }
    }
}
