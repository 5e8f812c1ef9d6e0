//! Search query construction.

use super::filter::{FilterSet, FilterValue};

/// A page selection: 1-based page number plus fixed page size.
///
/// The backend counts pages from zero; [`wire_index`](Self::wire_index)
/// performs the conversion so nothing else has to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    size: u32,
}

impl PageRequest {
    /// Creates a page request. `page` is 1-based; zero is treated as one.
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page: page.max(1),
            size: size.max(1),
        }
    }

    /// Returns the first page of the given size.
    pub fn first(size: u32) -> Self {
        Self::new(1, size)
    }

    /// Returns the 1-based page number.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Returns the page size.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Returns the 0-based page index sent on the wire.
    pub fn wire_index(&self) -> u32 {
        self.page - 1
    }

    /// Returns the request for the following page.
    #[must_use]
    pub fn next(&self) -> Self {
        Self::new(self.page.saturating_add(1), self.size)
    }
}

/// Query parameters for a search request.
///
/// ## Example
///
/// ```rust
/// use shelfdesk::{FilterSet, PageRequest, Query};
///
/// let query = Query::new()
///     .filters(&FilterSet::new().with("name", "Tolkien"))
///     .page(PageRequest::new(2, 10));
///
/// assert_eq!(query.to_query_string(), "name=Tolkien&page=1&size=10");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pairs: Vec<(String, String)>,
}

impl Query {
    /// Creates an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a single parameter. Empty values are skipped.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        if let Some(value) = value.into().to_query_value() {
            self.pairs.push((key.into(), value));
        }
        self
    }

    /// Adds every non-empty value of a filter set.
    #[must_use]
    pub fn filters(mut self, filters: &FilterSet) -> Self {
        self.pairs.extend(filters.to_query_pairs());
        self
    }

    /// Adds `page` (0-based) and `size`, replacing any earlier page selection.
    #[must_use]
    pub fn page(mut self, page: PageRequest) -> Self {
        self.pairs.retain(|(key, _)| key != "page" && key != "size");
        self.pairs.push(("page".to_string(), page.wire_index().to_string()));
        self.pairs.push(("size".to_string(), page.size().to_string()));
        self
    }

    /// Returns the value of the first parameter named `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the parameters in insertion order.
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Returns `true` if the query has no parameters.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Renders the parameters as a percent-encoded query string.
    pub fn to_query_string(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_wire_index() {
        assert_eq!(PageRequest::new(1, 10).wire_index(), 0);
        assert_eq!(PageRequest::new(3, 10).wire_index(), 2);
        assert_eq!(PageRequest::new(0, 10).page(), 1);
        assert_eq!(PageRequest::new(2, 0).size(), 1);
        assert_eq!(PageRequest::first(12).next().page(), 2);
    }

    #[test]
    fn test_param_skips_empty() {
        let query = Query::new().param("title", "").param("status", FilterValue::enumerated("NEW"));
        assert_eq!(query.pairs(), &[("status".to_string(), "NEW".to_string())]);
    }

    #[test]
    fn test_page_replaces_previous() {
        let query = Query::new()
            .page(PageRequest::new(1, 10))
            .page(PageRequest::new(4, 10));
        assert_eq!(query.get("page"), Some("3"));
        assert_eq!(query.pairs().len(), 2);
    }

    #[test]
    fn test_query_string_is_encoded() {
        let query = Query::new().param("title", "War & Peace");
        assert_eq!(query.to_query_string(), "title=War%20%26%20Peace");
    }
}
