//! Per-list configuration.

/// Default number of rows per page in admin tables.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Page size used by the copy-selection modal.
pub const SELECTION_PAGE_SIZE: u32 = 12;

/// Configuration for one [`ResourceListController`](crate::list::ResourceListController).
///
/// ## Example
///
/// ```rust
/// use shelfdesk::ListConfig;
///
/// let config = ListConfig::new().with_page_size(12).quiet_success();
/// assert_eq!(config.page_size, 12);
/// assert!(!config.notify_success);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListConfig {
    /// Fixed page size sent as `size` with every search.
    pub page_size: u32,

    /// Whether successful mutations emit a success notification.
    pub notify_success: bool,

    /// Search endpoint overriding the resource's own, for member-scoped
    /// histories that return the same record type.
    pub search_path: Option<String>,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            notify_success: true,
            search_path: None,
        }
    }
}

impl ListConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration for the copy-selection grid.
    pub fn selection() -> Self {
        Self::default().with_page_size(SELECTION_PAGE_SIZE)
    }

    /// Sets the page size. Zero is treated as one.
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Suppresses success notifications; failures are still reported.
    #[must_use]
    pub fn quiet_success(mut self) -> Self {
        self.notify_success = false;
        self
    }

    /// Fetches pages from `path` instead of the resource's search endpoint.
    ///
    /// ```rust
    /// use shelfdesk::{ListConfig, Reservations};
    ///
    /// let config = ListConfig::new().with_search_path(Reservations::member_history_path(8));
    /// assert_eq!(config.search_path.as_deref(), Some("/api/reservations/user/8"));
    /// ```
    #[must_use]
    pub fn with_search_path(mut self, path: impl Into<String>) -> Self {
        self.search_path = Some(path.into());
        self
    }
}
