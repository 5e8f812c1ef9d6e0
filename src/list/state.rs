//! Controller state and the commit discipline.

use std::collections::BTreeSet;
use std::sync::Arc;

use super::outcome::{FetchStatus, LastError};
use crate::error::Error;
use crate::types::{FilterSet, PagedResult};

/// A read-only view of a list controller.
///
/// `items` is shared with the controller; taking a snapshot never copies
/// the collection.
#[derive(Debug, Clone)]
pub struct ListSnapshot<T> {
    /// Records of the last committed page.
    pub items: Arc<Vec<T>>,
    /// 1-based page of the latest request.
    pub page: u32,
    /// Page count of the last committed response.
    pub total_pages: u32,
    /// Record count of the last committed response.
    pub total_elements: u64,
    /// Whether the latest fetch is still in flight.
    pub loading: bool,
    /// Failure surfaced since the last committed fetch.
    pub last_error: Option<LastError>,
}

impl<T> ListSnapshot<T> {
    /// Returns `true` if a following page exists.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Returns `true` if a preceding page exists.
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

/// A fetch issued under a sequence token.
#[derive(Debug, Clone)]
pub(crate) struct FetchTicket {
    pub token: u64,
    pub page: u32,
    pub filters: FilterSet,
}

#[derive(Debug)]
pub(crate) struct ListState<T> {
    pub working: FilterSet,
    pub applied: FilterSet,
    pub page: u32,
    pub total_pages: u32,
    pub total_elements: u64,
    pub items: Arc<Vec<T>>,
    pub loading: bool,
    pub last_error: Option<LastError>,
    pub detached: bool,
    next_token: u64,
    committed_token: u64,
    live: BTreeSet<u64>,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            working: FilterSet::new(),
            applied: FilterSet::new(),
            page: 1,
            total_pages: 0,
            total_elements: 0,
            items: Arc::new(Vec::new()),
            loading: false,
            last_error: None,
            detached: false,
            next_token: 0,
            committed_token: 0,
            live: BTreeSet::new(),
        }
    }
}

impl<T> ListState<T> {
    /// Issues a new token for `page`, superseding every earlier one.
    pub fn begin(&mut self, page: u32) -> FetchTicket {
        self.next_token += 1;
        self.live.insert(self.next_token);
        self.page = page.max(1);
        self.loading = true;
        FetchTicket {
            token: self.next_token,
            page: self.page,
            filters: self.applied.clone(),
        }
    }

    /// Withdraws a fetch that will never report back.
    ///
    /// The newest fetch still outstanding becomes the one allowed to commit.
    /// A token that already committed or was discarded is ignored.
    pub fn abandon(&mut self, token: u64) {
        if !self.live.remove(&token) {
            return;
        }
        tracing::debug!(token, "fetch abandoned before settling");
        self.loading = !self.live.is_empty();
    }

    fn is_current(&self, token: u64) -> bool {
        token > self.committed_token
            && self.live.contains(&token)
            && self.live.range(token + 1..).next().is_none()
    }

    /// Returns `true` if `page` may be requested.
    pub fn page_in_range(&self, page: u32) -> bool {
        page >= 1 && page <= self.total_pages.max(1)
    }

    /// Applies the response of the fetch issued under `ticket`.
    ///
    /// Only the newest outstanding fetch may write. A stale failure is
    /// dropped like a stale success. The error is handed back only when it
    /// belongs to the current fetch and must be surfaced.
    pub fn commit(
        &mut self,
        ticket: &FetchTicket,
        result: Result<PagedResult<T>, Error>,
    ) -> Result<FetchStatus, Error> {
        if self.detached {
            return Ok(FetchStatus::Detached);
        }
        if !self.is_current(ticket.token) {
            self.live.remove(&ticket.token);
            tracing::debug!(token = ticket.token, latest = self.next_token, "discarding stale response");
            return Ok(FetchStatus::Superseded);
        }
        self.committed_token = ticket.token;
        self.live.clear();
        self.loading = false;
        self.page = ticket.page;
        match result {
            Ok(page) => {
                self.total_pages = page.total_pages;
                self.total_elements = page.total_elements;
                self.items = Arc::new(page.content);
                self.last_error = None;
                Ok(FetchStatus::Committed)
            }
            Err(error) => {
                self.last_error = Some(LastError::from(&error));
                Err(error)
            }
        }
    }

    pub fn snapshot(&self) -> ListSnapshot<T> {
        ListSnapshot {
            items: Arc::clone(&self.items),
            page: self.page,
            total_pages: self.total_pages,
            total_elements: self.total_elements,
            loading: self.loading,
            last_error: self.last_error.clone(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn page(content: Vec<u32>, total_pages: u32) -> PagedResult<u32> {
        PagedResult {
            total_elements: content.len() as u64,
            content,
            total_pages,
            number: None,
            last: false,
        }
    }

    #[test]
    fn test_latest_token_commits() {
        let mut state = ListState::default();
        let ticket = state.begin(1);
        assert!(state.loading);

        assert_eq!(state.commit(&ticket, Ok(page(vec![1, 2], 3))).unwrap(), FetchStatus::Committed);
        assert!(!state.loading);
        assert_eq!(*state.items, vec![1, 2]);
        assert_eq!(state.total_pages, 3);
    }

    #[test]
    fn test_stale_token_is_discarded() {
        let mut state = ListState::default();
        let first = state.begin(1);
        let second = state.begin(2);

        state.commit(&second, Ok(page(vec![20], 2))).unwrap();
        assert_eq!(state.commit(&first, Ok(page(vec![10], 2))).unwrap(), FetchStatus::Superseded);
        assert_eq!(*state.items, vec![20]);
        assert_eq!(state.page, 2);
    }

    #[test]
    fn test_stale_failure_is_silent() {
        let mut state: ListState<u32> = ListState::default();
        let first = state.begin(1);
        let _second = state.begin(1);

        let status = state.commit(&first, Err(Error::unavailable("down"))).unwrap();
        assert_eq!(status, FetchStatus::Superseded);
        assert!(state.last_error.is_none());
        assert!(state.loading);
    }

    #[test]
    fn test_abandoned_latest_lets_previous_commit() {
        let mut state = ListState::default();
        let first = state.begin(3);
        let second = state.begin(1);

        state.abandon(second.token);
        assert!(state.loading);

        assert_eq!(state.commit(&first, Ok(page(vec![7], 3))).unwrap(), FetchStatus::Committed);
        assert!(!state.loading);
        assert_eq!(*state.items, vec![7]);
        assert_eq!(state.page, 3);
    }

    #[test]
    fn test_abandoning_only_fetch_clears_loading() {
        let mut state: ListState<u32> = ListState::default();
        let ticket = state.begin(1);
        state.abandon(ticket.token);
        assert!(!state.loading);
        assert!(state.last_error.is_none());
    }

    #[test]
    fn test_abandon_after_commit_is_ignored() {
        let mut state = ListState::default();
        let ticket = state.begin(1);
        state.commit(&ticket, Ok(page(vec![1], 1))).unwrap();

        let next = state.begin(1);
        state.abandon(ticket.token);
        assert!(state.loading);
        state.abandon(next.token);
        assert!(!state.loading);
    }

    #[test]
    fn test_older_fetch_cannot_commit_after_newer() {
        let mut state = ListState::default();
        let first = state.begin(1);
        let second = state.begin(2);
        let third = state.begin(3);

        state.abandon(third.token);
        state.commit(&second, Ok(page(vec![2], 3))).unwrap();
        assert_eq!(state.commit(&first, Ok(page(vec![1], 3))).unwrap(), FetchStatus::Superseded);
        assert_eq!(*state.items, vec![2]);
        assert_eq!(state.page, 2);
    }

    #[test]
    fn test_failure_keeps_items() {
        let mut state = ListState::default();
        let ticket = state.begin(1);
        state.commit(&ticket, Ok(page(vec![1], 1))).unwrap();

        let ticket = state.begin(1);
        let err = state.commit(&ticket, Err(Error::timeout("slow"))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Timeout);
        assert_eq!(*state.items, vec![1]);
        assert_eq!(state.last_error.as_ref().unwrap().kind, ErrorKind::Timeout);
        assert!(!state.loading);
    }

    #[test]
    fn test_detached_never_writes() {
        let mut state = ListState::default();
        let ticket = state.begin(1);
        state.detached = true;

        assert_eq!(state.commit(&ticket, Ok(page(vec![1], 1))).unwrap(), FetchStatus::Detached);
        assert!(state.items.is_empty());
    }

    #[test]
    fn test_page_range() {
        let mut state: ListState<u32> = ListState::default();
        assert!(state.page_in_range(1));
        assert!(!state.page_in_range(2));
        assert!(!state.page_in_range(0));

        state.total_pages = 3;
        assert!(state.page_in_range(3));
        assert!(!state.page_in_range(4));
    }

    #[test]
    fn test_ticket_carries_applied_filters() {
        let mut state: ListState<u32> = ListState::default();
        state.working.set("name", "Tolkien");
        assert!(state.begin(1).filters.is_empty());

        state.applied = state.working.clone();
        assert_eq!(state.begin(1).filters, state.applied);
    }
}
