//! The paginated, filtered list controller.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use futures::future;
use parking_lot::{Mutex, MutexGuard};

use super::outcome::{FetchStatus, LastError, MutationOutcome};
use super::pending::PendingSet;
use super::state::{FetchTicket, ListSnapshot, ListState};
use crate::client::ResourceClient;
use crate::config::ListConfig;
use crate::error::Error;
use crate::notify::{Notification, Notifier};
use crate::resources::{RecordId, Resource};
use crate::types::{FilterSet, FilterValue, PageRequest, Query};

/// A boxed, `'static` future returned by controller operations.
///
/// The synchronous part of an operation (token issue, validation, pending
/// flag) has already happened when the future is returned; awaiting it
/// performs the round-trip and the guarded commit. Dropping it before it
/// completes sends nothing further and withdraws its fetch, so the list
/// never stays `loading` on behalf of a future nobody polls.
pub type ListFuture<T> = Pin<Box<dyn Future<Output = T> + Send + 'static>>;

type Outcome<T> = Result<MutationOutcome<T>, Error>;

struct Shared<R: Resource> {
    state: Mutex<ListState<R::Record>>,
    pending: PendingSet<RecordId<R>>,
}

struct Handle<R: Resource> {
    resource: ResourceClient<R>,
    shared: Arc<Shared<R>>,
    notifier: Arc<dyn Notifier>,
    config: Arc<ListConfig>,
}

/// Withdraws a fetch whose future is dropped before it commits.
struct FetchGuard<R: Resource> {
    shared: Arc<Shared<R>>,
    token: u64,
}

impl<R: Resource> Drop for FetchGuard<R> {
    fn drop(&mut self) {
        self.shared.state.lock().abandon(self.token);
    }
}

impl<R: Resource> Clone for Handle<R> {
    fn clone(&self) -> Self {
        Self {
            resource: self.resource.clone(),
            shared: Arc::clone(&self.shared),
            notifier: Arc::clone(&self.notifier),
            config: Arc::clone(&self.config),
        }
    }
}

impl<R: Resource> Handle<R> {
    fn state(&self) -> MutexGuard<'_, ListState<R::Record>> {
        self.shared.state.lock()
    }

    fn search_path(&self) -> &str {
        self.config.search_path.as_deref().unwrap_or(R::SEARCH)
    }

    fn launch(&self, ticket: FetchTicket) -> ListFuture<Result<FetchStatus, Error>> {
        let query = Query::new()
            .filters(&ticket.filters)
            .page(PageRequest::new(ticket.page, self.config.page_size));
        let path = self.search_path().to_owned();
        let handle = self.clone();
        let guard = FetchGuard {
            shared: Arc::clone(&self.shared),
            token: ticket.token,
        };
        tracing::debug!(
            resource = R::PLURAL,
            page = ticket.page,
            token = ticket.token,
            "fetching page"
        );

        Box::pin(async move {
            let _guard = guard;
            let result = handle.resource.search_at(&path, &query).await;
            let status = handle.state().commit(&ticket, result);
            match status {
                Ok(FetchStatus::Committed) => {
                    tracing::debug!(resource = R::PLURAL, page = ticket.page, "page committed");
                    Ok(FetchStatus::Committed)
                }
                Err(error) => {
                    tracing::warn!(resource = R::PLURAL, error = %error, "fetch failed");
                    handle.notifier.notify(Notification::error(format!(
                        "Could not load {}: {}",
                        R::PLURAL,
                        error.message()
                    )));
                    Err(error)
                }
                other => other,
            }
        })
    }

    /// Surfaces the result of a mutation and re-fetches `page` on success.
    async fn settle<T>(
        self,
        page: u32,
        success: String,
        failure: String,
        result: Result<T, Error>,
    ) -> Outcome<T> {
        match result {
            Ok(value) => {
                let ticket = {
                    let mut state = self.state();
                    if state.detached {
                        None
                    } else {
                        Some(state.begin(page))
                    }
                };
                let Some(ticket) = ticket else {
                    return Ok(MutationOutcome::Applied {
                        value,
                        refresh: Ok(FetchStatus::Detached),
                    });
                };
                tracing::debug!(resource = R::PLURAL, page, "mutation applied");
                if self.config.notify_success {
                    self.notifier.notify(Notification::success(success));
                }
                let refresh = self.launch(ticket).await.map_err(|e| LastError::from(&e));
                Ok(MutationOutcome::Applied { value, refresh })
            }
            Err(error) => {
                tracing::warn!(resource = R::PLURAL, error = %error, "mutation failed");
                let detached = {
                    let mut state = self.state();
                    if !state.detached {
                        state.last_error = Some(LastError::from(&error));
                    }
                    state.detached
                };
                if !detached {
                    self.notifier
                        .notify(Notification::error(format!("{}: {}", failure, error.message())));
                }
                Err(error)
            }
        }
    }
}

/// Keeps one paginated, filterable, mutable list consistent with the
/// backend.
///
/// Opened with [`Client::list`](crate::Client::list). The controller owns
/// the working filters (edited freely), the applied filters (used for
/// fetches), the page cursor, and the last committed page of records.
///
/// Every fetch is tagged with a sequence token when it is triggered. A
/// response only commits if its token is still the latest, so a slow,
/// superseded response can never overwrite a newer one. Dropping the
/// controller detaches its state: responses still in flight resolve to
/// [`FetchStatus::Detached`] without writing or notifying.
///
/// Mutations never splice the local list. On success they re-fetch the
/// page that was active when they were called; on failure they leave the
/// collection untouched and surface the error once.
///
/// ## Example
///
/// ```rust,ignore
/// use shelfdesk::prelude::*;
///
/// let books = client.list::<Books>(TracingNotifier);
/// books.set_filter("title", "Dune");
/// books.apply_filters().await?;
///
/// let snapshot = books.snapshot();
/// for book in snapshot.items.iter() {
///     println!("{}", book.title);
/// }
/// ```
pub struct ResourceListController<R: Resource> {
    handle: Handle<R>,
}

impl<R: Resource> ResourceListController<R> {
    pub(crate) fn new(
        resource: ResourceClient<R>,
        notifier: Arc<dyn Notifier>,
        config: ListConfig,
    ) -> Self {
        Self {
            handle: Handle {
                resource,
                shared: Arc::new(Shared {
                    state: Mutex::new(ListState::default()),
                    pending: PendingSet::default(),
                }),
                notifier,
                config: Arc::new(config),
            },
        }
    }

    // ========================================================================
    // Filters and paging
    // ========================================================================

    /// Sets a working filter. Never fetches.
    pub fn set_filter(&self, key: &str, value: impl Into<FilterValue>) {
        if !R::FILTERS.is_empty() && !R::FILTERS.contains(&key) {
            tracing::debug!(resource = R::PLURAL, key, "filter not understood by search endpoint");
        }
        self.handle.state().working.set(key, value);
    }

    /// Removes a working filter. Never fetches.
    pub fn clear_filter(&self, key: &str) {
        self.handle.state().working.clear(key);
    }

    /// Removes every working filter. Never fetches.
    pub fn clear_filters(&self) {
        self.handle.state().working.clear_all();
    }

    /// Applies the working filters and fetches page 1.
    pub fn apply_filters(&self) -> ListFuture<Result<FetchStatus, Error>> {
        let ticket = {
            let mut state = self.handle.state();
            state.applied = state.working.clone();
            state.begin(1)
        };
        self.handle.launch(ticket)
    }

    /// Fetches page `page` with the applied filters.
    ///
    /// Pages outside `1..=total_pages` (with at least one page assumed
    /// before the first fetch) resolve to [`FetchStatus::OutOfRange`]
    /// without a request.
    pub fn set_page(&self, page: u32) -> ListFuture<Result<FetchStatus, Error>> {
        let ticket = {
            let mut state = self.handle.state();
            state.page_in_range(page).then(|| state.begin(page))
        };
        match ticket {
            Some(ticket) => self.handle.launch(ticket),
            None => {
                tracing::debug!(resource = R::PLURAL, page, "page out of range");
                Box::pin(future::ready(Ok(FetchStatus::OutOfRange)))
            }
        }
    }

    /// Re-fetches the current page with the applied filters.
    pub fn fetch(&self) -> ListFuture<Result<FetchStatus, Error>> {
        let ticket = {
            let mut state = self.handle.state();
            let page = state.page;
            state.begin(page)
        };
        self.handle.launch(ticket)
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Validates and creates a record.
    pub fn create(&self, payload: R::Payload) -> ListFuture<Outcome<Option<R::Record>>> {
        if let Some(invalid) = self.reject_invalid(&payload) {
            return invalid;
        }
        let page = self.handle.state().page;
        let handle = self.handle.clone();
        Box::pin(async move {
            let result = handle.resource.create(&payload).await;
            handle
                .settle(
                    page,
                    format!("{} created.", capitalize(R::NAME)),
                    format!("Could not create {}", R::NAME),
                    result,
                )
                .await
        })
    }

    /// Validates and updates a record.
    pub fn update(
        &self,
        id: RecordId<R>,
        payload: R::Payload,
    ) -> ListFuture<Outcome<Option<R::Record>>> {
        if let Some(invalid) = self.reject_invalid(&payload) {
            return invalid;
        }
        let page = self.handle.state().page;
        let handle = self.handle.clone();
        Box::pin(async move {
            let result = handle.resource.update(&id, &payload).await;
            handle
                .settle(
                    page,
                    format!("{} updated.", capitalize(R::NAME)),
                    format!("Could not update {} {}", R::NAME, id),
                    result,
                )
                .await
        })
    }

    /// Deletes a record. The current page is re-fetched, not page 1.
    pub fn delete(&self, id: RecordId<R>) -> ListFuture<Outcome<()>> {
        let page = self.handle.state().page;
        let handle = self.handle.clone();
        Box::pin(async move {
            let result = handle.resource.delete(&id).await;
            handle
                .settle(
                    page,
                    format!("{} deleted.", capitalize(R::NAME)),
                    format!("Could not delete {} {}", R::NAME, id),
                    result,
                )
                .await
        })
    }

    /// Runs a workflow action under the mutation rules.
    ///
    /// `action` receives the resource client and is invoked immediately.
    /// `label` names the action in notifications.
    ///
    /// ```rust,ignore
    /// reservations
    ///     .run_action("Cancel reservation", move |r| async move { r.cancel(&id).await })
    ///     .await?;
    /// ```
    pub fn run_action<F, Fut, T>(&self, label: impl Into<String>, action: F) -> ListFuture<Outcome<T>>
    where
        F: FnOnce(ResourceClient<R>) -> Fut,
        Fut: Future<Output = Result<T, Error>> + Send + 'static,
        T: Send + 'static,
    {
        let label = label.into();
        let page = self.handle.state().page;
        let action = action(self.handle.resource.clone());
        let handle = self.handle.clone();
        Box::pin(async move {
            let result = action.await;
            handle
                .settle(
                    page,
                    format!("{} succeeded.", label),
                    format!("{} failed", label),
                    result,
                )
                .await
        })
    }

    /// Runs `action` with the pending flag of `id` raised.
    ///
    /// The flag is up before `action` is invoked and comes down when the
    /// returned future completes or is dropped, whatever the outcome.
    pub fn select_with_loading_state<F, Fut>(
        &self,
        id: RecordId<R>,
        action: F,
    ) -> ListFuture<Fut::Output>
    where
        F: FnOnce() -> Fut,
        Fut: Future + Send + 'static,
        Fut::Output: Send + 'static,
    {
        let guard = self.handle.shared.pending.acquire(id);
        let action = action();
        Box::pin(async move {
            let _guard = guard;
            action.await
        })
    }

    fn reject_invalid<T: Send + 'static>(
        &self,
        payload: &R::Payload,
    ) -> Option<ListFuture<Outcome<T>>> {
        let report = R::validate(payload);
        if report.is_valid() {
            return None;
        }
        tracing::debug!(
            resource = R::PLURAL,
            fields = report.field_errors().len(),
            "payload rejected by validation"
        );
        Some(Box::pin(future::ready(Ok(MutationOutcome::Invalid(report)))))
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Returns `true` while an action started through
    /// [`select_with_loading_state`](Self::select_with_loading_state) for
    /// `id` is in flight.
    pub fn is_pending(&self, id: &RecordId<R>) -> bool {
        self.handle.shared.pending.contains(id)
    }

    /// Returns the current view.
    pub fn snapshot(&self) -> ListSnapshot<R::Record> {
        self.handle.state().snapshot()
    }

    /// Returns the filters being edited.
    pub fn working_filters(&self) -> FilterSet {
        self.handle.state().working.clone()
    }

    /// Returns the filters used by fetches.
    pub fn applied_filters(&self) -> FilterSet {
        self.handle.state().applied.clone()
    }

    /// Returns the resource client used for requests.
    pub fn resource(&self) -> &ResourceClient<R> {
        &self.handle.resource
    }

    /// Returns the controller's configuration.
    pub fn config(&self) -> &ListConfig {
        &self.handle.config
    }
}

impl<R: Resource> Drop for ResourceListController<R> {
    fn drop(&mut self) {
        self.handle.state().detached = true;
        tracing::debug!(resource = R::PLURAL, "list controller detached");
    }
}

impl<R: Resource> fmt::Debug for ResourceListController<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.handle.state();
        f.debug_struct("ResourceListController")
            .field("resource", &R::PLURAL)
            .field("page", &state.page)
            .field("total_pages", &state.total_pages)
            .field("loading", &state.loading)
            .field("applied", &state.applied)
            .finish_non_exhaustive()
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
