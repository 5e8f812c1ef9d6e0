//! Typed one-shot calls for a single resource.

use std::marker::PhantomData;

use crate::resources::{RecordId, Resource};
use crate::transport::Method;
use crate::types::{PageRequest, PagedResult, Query};
use crate::{Client, Error};

/// One-shot calls against a [`Resource`].
///
/// Obtained from [`Client::resource`]. Unlike a list controller it keeps no
/// state: every call is an independent round-trip.
///
/// ## Example
///
/// ```rust,ignore
/// use shelfdesk::{Authors, PageRequest, Query};
///
/// let authors = client.resource::<Authors>();
/// let page = authors.search(&Query::new().page(PageRequest::first(10))).await?;
/// let first = authors.get(&page.content[0].author_id).await?;
/// ```
pub struct ResourceClient<R> {
    client: Client,
    _resource: PhantomData<fn() -> R>,
}

impl<R> Clone for ResourceClient<R> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> std::fmt::Debug for ResourceClient<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceClient")
            .field("resource", &R::PLURAL)
            .finish_non_exhaustive()
    }
}

impl<R: Resource> ResourceClient<R> {
    pub(crate) fn new(client: Client) -> Self {
        Self {
            client,
            _resource: PhantomData,
        }
    }

    /// Returns the underlying client.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Runs a paginated search on the resource's search endpoint.
    ///
    /// # Errors
    ///
    /// Fails on transport errors, non-2xx statuses, and bodies that are not a
    /// consistent page.
    pub async fn search(&self, query: &Query) -> Result<PagedResult<R::Record>, Error> {
        self.search_at(R::SEARCH, query).await
    }

    /// Runs a paginated search on an alternative endpoint that returns the
    /// same record type, such as a member's own history.
    pub async fn search_at(
        &self,
        path: &str,
        query: &Query,
    ) -> Result<PagedResult<R::Record>, Error> {
        let page: PagedResult<R::Record> =
            self.client.inner().api_get(path, query.clone()).await?;
        page.validate()
    }

    /// Fetches one record.
    pub async fn get(&self, id: &RecordId<R>) -> Result<R::Record, Error> {
        self.client
            .inner()
            .api_get(&R::record_path(id), Query::new())
            .await
    }

    /// Creates a record. Returns the created record when the server echoes it.
    pub async fn create(&self, payload: &R::Payload) -> Result<Option<R::Record>, Error> {
        self.client
            .inner()
            .api_write(Method::Post, R::COLLECTION, Some(payload))
            .await
    }

    /// Replaces a record. Returns the updated record when the server echoes it.
    pub async fn update(
        &self,
        id: &RecordId<R>,
        payload: &R::Payload,
    ) -> Result<Option<R::Record>, Error> {
        self.client
            .inner()
            .api_write(Method::Put, &R::record_path(id), Some(payload))
            .await
    }

    /// Deletes a record.
    pub async fn delete(&self, id: &RecordId<R>) -> Result<(), Error> {
        self.client.inner().api_delete(&R::record_path(id)).await
    }

    /// Walks every page of a search and concatenates the records.
    ///
    /// `query` supplies the filters; any page selection in it is replaced.
    /// Stops at the page flagged `last`, at `totalPages`, or at the first
    /// empty page, whichever comes first.
    pub async fn collect_all(&self, query: &Query, page_size: u32) -> Result<Vec<R::Record>, Error> {
        let mut request = PageRequest::first(page_size);
        let mut records = Vec::new();
        loop {
            let page = self.search(&query.clone().page(request)).await?;
            let done = page.last || page.is_empty() || request.page() >= page.total_pages;
            records.extend(page.content);
            if done {
                break;
            }
            request = request.next();
        }
        tracing::debug!(resource = R::PLURAL, count = records.len(), "collected all pages");
        Ok(records)
    }

    /// Sends a body-less or JSON `PUT`/`POST` to a path below the
    /// collection, discarding any response body.
    pub(crate) async fn command<T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&T>,
    ) -> Result<(), Error>
    where
        T: serde::Serialize + ?Sized,
    {
        self.client
            .inner()
            .api_write::<T, serde::de::IgnoredAny>(method, path, body)
            .await
            .map(|_| ())
    }
}
