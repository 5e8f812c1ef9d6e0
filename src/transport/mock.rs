//! Mock transport implementation for testing.
//!
//! Serves canned responses from an in-memory route table and records every
//! request it receives. In hold mode requests are parked until the test
//! answers them, which makes response ordering fully controllable.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use bytes::Bytes;
use parking_lot::RwLock;
use tokio::sync::{mpsc, oneshot, Mutex as AsyncMutex};

use super::traits::{ApiRequest, ApiResponse, Method, Transport, TransportClient, TransportStats};
use crate::Error;

// ============================================================================
// Canned Responses
// ============================================================================

/// A canned response served by [`MockTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockResponse {
    status: u16,
    body: Bytes,
    delay: Option<Duration>,
}

impl MockResponse {
    /// A `200 OK` response with a JSON body.
    pub fn json(value: serde_json::Value) -> Self {
        Self::status(200).with_json(&value)
    }

    /// A response with the given status and an empty body.
    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: Bytes::new(),
            delay: None,
        }
    }

    /// A `200 OK` search page with the backend's paged shape.
    pub fn page(content: serde_json::Value, total_pages: u32, total_elements: u64) -> Self {
        Self::json(serde_json::json!({
            "content": content,
            "totalPages": total_pages,
            "totalElements": total_elements,
        }))
    }

    /// A failure response whose body carries `message`.
    pub fn error(status: u16, message: &str) -> Self {
        Self::status(status).with_json(&serde_json::json!({ "message": message }))
    }

    /// Replaces the body with serialized JSON.
    #[must_use]
    pub fn with_json(mut self, value: &serde_json::Value) -> Self {
        self.body = Bytes::from(value.to_string());
        self
    }

    /// Replaces the body with raw bytes.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Delays the response. Ignored when answering a held request.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    fn into_response(self) -> ApiResponse {
        ApiResponse::new(self.status, self.body)
    }
}

struct Route {
    method: Method,
    path: String,
    response: MockResponse,
    once: bool,
}

// ============================================================================
// Held Requests
// ============================================================================

/// A request parked by a [`MockTransport`] in hold mode.
///
/// Dropping it without answering fails the request with a connection error.
pub struct HeldRequest {
    request: ApiRequest,
    reply: oneshot::Sender<Result<ApiResponse, Error>>,
}

impl HeldRequest {
    /// Returns the parked request.
    pub fn request(&self) -> &ApiRequest {
        &self.request
    }

    /// Answers the request.
    pub fn respond(self, response: MockResponse) {
        let _ = self.reply.send(Ok(response.into_response()));
    }

    /// Fails the request as if the network had failed.
    pub fn fail(self, error: Error) {
        let _ = self.reply.send(Err(error));
    }
}

impl std::fmt::Debug for HeldRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeldRequest")
            .field("request", &self.request)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Mock Transport
// ============================================================================

/// Mock transport for testing.
///
/// Routes match on method and exact path, in registration order. One-shot
/// routes are removed after their first use. Unmatched requests get a `404`.
///
/// ## Example
///
/// ```rust
/// use shelfdesk::transport::{ApiRequest, Method, MockResponse, MockTransport, TransportClient};
///
/// # let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
/// # rt.block_on(async {
/// let mock = MockTransport::new();
/// mock.on(Method::Get, "/api/books/count", MockResponse::json(serde_json::json!(42)));
///
/// let response = mock.send(ApiRequest::new(Method::Get, "/api/books/count")).await.unwrap();
/// assert_eq!(response.text(), "42");
/// assert_eq!(mock.request_count(), 1);
/// # });
/// ```
pub struct MockTransport {
    routes: RwLock<Vec<Route>>,
    requests: RwLock<Vec<ApiRequest>>,
    request_count: AtomicU64,
    simulate_failure: RwLock<Option<Error>>,
    hold: AtomicBool,
    held_tx: mpsc::UnboundedSender<HeldRequest>,
    held_rx: AsyncMutex<mpsc::UnboundedReceiver<HeldRequest>>,
}

impl MockTransport {
    /// Creates a new mock transport with no routes.
    pub fn new() -> Self {
        let (held_tx, held_rx) = mpsc::unbounded_channel();
        Self {
            routes: RwLock::new(Vec::new()),
            requests: RwLock::new(Vec::new()),
            request_count: AtomicU64::new(0),
            simulate_failure: RwLock::new(None),
            hold: AtomicBool::new(false),
            held_tx,
            held_rx: AsyncMutex::new(held_rx),
        }
    }

    /// Serves `response` for every matching request.
    pub fn on(&self, method: Method, path: impl Into<String>, response: MockResponse) {
        self.add_route(method, path.into(), response, false);
    }

    /// Serves `response` for the next matching request only.
    pub fn once(&self, method: Method, path: impl Into<String>, response: MockResponse) {
        self.add_route(method, path.into(), response, true);
    }

    fn add_route(&self, method: Method, path: String, response: MockResponse, once: bool) {
        self.routes.write().push(Route {
            method,
            path,
            response,
            once,
        });
    }

    /// Removes all routes.
    pub fn clear_routes(&self) {
        self.routes.write().clear();
    }

    /// Parks subsequent requests until answered through [`next_held`](Self::next_held).
    pub fn hold_requests(&self, hold: bool) {
        self.hold.store(hold, Ordering::SeqCst);
    }

    /// Waits for the next parked request.
    pub async fn next_held(&self) -> Option<HeldRequest> {
        self.held_rx.lock().await.recv().await
    }

    /// Returns the next parked request if one is already waiting.
    pub fn try_next_held(&self) -> Option<HeldRequest> {
        self.held_rx.try_lock().ok()?.try_recv().ok()
    }

    /// Sets a failure to simulate on the next request.
    pub fn set_failure(&self, error: Error) {
        *self.simulate_failure.write() = Some(error);
    }

    /// Clears any simulated failure.
    pub fn clear_failure(&self) {
        *self.simulate_failure.write() = None;
    }

    /// Returns the number of requests made.
    pub fn request_count(&self) -> u64 {
        self.request_count.load(Ordering::Relaxed)
    }

    /// Returns every request received, oldest first.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.read().clone()
    }

    /// Returns the requests that targeted `method` and `path`.
    pub fn requests_to(&self, method: Method, path: &str) -> Vec<ApiRequest> {
        self.requests
            .read()
            .iter()
            .filter(|r| r.is(method, path))
            .cloned()
            .collect()
    }

    /// Returns the most recent request.
    pub fn last_request(&self) -> Option<ApiRequest> {
        self.requests.read().last().cloned()
    }

    /// Checks if a failure should be simulated.
    fn check_failure(&self) -> Result<(), Error> {
        let failure = self.simulate_failure.write().take();
        if let Some(error) = failure {
            return Err(error);
        }
        Ok(())
    }

    fn record(&self, request: &ApiRequest) {
        self.request_count.fetch_add(1, Ordering::Relaxed);
        self.requests.write().push(request.clone());
    }

    fn route(&self, request: &ApiRequest) -> MockResponse {
        let mut routes = self.routes.write();
        let Some(index) = routes
            .iter()
            .position(|r| request.is(r.method, &r.path))
        else {
            return MockResponse::error(
                404,
                &format!("no mock route for {} {}", request.method, request.path),
            );
        };
        if routes[index].once {
            routes.remove(index).response
        } else {
            routes[index].response.clone()
        }
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MockTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockTransport")
            .field("routes", &self.routes.read().len())
            .field("request_count", &self.request_count())
            .field("hold", &self.hold.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

#[async_trait::async_trait]
impl TransportClient for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, Error> {
        self.record(&request);
        self.check_failure()?;

        if self.hold.load(Ordering::SeqCst) {
            let (reply, answer) = oneshot::channel();
            self.held_tx
                .send(HeldRequest { request, reply })
                .map_err(|_| Error::internal("mock transport is shutting down"))?;
            return answer
                .await
                .map_err(|_| Error::connection("held request dropped without a response"))?;
        }

        let response = self.route(&request);
        if let Some(delay) = response.delay {
            tokio::time::sleep(delay).await;
        }
        Ok(response.into_response())
    }

    fn transport_type(&self) -> Transport {
        Transport::Mock
    }

    fn stats(&self) -> TransportStats {
        TransportStats {
            requests_sent: self.request_count(),
            requests_failed: 0,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[tokio::test]
    async fn test_routes_match_method_and_path() {
        let mock = MockTransport::new();
        mock.on(Method::Get, "/api/books/count", MockResponse::json(serde_json::json!(7)));

        let hit = mock
            .send(ApiRequest::new(Method::Get, "/api/books/count"))
            .await
            .unwrap();
        assert_eq!(hit.status, 200);
        assert_eq!(hit.text(), "7");

        let miss = mock
            .send(ApiRequest::new(Method::Post, "/api/books/count"))
            .await
            .unwrap();
        assert_eq!(miss.status, 404);
        assert_eq!(mock.request_count(), 2);
    }

    #[tokio::test]
    async fn test_once_routes_are_consumed() {
        let mock = MockTransport::new();
        mock.once(Method::Delete, "/api/authors/1", MockResponse::status(500));
        mock.on(Method::Delete, "/api/authors/1", MockResponse::status(204));

        let first = mock.send(ApiRequest::new(Method::Delete, "/api/authors/1")).await.unwrap();
        let second = mock.send(ApiRequest::new(Method::Delete, "/api/authors/1")).await.unwrap();
        assert_eq!(first.status, 500);
        assert_eq!(second.status, 204);
    }

    #[tokio::test]
    async fn test_simulated_failure_applies_once() {
        let mock = MockTransport::new();
        mock.on(Method::Get, "/api/users/count", MockResponse::json(serde_json::json!(1)));
        mock.set_failure(Error::timeout("slow network"));

        let err = mock
            .send(ApiRequest::new(Method::Get, "/api/users/count"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Timeout);
        assert!(mock.send(ApiRequest::new(Method::Get, "/api/users/count")).await.is_ok());
    }

    #[tokio::test]
    async fn test_held_requests_answer_in_chosen_order() {
        let mock = std::sync::Arc::new(MockTransport::new());
        mock.hold_requests(true);

        let first = tokio::spawn({
            let mock = mock.clone();
            async move { mock.send(ApiRequest::new(Method::Get, "/a")).await }
        });
        let held_a = mock.next_held().await.unwrap();
        let second = tokio::spawn({
            let mock = mock.clone();
            async move { mock.send(ApiRequest::new(Method::Get, "/b")).await }
        });
        let held_b = mock.next_held().await.unwrap();
        assert_eq!(held_a.request().path, "/a");

        held_b.respond(MockResponse::status(202));
        held_a.respond(MockResponse::status(201));

        assert_eq!(second.await.unwrap().unwrap().status, 202);
        assert_eq!(first.await.unwrap().unwrap().status, 201);
    }

    #[tokio::test]
    async fn test_dropped_held_request_fails() {
        let mock = std::sync::Arc::new(MockTransport::new());
        mock.hold_requests(true);

        let pending = tokio::spawn({
            let mock = mock.clone();
            async move { mock.send(ApiRequest::new(Method::Get, "/a")).await }
        });
        drop(mock.next_held().await.unwrap());

        let err = pending.await.unwrap().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Connection);
    }

    #[tokio::test]
    async fn test_requests_are_recorded() {
        let mock = MockTransport::new();
        mock.send(ApiRequest::new(Method::Get, "/x")).await.unwrap();
        mock.send(ApiRequest::new(Method::Put, "/y")).await.unwrap();

        assert_eq!(mock.requests().len(), 2);
        assert_eq!(mock.requests_to(Method::Put, "/y").len(), 1);
        assert_eq!(mock.last_request().unwrap().path, "/y");
    }
}
