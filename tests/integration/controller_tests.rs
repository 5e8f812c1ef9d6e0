//! List controller behavior over the mock transport.

use std::time::Duration;

use serde_json::json;
use shelfdesk::testing::{book_copy, mock_client, reservation};
use shelfdesk::transport::{Method, MockResponse};
use shelfdesk::{
    AuthorPayload, Authors, BookCopies, ErrorKind, FetchStatus, ListConfig, RecordingNotifier,
    Reservations, Severity,
};

use crate::common::{authors, init_tracing};

fn author_page(first: i64, count: i64, total_pages: u32, total_elements: u64) -> MockResponse {
    MockResponse::page(json!(authors(first, count)), total_pages, total_elements)
}

#[tokio::test]
async fn test_apply_filters_supersedes_page_change() {
    init_tracing();
    let (client, mock) = mock_client();
    let list = client.list::<Authors>(RecordingNotifier::new());

    mock.once(Method::Get, "/api/authors", author_page(1, 10, 3, 25));
    list.fetch().await.unwrap();

    mock.hold_requests(true);
    let paging = tokio::spawn(list.set_page(3));
    let slow = mock.next_held().await.unwrap();

    list.set_filter("name", "Tolkien");
    let searching = tokio::spawn(list.apply_filters());
    let fast = mock.next_held().await.unwrap();
    assert_eq!(fast.request().query.get("name"), Some("Tolkien"));
    assert_eq!(fast.request().query.get("page"), Some("0"));

    fast.respond(author_page(100, 1, 1, 1));
    assert_eq!(searching.await.unwrap().unwrap(), FetchStatus::Committed);

    slow.respond(author_page(21, 5, 3, 25));
    assert_eq!(paging.await.unwrap().unwrap(), FetchStatus::Superseded);

    let snapshot = list.snapshot();
    assert_eq!(snapshot.page, 1);
    assert_eq!(snapshot.total_pages, 1);
    assert_eq!(snapshot.items[0].author_id, 100);
}

#[tokio::test]
async fn test_stale_failure_is_not_reported() {
    let (client, mock) = mock_client();
    let notes = RecordingNotifier::new();
    let list = client.list::<Authors>(notes.clone());
    mock.hold_requests(true);

    let first = tokio::spawn(list.fetch());
    let held_first = mock.next_held().await.unwrap();
    let second = tokio::spawn(list.fetch());
    let held_second = mock.next_held().await.unwrap();

    held_first.respond(MockResponse::error(500, "stale failure"));
    assert_eq!(first.await.unwrap().unwrap(), FetchStatus::Superseded);
    assert!(list.snapshot().loading);

    held_second.respond(author_page(1, 2, 1, 2));
    assert_eq!(second.await.unwrap().unwrap(), FetchStatus::Committed);
    assert_eq!(notes.errors(), 0);
    assert!(list.snapshot().last_error.is_none());
}

#[tokio::test]
async fn test_create_refetches_page_active_at_call_time() {
    let (client, mock) = mock_client();
    let notes = RecordingNotifier::new();
    let list = client.list::<Authors>(notes.clone());

    mock.on(Method::Get, "/api/authors", author_page(1, 10, 3, 25));
    list.fetch().await.unwrap();
    list.set_page(2).await.unwrap();

    mock.on(Method::Post, "/api/authors", MockResponse::status(201));
    let outcome = list
        .create(AuthorPayload {
            name: "Octavia E. Butler".into(),
            biography: "Author of Kindred and the Parable series.".into(),
            birth_date: chrono::NaiveDate::from_ymd_opt(1947, 6, 22),
        })
        .await
        .unwrap();

    assert!(outcome.is_applied());
    assert_eq!(outcome.refresh(), Some(&Ok(FetchStatus::Committed)));
    // Empty 201 body: no record echoed.
    assert_eq!(outcome.into_value(), Some(None));

    let searches = mock.requests_to(Method::Get, "/api/authors");
    assert_eq!(searches.len(), 3);
    assert_eq!(searches[2].query.get("page"), Some("1"));
    assert_eq!(notes.successes(), 1);
    assert_eq!(notes.notifications()[0].message, "Author created.");
}

#[tokio::test]
async fn test_failed_update_sends_no_refetch() {
    let (client, mock) = mock_client();
    let notes = RecordingNotifier::new();
    let list = client.list::<Authors>(notes.clone());

    mock.on(Method::Get, "/api/authors", author_page(1, 3, 1, 3));
    list.fetch().await.unwrap();
    let before = list.snapshot().items;

    mock.on(Method::Put, "/api/authors/2", MockResponse::error(400, "Name already taken"));
    let err = list
        .update(
            2,
            AuthorPayload {
                name: "Author Number 1".into(),
                biography: "A duplicate name for a different author.".into(),
                birth_date: chrono::NaiveDate::from_ymd_opt(1960, 1, 1),
            },
        )
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert_eq!(mock.requests_to(Method::Get, "/api/authors").len(), 1);
    assert_eq!(list.snapshot().items, before);
    assert_eq!(notes.errors(), 1);
    assert!(notes.notifications()[0].message.contains("Name already taken"));
}

#[tokio::test]
async fn test_quiet_success_still_reports_failures() {
    let (client, mock) = mock_client();
    let notes = RecordingNotifier::new();
    let list = client.list_with_config::<Authors>(notes.clone(), ListConfig::new().quiet_success());

    mock.on(Method::Get, "/api/authors", author_page(1, 1, 1, 1));
    mock.on(Method::Delete, "/api/authors/1", MockResponse::status(204));
    mock.on(Method::Delete, "/api/authors/2", MockResponse::error(404, "Author not found"));

    list.delete(1).await.unwrap();
    assert!(list.delete(2).await.is_err());

    let recorded = notes.notifications();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].severity, Severity::Error);
}

#[tokio::test]
async fn test_selection_grid_uses_pending_flags() {
    let (client, mock) = mock_client();
    let copies = client.list_with_config::<BookCopies>(RecordingNotifier::new(), ListConfig::selection());

    copies.set_filter("status", "AVAILABLE");
    copies.set_filter("bookId", 4_i64);
    mock.on(
        Method::Get,
        "/api/book-copies/search",
        MockResponse::page(json!([book_copy(31, "Dune", "AVAILABLE"), book_copy(32, "Dune", "AVAILABLE")]), 1, 2),
    );
    copies.apply_filters().await.unwrap();

    let search = mock.last_request().unwrap();
    assert_eq!(search.query.get("size"), Some("12"));
    assert_eq!(search.query.get("bookId"), Some("4"));

    mock.on(
        Method::Put,
        "/api/reservations/9",
        MockResponse::status(200).with_delay(Duration::from_millis(20)),
    );
    let reservations = client.resource::<Reservations>();
    let approving = copies.select_with_loading_state(31, move || async move {
        reservations.approve(&9, 31).await
    });
    assert!(copies.is_pending(&31));
    assert!(!copies.is_pending(&32));

    approving.await.unwrap();
    assert!(!copies.is_pending(&31));
}

#[tokio::test]
async fn test_run_action_follows_mutation_rule() {
    let (client, mock) = mock_client();
    let notes = RecordingNotifier::new();
    let list = client.list::<Reservations>(notes.clone());

    mock.on(
        Method::Get,
        "/api/reservations",
        MockResponse::page(json!([reservation(4, 1, "PENDING")]), 1, 1),
    );
    list.fetch().await.unwrap();

    mock.once(Method::Put, "/api/reservations/4/cancel", MockResponse::status(200));
    list.run_action("Cancel reservation", |r| async move { r.cancel(&4).await })
        .await
        .unwrap();
    assert_eq!(mock.requests_to(Method::Get, "/api/reservations").len(), 2);

    mock.once(Method::Put, "/api/reservations/4/cancel", MockResponse::error(409, "Already cancelled"));
    assert!(
        list.run_action("Cancel reservation", |r| async move { r.cancel(&4).await })
            .await
            .is_err()
    );
    assert_eq!(mock.requests_to(Method::Get, "/api/reservations").len(), 2);

    let messages: Vec<_> = notes.notifications().into_iter().map(|n| n.message).collect();
    assert_eq!(
        messages,
        vec![
            "Cancel reservation succeeded.".to_string(),
            "Cancel reservation failed: Already cancelled".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_member_history_search_path() {
    let (client, mock) = mock_client();
    let history = client.list_with_config::<Reservations>(
        RecordingNotifier::new(),
        ListConfig::new().with_search_path(Reservations::member_history_path(8)),
    );

    mock.on(
        Method::Get,
        "/api/reservations/user/8",
        MockResponse::page(json!([reservation(1, 2, "FULFILLED")]), 1, 1),
    );
    assert_eq!(history.fetch().await.unwrap(), FetchStatus::Committed);
    assert_eq!(mock.requests_to(Method::Get, "/api/reservations").len(), 0);
}

#[tokio::test]
async fn test_mutation_after_drop_stays_silent() {
    let (client, mock) = mock_client();
    mock.hold_requests(true);
    let notes = RecordingNotifier::new();
    let list = client.list::<Authors>(notes.clone());

    let deleting = tokio::spawn(list.delete(5));
    let held = mock.next_held().await.unwrap();
    drop(list);
    held.respond(MockResponse::status(204));

    let outcome = deleting.await.unwrap().unwrap();
    assert_eq!(outcome.refresh(), Some(&Ok(FetchStatus::Detached)));
    assert_eq!(mock.request_count(), 1);
    assert!(notes.notifications().is_empty());
}
