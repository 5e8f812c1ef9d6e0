//! The REST stack end to end against a wiremock server.

use std::time::Duration;

use serde_json::json;
use shelfdesk::{
    Authors, Categories, CategoryPayload, Client, ErrorKind, FetchStatus, PageRequest,
    RecordingNotifier, Query, Session,
};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{authors, init_tracing, page, rest_client, TOKEN};

#[tokio::test]
async fn test_filters_survive_pagination() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/authors"))
        .and(query_param("name", "Tolkien"))
        .and(query_param("page", "0"))
        .and(query_param("size", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(authors(1, 10), 0, 3, 25)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/authors"))
        .and(query_param("name", "Tolkien"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(authors(11, 10), 1, 3, 25)))
        .expect(1)
        .mount(&server)
        .await;

    let list = rest_client(&server).list::<Authors>(RecordingNotifier::new());
    list.set_filter("name", "Tolkien");
    list.apply_filters().await.unwrap();
    assert_eq!(list.set_page(2).await.unwrap(), FetchStatus::Committed);

    let snapshot = list.snapshot();
    assert_eq!(snapshot.page, 2);
    assert_eq!(snapshot.total_pages, 3);
    assert_eq!(snapshot.total_elements, 25);
    assert_eq!(snapshot.items[0].author_id, 11);
}

#[tokio::test]
async fn test_invalid_create_never_reaches_server() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let list = rest_client(&server).list::<Categories>(RecordingNotifier::new());
    let outcome = list
        .create(CategoryPayload {
            name: "A".into(),
            description: "Short".into(),
        })
        .await
        .unwrap();

    let report = outcome.report().unwrap();
    assert!(!report.is_valid());
    assert_eq!(report.error("name"), Some("Category name must be at least 5 characters."));
    assert_eq!(report.field_errors().len(), 2);
}

#[tokio::test]
async fn test_delete_conflict_keeps_item() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/authors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(authors(1, 3), 0, 1, 3)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/authors/2"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "message": "Author is referenced by existing books"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let notes = RecordingNotifier::new();
    let list = rest_client(&server).list::<Authors>(notes.clone());
    list.fetch().await.unwrap();

    let err = list.delete(2).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);

    let snapshot = list.snapshot();
    assert!(snapshot.items.iter().any(|a| a.author_id == 2));
    assert_eq!(snapshot.last_error.unwrap().kind, ErrorKind::Conflict);
    assert_eq!(notes.errors(), 1);
}

#[tokio::test]
async fn test_bearer_token_and_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/book-categories"))
        .and(header("authorization", format!("Bearer {}", TOKEN).as_str()))
        .and(body_json(json!({
            "name": "Poetry",
            "description": "Verse from every century and country."
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 12,
            "name": "Poetry",
            "description": "Verse from every century and country."
        })))
        .expect(1)
        .mount(&server)
        .await;

    let created = rest_client(&server)
        .resource::<Categories>()
        .create(&CategoryPayload {
            name: "Poetry".into(),
            description: "Verse from every century and country.".into(),
        })
        .await
        .unwrap();
    assert_eq!(created.unwrap().id, 12);
}

#[tokio::test]
async fn test_malformed_page_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/authors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "content": [] })))
        .mount(&server)
        .await;

    let list = rest_client(&server).list::<Authors>(RecordingNotifier::new());
    let err = list.fetch().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidResponse);
    assert!(!list.snapshot().loading);
}

#[tokio::test]
async fn test_slow_server_times_out() {
    init_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page(authors(1, 1), 0, 1, 1))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let client = Client::builder()
        .url(server.uri())
        .insecure()
        .timeout(Duration::from_millis(50))
        .session(Session::new(TOKEN))
        .build()
        .unwrap();

    let list = client.list::<Authors>(RecordingNotifier::new());
    let err = list.fetch().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Timeout);
}

#[tokio::test]
async fn test_collect_all_stops_at_last_page() {
    let server = MockServer::start().await;
    for index in 0..2u32 {
        Mock::given(method("GET"))
            .and(path("/api/authors"))
            .and(query_param("page", index.to_string().as_str()))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(page(authors(i64::from(index) * 5 + 1, 5), index, 2, 10)),
            )
            .expect(1)
            .mount(&server)
            .await;
    }

    let all = rest_client(&server)
        .resource::<Authors>()
        .collect_all(&Query::new().page(PageRequest::first(1)), 5)
        .await
        .unwrap();
    assert_eq!(all.len(), 10);
    assert_eq!(all[9].author_id, 10);
}
