//! The list controller over HTTP, against a `wiremock` backend.

use std::time::Duration;

use serde_json::json;
use shopdesk::resources::CardBrand;
use shopdesk::{Client, ErrorKind, RecordStatus, RetryConfig, Transport};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::init_tracing;

fn brand_page(items: serde_json::Value, total_items: u64, current_page: u32) -> serde_json::Value {
    let total_pages = total_items.div_ceil(10);
    json!({
        "items": items,
        "totalItems": total_items,
        "totalPages": total_pages,
        "currentPage": current_page,
        "hasNextPage": u64::from(current_page) < total_pages,
        "hasPreviousPage": current_page > 1
    })
}

fn rest_client(server: &MockServer) -> Client {
    init_tracing();
    Client::builder()
        .url(server.uri())
        .timeout(Duration::from_secs(5))
        .bearer_token("caixa-01")
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_load_first_page_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bandeiras-cartao"))
        .and(query_param("page", "1"))
        .and(query_param("pageSize", "10"))
        .and(header("authorization", "Bearer caixa-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(brand_page(
            json!([
                {"id": 1, "descricao": "Visa", "status": "Ativo"},
                {"id": 2, "descricao": "Mastercard", "status": "Inativo"}
            ]),
            12,
            1,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let client = rest_client(&server);
    let list = client.resource::<CardBrand>().list_controller();
    assert_eq!(list.transport_type(), Transport::Http);

    let page = list.load().await.unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page.info.total_pages, 2);
    assert!(page.info.has_next_page);
    assert_eq!(page.items[1].status, RecordStatus::Inactive);
    assert!(list.state().can_go_next());
}

#[tokio::test]
async fn test_search_reaches_backend_as_query_parameter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bandeiras-cartao"))
        .and(query_param("search", "visa"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(brand_page(
            json!([{"id": 1, "descricao": "Visa", "status": "Ativo"}]),
            1,
            1,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let client = rest_client(&server);
    let list = client.resource::<CardBrand>().list_controller();

    let page = list.set_search_text("  visa ").await.unwrap();
    assert_eq!(page.items[0].descricao, "Visa");
    assert_eq!(list.query().search(), Some("visa"));
}

#[tokio::test]
async fn test_server_error_surfaces_on_state() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bandeiras-cartao"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(brand_page(
                json!([{"id": 1, "descricao": "Visa", "status": "Ativo"}]),
                1,
                1,
            )),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/bandeiras-cartao"))
        .respond_with(ResponseTemplate::new(500).set_body_string("banco de dados indisponível"))
        .mount(&server)
        .await;

    let client = rest_client(&server);
    let list = client.resource::<CardBrand>().list_controller();
    list.load().await.unwrap();

    let err = list.refresh().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Internal);

    let state = list.state();
    assert!(!state.loading);
    assert_eq!(state.error.as_deref(), Some("banco de dados indisponível"));
    // The last good page stays on screen.
    assert_eq!(state.items().len(), 1);
}

#[tokio::test]
async fn test_retries_transient_failure_when_enabled() {
    init_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bandeiras-cartao"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/bandeiras-cartao"))
        .respond_with(ResponseTemplate::new(200).set_body_json(brand_page(json!([]), 0, 1)))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::builder()
        .url(server.uri())
        .retry_config(
            RetryConfig::new()
                .with_max_retries(1)
                .with_initial_delay(Duration::from_millis(10))
                .with_jitter(0.0),
        )
        .build()
        .unwrap();

    let page = client.resource::<CardBrand>().list().await.unwrap();
    assert!(page.is_empty());
    assert_eq!(page.info.total_pages, 0);
}

#[tokio::test]
async fn test_write_refreshes_list_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/bandeiras-cartao"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({"id": 13, "descricao": "Aura", "status": "Ativo"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/bandeiras-cartao"))
        .respond_with(ResponseTemplate::new(200).set_body_json(brand_page(
            json!([{"id": 13, "descricao": "Aura", "status": "Ativo"}]),
            1,
            1,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let client = rest_client(&server);
    let list = client.resource::<CardBrand>().list_controller();

    let created = list
        .create(CardBrand::new(0, "Aura", RecordStatus::Active))
        .await
        .unwrap();
    assert_eq!(created.id, 13);
    assert_eq!(list.state().items()[0].descricao, "Aura");
}
