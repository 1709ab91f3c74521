//! End-to-end duplication flow against a mock server.

use holded_core::{GatewayConfig, Transport};
use holded_invoicing::{DocType, DuplicateOptions, InvoicingClient};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn invoicing_client(server: &MockServer) -> InvoicingClient {
    let config = GatewayConfig::with_base_url("test-key", server.uri())
        .unwrap()
        .with_retry_base_delay_ms(5);
    InvoicingClient::new(Transport::new(&config).unwrap())
}

#[tokio::test]
async fn duplicate_strips_remaps_and_gates() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/invoicing/v1/documents/invoice/abc"))
        .and(header("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "abc",
            "contact": "c1",
            "contactName": "Acme",
            "docNumber": "F1",
            "products": [{"name": "Service", "price": 100}],
            "status": 0,
            "approvedAt": 123,
            "subtotal": 100,
            "total": 121
        })))
        .expect(1)
        .mount(&server)
        .await;

    // Exact-body match: no server-managed or read-shape key may survive.
    Mock::given(method("POST"))
        .and(path("/invoicing/v1/documents/invoice"))
        .and(header("key", "test-key"))
        .and(body_json(json!({
            "contactId": "c1",
            "date": 1_772_233_200,
            "items": [{"name": "Service", "subtotal": 100}],
            "approveDoc": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "def",
            "contactId": "c1",
            "docNumber": "F2",
            "date": 1_772_233_200
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = invoicing_client(&server).await;
    let created = client
        .documents()
        .duplicate(
            DocType::Invoice,
            "abc",
            DuplicateOptions::new().with_date(1_772_233_200),
        )
        .await
        .unwrap();

    assert_eq!(created.id, "def");
    assert_eq!(created.doc_number.as_deref(), Some("F2"));
}

#[tokio::test]
async fn duplicate_survives_rate_limited_read() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/invoicing/v1/documents/invoice/abc"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/invoicing/v1/documents/invoice/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "abc",
            "contact": "c1"
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/invoicing/v1/documents/invoice"))
        .and(body_json(json!({
            "contactId": "c1",
            "date": 1000,
            "approveDoc": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "def"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = invoicing_client(&server).await;
    let created = client
        .documents()
        .duplicate(
            DocType::Invoice,
            "abc",
            DuplicateOptions::new().with_date(1000),
        )
        .await
        .unwrap();
    assert_eq!(created.id, "def");
}
