mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use serde_json::json;
use shipment_exceptions::api::handlers::exceptions_handler;
use shipment_exceptions::state::AppState;
use sqlx::PgPool;

fn exceptions_server(state: AppState) -> TestServer {
    let app = Router::new()
        .route("/api/exceptions", get(exceptions_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}

#[sqlx::test]
async fn test_exceptions_empty_table(pool: PgPool) {
    let server = exceptions_server(common::create_test_state(pool));

    let response = server.get("/api/exceptions").await;

    response.assert_status_ok();
    response.assert_json(&json!([]));
}

#[sqlx::test]
async fn test_exceptions_joined_to_shipment(pool: PgPool) {
    let shipment_id = common::create_test_shipment(&pool, "SH-1001").await;
    common::create_test_exception(&pool, shipment_id, "ARRIVAL_LATE", "HIGH", Some("2026-01-06"))
        .await;

    let server = exceptions_server(common::create_test_state(pool));

    let response = server.get("/api/exceptions").await;

    response.assert_status_ok();
    response.assert_json(&json!([{
        "shipment_ref": "SH-1001",
        "rule_code": "ARRIVAL_LATE",
        "rule_description": "Test rule",
        "severity": "HIGH",
        "exception_value": "2026-01-06"
    }]));
}

#[sqlx::test]
async fn test_exceptions_in_insertion_order(pool: PgPool) {
    let first = common::create_test_shipment(&pool, "SH-1").await;
    let second = common::create_test_shipment(&pool, "SH-2").await;
    common::create_test_exception(&pool, second, "MISSING_CARRIER", "MEDIUM", None).await;
    common::create_test_exception(&pool, first, "ARRIVAL_LATE", "HIGH", Some("2026-01-06")).await;

    let server = exceptions_server(common::create_test_state(pool));

    let json = server.get("/api/exceptions").await.json::<serde_json::Value>();
    let items = json.as_array().unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["shipment_ref"], "SH-2");
    assert_eq!(items[0]["exception_value"], json!(null));
    assert_eq!(items[1]["rule_code"], "ARRIVAL_LATE");
    assert!(items[0].get("success").is_none());
}

#[tokio::test]
async fn test_exceptions_store_unreachable() {
    let server = exceptions_server(common::unreachable_state());

    let response = server.get("/api/exceptions").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert!(json.is_object());
    assert_eq!(json["success"], false);
    assert!(!json["error"].as_str().unwrap().is_empty());
}
