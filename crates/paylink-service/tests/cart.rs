//! Cart integration tests.

mod common;

use axum::http::StatusCode;
use common::TestHarness;
use serde_json::{json, Value};

#[tokio::test]
async fn catalog_lists_four_products() {
    let harness = TestHarness::new();

    let body: Value = harness.server.get("/v1/catalog").await.json();

    let ids: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["PRODUCT-A", "PRODUCT-B", "SERVICE-C", "PLAN-D"]);
}

#[tokio::test]
async fn empty_cart_defaults() {
    let harness = TestHarness::new();

    let body: Value = harness.server.get("/v1/cart").await.json();

    assert_eq!(body["items"], json!([]));
    assert_eq!(body["currency"], "TRY");
    assert!(body["merchantRef"].as_str().unwrap().starts_with("ETC-"));
    assert_eq!(body["summary"]["itemCount"], 0);
}

#[tokio::test]
async fn adding_same_product_merges() {
    let harness = TestHarness::new();

    harness.add_item("PRODUCT-A", 2).await;
    let body = harness.add_item("PRODUCT-A", 3).await;

    assert_eq!(body["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["items"][0]["quantity"], 5);
    assert_eq!(body["summary"]["subtotal"], 500.0);
    assert_eq!(body["summary"]["fee"], 25.0);
    assert_eq!(body["summary"]["total"], 525.0);
}

#[tokio::test]
async fn unknown_product_is_not_found() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .post("/v1/cart/items")
        .json(&json!({ "productId": "NOPE" }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "not_found");
}

#[tokio::test]
async fn quantity_updates_accept_numbers_and_text() {
    let harness = TestHarness::new();
    harness.add_item("PRODUCT-B", 1).await;

    let body: Value = harness
        .server
        .put("/v1/cart/items/PRODUCT-B")
        .json(&json!({ "quantity": 3 }))
        .await
        .json();
    assert_eq!(body["items"][0]["quantity"], 3);

    let body: Value = harness
        .server
        .put("/v1/cart/items/PRODUCT-B")
        .json(&json!({ "quantity": "7 pcs" }))
        .await
        .json();
    assert_eq!(body["items"][0]["quantity"], 7);

    let body: Value = harness
        .server
        .put("/v1/cart/items/PRODUCT-B")
        .json(&json!({ "quantity": 0 }))
        .await
        .json();
    assert_eq!(body["items"], json!([]));
    assert_eq!(body["summary"]["itemCount"], 0);
}

#[tokio::test]
async fn updating_missing_line_is_not_found() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .put("/v1/cart/items/PRODUCT-A")
        .json(&json!({ "quantity": 2 }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn remove_line() {
    let harness = TestHarness::new();
    harness.add_item("SERVICE-C", 1).await;

    let response = harness.server.delete("/v1/cart/items/SERVICE-C").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["items"], json!([]));

    harness
        .server
        .delete("/v1/cart/items/SERVICE-C")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn custom_product_is_added() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .post("/v1/cart/custom-products")
        .json(&json!({ "name": "X", "price": 50, "quantity": 1, "type": "product" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    let id = body["id"].as_str().unwrap();
    assert!(id.starts_with("PRODUCT-"));
    assert_ne!(id, "PRODUCT-A");
    assert_eq!(body["cart"]["summary"]["itemCount"], 1);
    assert_eq!(body["cart"]["summary"]["subtotal"], 50.0);
}

#[tokio::test]
async fn invalid_custom_product_is_rejected() {
    let harness = TestHarness::new();

    let response = harness
        .server
        .post("/v1/cart/custom-products")
        .json(&json!({ "name": "", "price": -1 }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "validation_error");
    assert!(body["error"]["details"].get("name").is_some());
    assert!(body["error"]["details"].get("price").is_some());
}

#[tokio::test]
async fn currency_and_references() {
    let harness = TestHarness::new();

    let body: Value = harness
        .server
        .put("/v1/cart/currency")
        .json(&json!({ "currency": "usd" }))
        .await
        .json();
    assert_eq!(body["currency"], "USD");

    let body: Value = harness
        .server
        .put("/v1/cart/merchant-ref")
        .json(&json!({ "merchantRef": "MY-REF" }))
        .await
        .json();
    assert_eq!(body["merchantRef"], "MY-REF");

    let body: Value = harness
        .server
        .post("/v1/cart/merchant-ref/regenerate")
        .await
        .json();
    assert!(body["merchantRef"].as_str().unwrap().starts_with("ETC-"));

    let body: Value = harness
        .server
        .put("/v1/cart/invoice-id")
        .json(&json!({ "invoiceId": "INV-9" }))
        .await
        .json();
    assert_eq!(body["invoiceId"], "INV-9");

    let body: Value = harness
        .server
        .post("/v1/cart/invoice-id/regenerate")
        .await
        .json();
    assert_ne!(body["invoiceId"], "INV-9");
}

#[tokio::test]
async fn blank_currency_is_bad_request() {
    let harness = TestHarness::new();

    harness
        .server
        .put("/v1/cart/currency")
        .json(&json!({ "currency": "  " }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn clear_cart_keeps_references() {
    let harness = TestHarness::new();
    let before = harness.add_item("PLAN-D", 1).await;

    let body: Value = harness.server.delete("/v1/cart").await.json();

    assert_eq!(body["items"], json!([]));
    assert_eq!(body["total"], 0.0);
    assert_eq!(body["merchantRef"], before["merchantRef"]);
}

#[tokio::test]
async fn cart_survives_restart() {
    let harness = TestHarness::new();
    let before = harness.add_item("PRODUCT-B", 2).await;

    let restarted = harness.restart();
    let body: Value = restarted.get("/v1/cart").await.json();

    assert_eq!(body["items"], before["items"]);
    assert_eq!(body["merchantRef"], before["merchantRef"]);
    assert_eq!(body["invoiceId"], before["invoiceId"]);
    assert_eq!(body["total"], 420.0);
}
