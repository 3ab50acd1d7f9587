//! Payer profile integration tests.

mod common;

use axum::http::StatusCode;
use common::TestHarness;
use serde_json::{json, Value};

#[tokio::test]
async fn fresh_profile_defaults() {
    let harness = TestHarness::new();

    let response = harness.server.get("/v1/payer").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["sameAsShipping"], true);
    assert_eq!(body["billingAddress"]["country"], "TR");
    assert_eq!(body["personalInfo"]["firstName"], "");
}

#[tokio::test]
async fn partial_update_merges() {
    let harness = TestHarness::new();
    harness.fill_payer().await;

    let response = harness
        .server
        .patch("/v1/payer/personal-info")
        .json(&json!({ "phone": "+905550000000" }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["personalInfo"]["firstName"], "John");
    assert_eq!(body["personalInfo"]["phone"], "+905550000000");
}

#[tokio::test]
async fn validate_empty_profile_lists_fields() {
    let harness = TestHarness::new();

    let response = harness.server.post("/v1/payer/validate").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["valid"], false);
    for key in [
        "firstName",
        "lastName",
        "email",
        "phone",
        "billingLine1",
        "billingCity",
        "billingState",
        "billingPostalCode",
    ] {
        assert!(body["errors"].get(key).is_some(), "missing {key}");
    }
    assert!(body["errors"].get("shippingLine1").is_none());
}

#[tokio::test]
async fn invalid_email_is_reported() {
    let harness = TestHarness::new();
    harness.fill_payer().await;
    harness
        .server
        .patch("/v1/payer/personal-info")
        .json(&json!({ "email": "not-an-email" }))
        .await
        .assert_status_ok();

    let body: Value = harness.server.post("/v1/payer/validate").await.json();

    assert_eq!(body["valid"], false);
    assert_eq!(body["errors"]["email"], "Email is invalid");
}

#[tokio::test]
async fn separate_shipping_requires_address() {
    let harness = TestHarness::new();
    harness.fill_payer().await;

    harness
        .server
        .put("/v1/payer/same-as-shipping")
        .json(&json!({ "sameAsShipping": false }))
        .await
        .assert_status_ok();
    let body: Value = harness.server.post("/v1/payer/validate").await.json();
    assert_eq!(body["errors"]["shippingCity"], "Shipping city is required");

    let profile: Value = harness
        .server
        .put("/v1/payer/same-as-shipping")
        .json(&json!({ "sameAsShipping": true }))
        .await
        .json();
    assert_eq!(profile["shippingAddress"]["city"], "Istanbul");

    let body: Value = harness.server.post("/v1/payer/validate").await.json();
    assert_eq!(body["valid"], true);
}

#[tokio::test]
async fn errors_can_be_cleared() {
    let harness = TestHarness::new();
    harness.server.post("/v1/payer/validate").await;

    let body: Value = harness.server.delete("/v1/payer/errors").await.json();

    assert_eq!(body["errors"], json!({}));
}

#[tokio::test]
async fn reset_restores_defaults() {
    let harness = TestHarness::new();
    harness.fill_payer().await;

    let response = harness.server.delete("/v1/payer").await;
    response.assert_status(StatusCode::NO_CONTENT);

    let body: Value = harness.server.get("/v1/payer").await.json();
    assert_eq!(body["personalInfo"]["firstName"], "");
}

#[tokio::test]
async fn profile_survives_restart() {
    let harness = TestHarness::new();
    harness.fill_payer().await;

    let restarted = harness.restart();
    let body: Value = restarted.get("/v1/payer").await.json();

    assert_eq!(body["personalInfo"]["email"], "john@example.com");
    assert_eq!(body["billingAddress"]["postalCode"], "34000");
}
