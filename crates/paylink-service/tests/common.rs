//! Common test utilities for paylink integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum_test::TestServer;
use serde_json::{json, Value};
use tempfile::TempDir;

use paylink_client::{GatewayError, MockGateway, PaymentLinkGateway};
use paylink_core::{PaymentLinkResult, PaymentRequest};
use paylink_service::{create_router, AppState, GatewayMode, ServiceConfig, StoreBackend};
use paylink_store::FileStore;

/// Test harness containing everything needed for integration tests.
pub struct TestHarness {
    /// The test server for making HTTP requests.
    pub server: TestServer,
    /// Temporary directory for the store (kept alive for test duration).
    pub temp_dir: TempDir,
}

impl TestHarness {
    /// Create a new test harness with a fresh store and an instant mock gateway.
    pub fn new() -> Self {
        Self::with_gateway(Arc::new(MockGateway::instant()))
    }

    /// Create a harness around a specific gateway.
    pub fn with_gateway(gateway: Arc<dyn PaymentLinkGateway>) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let server = Self::server(&temp_dir, gateway);
        Self { server, temp_dir }
    }

    /// Start a second server over the same store, as after a restart.
    pub fn restart(&self) -> TestServer {
        Self::server(&self.temp_dir, Arc::new(MockGateway::instant()))
    }

    fn server(temp_dir: &TempDir, gateway: Arc<dyn PaymentLinkGateway>) -> TestServer {
        let store = FileStore::open(temp_dir.path()).expect("Failed to open store");
        let config = test_config(temp_dir);

        let state = AppState::new(Arc::new(store), gateway, config);
        let router: Router = create_router(state);

        TestServer::new(router).expect("Failed to create test server")
    }

    /// Fill in a complete payer profile.
    pub async fn fill_payer(&self) {
        self.server
            .patch("/v1/payer/personal-info")
            .json(&json!({
                "firstName": "John",
                "lastName": "Doe",
                "email": "john@example.com",
                "phone": "+905551112233"
            }))
            .await
            .assert_status_ok();

        self.server
            .patch("/v1/payer/billing-address")
            .json(&json!({
                "line1": "Istiklal Cad. 1",
                "city": "Istanbul",
                "state": "Istanbul",
                "postalCode": "34000",
                "country": "TR"
            }))
            .await
            .assert_status_ok();
    }

    /// Add a catalog product to the cart.
    pub async fn add_item(&self, product_id: &str, quantity: u32) -> Value {
        let response = self
            .server
            .post("/v1/cart/items")
            .json(&json!({ "productId": product_id, "quantity": quantity }))
            .await;
        response.assert_status_ok();
        response.json()
    }

    /// Walk the flow to the cart step with `PRODUCT-A` x2 in the cart.
    pub async fn reach_cart_step(&self) {
        self.fill_payer().await;
        self.server.post("/v1/checkout/next").await.assert_status_ok();
        self.add_item("PRODUCT-A", 2).await;
    }

    /// Walk the flow onto the payment link step, which creates the link.
    pub async fn reach_payment_step(&self) -> Value {
        self.reach_cart_step().await;
        let response = self.server.post("/v1/checkout/next").await;
        response.assert_status_ok();
        response.json()
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Instant mock gateway that counts its calls.
#[derive(Default)]
pub struct CountingGateway {
    calls: AtomicUsize,
}

impl CountingGateway {
    /// Number of payment link requests received.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PaymentLinkGateway for CountingGateway {
    async fn create_payment_link(
        &self,
        request: &PaymentRequest,
    ) -> Result<PaymentLinkResult, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        MockGateway::instant().create_payment_link(request).await
    }
}

/// Configuration pointing at `temp_dir` with the mock gateway.
pub fn test_config(temp_dir: &TempDir) -> ServiceConfig {
    ServiceConfig {
        listen_addr: "127.0.0.1:0".into(),
        data_dir: temp_dir.path().to_string_lossy().to_string(),
        store_backend: StoreBackend::File,
        gateway_mode: GatewayMode::Mock,
        payment_api_url: "http://localhost".into(),
        payment_api_token: None,
        payment_program_id: 1,
        payment_app_id: 102,
        ip_lookup_url: "http://localhost/ip".into(),
        mock_delay_ms: 0,
        cors_origins: vec!["*".into()],
        max_body_bytes: 1024 * 1024,
        request_timeout_seconds: 30,
    }
}
