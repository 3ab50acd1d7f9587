//! Application state.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use paylink_checkout::{CartState, CheckoutFlow, PayerState};
use paylink_client::{GatewayError, HttpGateway, MockGateway, PaymentLinkGateway};
use paylink_store::{FileStore, JsonStore, MemoryStore, Store, StoreError};
use tokio::sync::Mutex;

use crate::config::{GatewayMode, ServiceConfig, StoreBackend};

/// The checkout session: both state containers and the flow.
#[derive(Debug)]
pub struct CheckoutSession {
    /// Payer profile container.
    pub payer: PayerState,
    /// Cart container.
    pub cart: CartState,
    /// Step sequencing and link status.
    pub flow: CheckoutFlow,
}

impl CheckoutSession {
    /// Restore both containers from `store` and start at the first step.
    #[must_use]
    pub fn load(store: &JsonStore) -> Self {
        Self {
            payer: PayerState::load(store.clone()),
            cart: CartState::load(store.clone()),
            flow: CheckoutFlow::new(),
        }
    }
}

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The checkout session.
    pub session: Arc<Mutex<CheckoutSession>>,

    /// Gateway used to create payment links.
    pub gateway: Arc<dyn PaymentLinkGateway>,

    /// Service configuration.
    pub config: ServiceConfig,
}

impl AppState {
    /// Create a new application state, restoring the session from `store`.
    #[must_use]
    pub fn new(
        store: Arc<dyn Store>,
        gateway: Arc<dyn PaymentLinkGateway>,
        config: ServiceConfig,
    ) -> Self {
        let session = CheckoutSession::load(&JsonStore::new(store));

        tracing::info!(
            cart_lines = session.cart.cart().items.len(),
            currency = %session.cart.cart().currency,
            "Checkout session restored"
        );

        Self {
            session: Arc::new(Mutex::new(session)),
            gateway,
            config,
        }
    }
}

/// Open the configured storage backend.
///
/// # Errors
///
/// Returns an error if the backend cannot be opened, or if `RocksDB` was
/// requested without the `rocksdb-backend` feature.
pub fn open_store(config: &ServiceConfig) -> Result<Arc<dyn Store>, StoreError> {
    match config.store_backend {
        StoreBackend::File => {
            tracing::info!(path = %config.data_dir, "Opening file store");
            Ok(Arc::new(FileStore::open(&config.data_dir)?))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store - checkout state will not survive restarts");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreBackend::Rocks => open_rocks(Path::new(&config.data_dir)),
    }
}

#[cfg(feature = "rocksdb-backend")]
fn open_rocks(path: &Path) -> Result<Arc<dyn Store>, StoreError> {
    tracing::info!(path = %path.display(), "Opening RocksDB store");
    Ok(Arc::new(paylink_store::RocksStore::open(path)?))
}

#[cfg(not(feature = "rocksdb-backend"))]
fn open_rocks(_path: &Path) -> Result<Arc<dyn Store>, StoreError> {
    Err(StoreError::Database(
        "RocksDB backend requested but the rocksdb-backend feature is disabled".into(),
    ))
}

/// Build the configured payment link gateway.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built.
pub fn build_gateway(config: &ServiceConfig) -> Result<Arc<dyn PaymentLinkGateway>, GatewayError> {
    match config.gateway_mode {
        GatewayMode::Mock => {
            tracing::info!(delay_ms = config.mock_delay_ms, "Using mock payment gateway");
            Ok(Arc::new(MockGateway::new(Duration::from_millis(
                config.mock_delay_ms,
            ))))
        }
        GatewayMode::Live => {
            let gateway = HttpGateway::with_options(
                config.payment_api_url.clone(),
                config.payment_api_token.clone(),
                config.gateway_options(),
            )?;
            if !gateway.has_token() {
                tracing::warn!(
                    "Payment API token not configured - link creation will fail until one is set"
                );
            }
            tracing::info!(api_url = %gateway.base_url(), "Using live payment gateway");
            Ok(Arc::new(gateway))
        }
    }
}
