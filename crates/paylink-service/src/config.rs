//! Service configuration.

use serde::Deserialize;
use std::path::Path;

use paylink_client::{GatewayOptions, HttpGateway};

/// Where checkout state is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// One JSON file per entry under `data_dir`.
    File,
    /// In-process only; state is lost on restart.
    Memory,
    /// `RocksDB` under `data_dir` (needs the `rocksdb-backend` feature).
    Rocks,
}

impl StoreBackend {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "file" => Some(Self::File),
            "memory" => Some(Self::Memory),
            "rocksdb" | "rocks" => Some(Self::Rocks),
            _ => None,
        }
    }
}

/// Which payment link gateway to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayMode {
    /// Fabricate links locally after a delay.
    Mock,
    /// Call the payment API.
    Live,
}

impl GatewayMode {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "mock" => Some(Self::Mock),
            "live" => Some(Self::Live),
            _ => None,
        }
    }
}

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Address to listen on (default: "0.0.0.0:8080").
    pub listen_addr: String,

    /// Data directory for file and `RocksDB` stores (default: "./data/paylink").
    pub data_dir: String,

    /// Storage backend (default: file).
    pub store_backend: StoreBackend,

    /// Gateway mode (default: mock).
    pub gateway_mode: GatewayMode,

    /// Payment API base URL.
    pub payment_api_url: String,

    /// Payment API bearer token (optional).
    pub payment_api_token: Option<String>,

    /// Program identifier sent with every payment request.
    pub payment_program_id: u32,

    /// Application identifier sent with every payment request.
    pub payment_app_id: u32,

    /// Public IP lookup endpoint.
    pub ip_lookup_url: String,

    /// Delay of the mock gateway in milliseconds.
    pub mock_delay_ms: u64,

    /// CORS allowed origins.
    pub cors_origins: Vec<String>,

    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,

    /// Request timeout in seconds.
    pub request_timeout_seconds: u64,
}

/// Payment API secrets file structure.
#[derive(Debug, Deserialize)]
struct PaymentApiSecrets {
    #[serde(default)]
    api_url: Option<String>,
    token: String,
}

impl ServiceConfig {
    /// Load configuration from environment variables and secrets files.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let (payment_api_url, payment_api_token) = load_payment_secrets();

        Self {
            listen_addr: std::env::var("LISTEN_ADDR").unwrap_or(defaults.listen_addr),
            data_dir: std::env::var("DATA_DIR").unwrap_or(defaults.data_dir),
            store_backend: std::env::var("STORE_BACKEND")
                .ok()
                .and_then(|s| StoreBackend::parse(&s))
                .unwrap_or(defaults.store_backend),
            gateway_mode: std::env::var("GATEWAY_MODE")
                .ok()
                .and_then(|s| GatewayMode::parse(&s))
                .unwrap_or(defaults.gateway_mode),
            payment_api_url: payment_api_url.unwrap_or(defaults.payment_api_url),
            payment_api_token,
            payment_program_id: env_parse("PAYMENT_PROGRAM_ID")
                .unwrap_or(defaults.payment_program_id),
            payment_app_id: env_parse("PAYMENT_APP_ID").unwrap_or(defaults.payment_app_id),
            ip_lookup_url: std::env::var("IP_LOOKUP_URL").unwrap_or(defaults.ip_lookup_url),
            mock_delay_ms: env_parse("MOCK_DELAY_MS").unwrap_or(defaults.mock_delay_ms),
            cors_origins: std::env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "*".into())
                .split(',')
                .map(|s| s.trim().to_string())
                .collect(),
            max_body_bytes: env_parse("MAX_BODY_BYTES").unwrap_or(defaults.max_body_bytes),
            request_timeout_seconds: env_parse("REQUEST_TIMEOUT_SECONDS")
                .unwrap_or(defaults.request_timeout_seconds),
        }
    }

    /// Gateway options derived from this configuration.
    #[must_use]
    pub fn gateway_options(&self) -> GatewayOptions {
        GatewayOptions {
            timeout_seconds: self.request_timeout_seconds,
            program_id: self.payment_program_id,
            app_id: self.payment_app_id,
            ip_lookup_url: self.ip_lookup_url.clone(),
        }
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|s| s.trim().parse().ok())
}

/// Load payment API secrets from file or environment.
fn load_payment_secrets() -> (Option<String>, Option<String>) {
    // Try multiple paths for the secrets file
    let secret_paths = [
        ".secrets/paythor.json",
        "paylink/.secrets/paythor.json",
        "paylink/service/.secrets/paythor.json",
        "../.secrets/paythor.json",
    ];

    for path in &secret_paths {
        if let Ok(secrets) = load_secrets_file::<PaymentApiSecrets>(path) {
            tracing::info!(path = %path, "Loaded payment API secrets from file");
            return (
                secrets
                    .api_url
                    .or_else(|| std::env::var("PAYMENT_API_URL").ok()),
                Some(secrets.token),
            );
        }
    }

    // Fall back to environment variables
    tracing::debug!("Payment API secrets file not found, using environment variables");
    (
        std::env::var("PAYMENT_API_URL").ok(),
        std::env::var("PAYMENT_API_TOKEN").ok(),
    )
}

/// Load secrets from a JSON file.
fn load_secrets_file<T: serde::de::DeserializeOwned>(path: &str) -> Result<T, std::io::Error> {
    let path = Path::new(path);
    if !path.exists() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Secrets file not found",
        ));
    }
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".into(),
            data_dir: "./data/paylink".into(),
            store_backend: StoreBackend::File,
            gateway_mode: GatewayMode::Mock,
            payment_api_url: HttpGateway::DEFAULT_BASE_URL.into(),
            payment_api_token: None,
            payment_program_id: 1,
            payment_app_id: 102,
            ip_lookup_url: GatewayOptions::default().ip_lookup_url,
            mock_delay_ms: 2000,
            cors_origins: vec!["*".into()],
            max_body_bytes: 1024 * 1024,
            request_timeout_seconds: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_names() {
        assert_eq!(StoreBackend::parse("FILE"), Some(StoreBackend::File));
        assert_eq!(StoreBackend::parse(" memory "), Some(StoreBackend::Memory));
        assert_eq!(StoreBackend::parse("rocksdb"), Some(StoreBackend::Rocks));
        assert_eq!(StoreBackend::parse("postgres"), None);
    }

    #[test]
    fn gateway_modes() {
        assert_eq!(GatewayMode::parse("live"), Some(GatewayMode::Live));
        assert_eq!(GatewayMode::parse("Mock"), Some(GatewayMode::Mock));
        assert_eq!(GatewayMode::parse(""), None);
    }

    #[test]
    fn defaults_match_payment_api() {
        let config = ServiceConfig::default();
        assert_eq!(config.payment_api_url, "https://api.paythor.com");
        assert_eq!(config.payment_program_id, 1);
        assert_eq!(config.payment_app_id, 102);
        assert_eq!(config.gateway_mode, GatewayMode::Mock);

        let options = config.gateway_options();
        assert_eq!(options.app_id, 102);
        assert_eq!(options.ip_lookup_url, "https://api.ipify.org?format=json");
    }

    #[test]
    fn secrets_file_must_exist() {
        let result = load_secrets_file::<PaymentApiSecrets>("/nonexistent/paythor.json");
        assert_eq!(result.unwrap_err().kind(), std::io::ErrorKind::NotFound);
    }
}
