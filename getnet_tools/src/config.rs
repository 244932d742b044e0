use std::time::Duration;

use bicos_common::{helpers::parse_number, Secret};
use log::*;

pub const DEFAULT_GETNET_URL: &str = "https://api-sandbox.getnet.com.br";
pub const DEFAULT_TIMEOUT_MS: u64 = 1000;
const DEFAULT_SELLER_ID: &str = "ea8fc390-0818-42bf-a993-60c6f9b9728c";

#[derive(Debug, Clone)]
pub struct GetnetConfig {
    /// Scheme and host of the Getnet API, without a trailing slash. e.g. "https://api.getnet.com.br"
    pub base_url: String,
    /// The pre-shared, base64-encoded `client_id:client_secret` pair used for Basic auth on the token endpoint.
    pub credential: Secret<String>,
    pub seller_id: String,
    /// Applied to every outbound call. There are no retries.
    pub timeout: Duration,
}

impl Default for GetnetConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GETNET_URL.to_string(),
            credential: Secret::default(),
            seller_id: DEFAULT_SELLER_ID.to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }
}

impl GetnetConfig {
    pub fn new_from_env_or_default() -> Self {
        let base_url = std::env::var("BICOS_GETNET_URL")
            .map(|s| s.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| {
                info!("🪛️ BICOS_GETNET_URL not set, using the sandbox at {DEFAULT_GETNET_URL}");
                DEFAULT_GETNET_URL.to_string()
            });
        let credential = Secret::new(std::env::var("BICOS_GETNET_TOKEN").unwrap_or_else(|_| {
            warn!("🪛️ BICOS_GETNET_TOKEN not set. Every charge will fail at the token exchange step");
            String::default()
        }));
        let seller_id = std::env::var("BICOS_GETNET_SELLER_ID").unwrap_or_else(|_| {
            warn!("🪛️ BICOS_GETNET_SELLER_ID not set, using the sandbox seller id");
            DEFAULT_SELLER_ID.to_string()
        });
        let timeout_ms = parse_number::<u64>(std::env::var("BICOS_GETNET_TIMEOUT_MS").ok()).unwrap_or_else(|| {
            debug!("🪛️ BICOS_GETNET_TIMEOUT_MS not set or invalid, using {DEFAULT_TIMEOUT_MS}ms");
            DEFAULT_TIMEOUT_MS
        });
        Self { base_url, credential, seller_id, timeout: Duration::from_millis(timeout_ms) }
    }

    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_credential<S: Into<String>>(mut self, credential: S) -> Self {
        self.credential = Secret::new(credential.into());
        self
    }
}
