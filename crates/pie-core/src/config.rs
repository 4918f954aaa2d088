// File: crates/pie-core/src/config.rs
// Summary: Gateway configuration knobs (endpoints, credentials, timeout) with environment overrides.

use std::time::Duration;

/// Where the HTTP gateway sends its requests.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayConfig {
    /// Base URL that content identifiers are appended to.
    pub ipfs_gateway_url: String,
    /// Base URL of the Dune query API.
    pub dune_base_url: String,
    /// Sent as `X-Dune-API-Key` when present.
    pub dune_api_key: Option<String>,
    pub timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            ipfs_gateway_url: "https://ipfs.io/ipfs".to_string(),
            dune_base_url: "https://api.dune.com/api/v1".to_string(),
            dune_api_key: None,
            timeout: Duration::from_secs(30),
        }
    }
}

impl GatewayConfig {
    /// Defaults overridden by `PIE_IPFS_GATEWAY_URL`, `PIE_DUNE_BASE_URL`,
    /// `DUNE_API_KEY` and `PIE_HTTP_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            ipfs_gateway_url: std::env::var("PIE_IPFS_GATEWAY_URL").unwrap_or(defaults.ipfs_gateway_url),
            dune_base_url: std::env::var("PIE_DUNE_BASE_URL").unwrap_or(defaults.dune_base_url),
            dune_api_key: std::env::var("DUNE_API_KEY").ok().filter(|k| !k.is_empty()),
            timeout: std::env::var("PIE_HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.trim().parse::<u64>().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
        }
    }
}
