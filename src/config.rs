use tracing::warn;

use crate::error::{MarketDataError, Result};

pub const BASE_URL: &str = "https://api.realestate.parcllabs.com";

/// Canonical credential variable. The original scripts disagreed on the
/// spelling, so the legacy names are still honored (with a warning).
pub const API_KEY_ENV: &str = "PARCL_LABS_API_KEY";
pub const LEGACY_API_KEY_ENVS: &[&str] = &["parcl_labs_api_key", "api_key"];

/// The upstream gives no timeout guidance; requests must not hang forever.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Date format for `start`/`end` query params, e.g. `1/1/2022`.
pub const WIRE_DATE_FORMAT: &str = "%m/%d/%Y";

/// Immutable runtime configuration. Built once from the environment and
/// passed to the client; never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
    pub timeout_secs: u64,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let api_key = resolve_api_key()?;
        Ok(Self {
            api_key,
            base_url: std::env::var("PARCL_BASE_URL").unwrap_or_else(|_| BASE_URL.to_string()),
            timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn resolve_api_key() -> Result<String> {
    if let Ok(key) = std::env::var(API_KEY_ENV) {
        if !key.trim().is_empty() {
            return Ok(key);
        }
    }
    for legacy in LEGACY_API_KEY_ENVS {
        if let Ok(key) = std::env::var(legacy) {
            if !key.trim().is_empty() {
                warn!("credential read from legacy variable {legacy}; rename it to {API_KEY_ENV}");
                return Ok(key);
            }
        }
    }
    Err(MarketDataError::Authentication(format!(
        "{API_KEY_ENV} is not set"
    )))
}
