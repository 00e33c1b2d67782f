//! Remote API configuration baked in at build time.
//!
//! SYSTEM CONTEXT
//! ==============
//! The finance REST API is hosted separately from this app. Its origin and
//! version prefix are fixed per build through `FINTRACK_API_*` variables so
//! the WASM bundle never has to discover them at runtime.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_API_ORIGIN: &str = "https://mydomain.com";
pub const DEFAULT_API_VERSION: &str = "v1";
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 30;

/// Location and timeout settings for the remote finance API.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    /// Scheme + host (+ port), without a trailing slash.
    pub origin: String,
    /// Version segment appended after `/api`, e.g. `v1`.
    pub version: String,
    /// Per-request timeout enforced by the browser transport.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_ORIGIN, DEFAULT_API_VERSION)
    }
}

impl ApiConfig {
    pub fn new(origin: &str, version: &str) -> Self {
        Self {
            origin: origin.trim().trim_end_matches('/').to_owned(),
            version: version.trim().trim_matches('/').to_owned(),
            timeout_secs: DEFAULT_API_TIMEOUT_SECS,
        }
    }

    /// Build config from compile-time environment.
    ///
    /// Optional:
    /// - `FINTRACK_API_ORIGIN`: default `https://mydomain.com`
    /// - `FINTRACK_API_VERSION`: default `v1`
    /// - `FINTRACK_API_TIMEOUT_SECS`: default 30
    pub fn from_build_env() -> Self {
        Self::from_values(
            option_env!("FINTRACK_API_ORIGIN"),
            option_env!("FINTRACK_API_VERSION"),
            option_env!("FINTRACK_API_TIMEOUT_SECS"),
        )
    }

    fn from_values(origin: Option<&str>, version: Option<&str>, timeout_secs: Option<&str>) -> Self {
        let mut config = Self::new(
            origin.filter(|v| !v.trim().is_empty()).unwrap_or(DEFAULT_API_ORIGIN),
            version.filter(|v| !v.trim().is_empty()).unwrap_or(DEFAULT_API_VERSION),
        );
        config.timeout_secs = timeout_secs
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_API_TIMEOUT_SECS);
        config
    }

    /// `{origin}/api/{version}`.
    pub fn base_url(&self) -> String {
        format!("{}/api/{}", self.origin, self.version)
    }

    /// Absolute URL for an endpoint path such as `/expenses/summary`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url(), path.trim_start_matches('/'))
    }
}
