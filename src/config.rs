//! Client configuration resolved from build-time environment variables.
//!
//! Values are baked in with `option_env!` when the WASM bundle is compiled, so
//! a static deployment carries its API host without a runtime lookup. Parsing
//! goes through [`ClientConfig::from_lookup`] so it can be exercised without
//! touching the build environment. Configuration values are public; do not
//! put secrets here.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use crate::error::ConfigError;

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u32 = 10_000;
pub const DEFAULT_TOKEN_STORAGE_KEY: &str = "token";

pub const API_BASE_URL_VAR: &str = "HR_API_BASE_URL";
pub const REQUEST_TIMEOUT_VAR: &str = "HR_REQUEST_TIMEOUT_MS";
pub const TOKEN_STORAGE_KEY_VAR: &str = "HR_TOKEN_STORAGE_KEY";
pub const RETAIN_ON_NETWORK_ERROR_VAR: &str = "HR_RETAIN_CREDENTIAL_ON_NETWORK_ERROR";

/// Typed client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL every API path is joined onto (no trailing slash).
    pub api_base_url: String,
    /// Abort outbound requests after this many milliseconds.
    pub request_timeout_ms: u32,
    /// Persistent storage key mirroring the bearer credential.
    pub token_storage_key: String,
    /// Keep the credential when the identity endpoint is unreachable instead
    /// of treating the failure as an expired session.
    pub retain_credential_on_network_error: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            token_storage_key: DEFAULT_TOKEN_STORAGE_KEY.to_owned(),
            retain_credential_on_network_error: false,
        }
    }
}

impl ClientConfig {
    /// Build config from variables captured at compile time.
    ///
    /// Optional:
    /// - `HR_API_BASE_URL`: default `http://127.0.0.1:8000`
    /// - `HR_REQUEST_TIMEOUT_MS`: default 10000
    /// - `HR_TOKEN_STORAGE_KEY`: default `token`
    /// - `HR_RETAIN_CREDENTIAL_ON_NETWORK_ERROR`: `true` or `false` (default)
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if a variable is present but
    /// cannot be parsed.
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| build_env(key).map(str::to_owned))
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// Blank values are treated as absent.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for unparsable numbers or flags.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).and_then(|v| normalize_value(&v));

        let api_base_url = read(API_BASE_URL_VAR)
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_owned())
            .trim_end_matches('/')
            .to_owned();
        let request_timeout_ms = match read(REQUEST_TIMEOUT_VAR) {
            Some(raw) => parse_timeout(REQUEST_TIMEOUT_VAR, &raw)?,
            None => DEFAULT_REQUEST_TIMEOUT_MS,
        };
        let token_storage_key = read(TOKEN_STORAGE_KEY_VAR).unwrap_or_else(|| DEFAULT_TOKEN_STORAGE_KEY.to_owned());
        let retain_credential_on_network_error = match read(RETAIN_ON_NETWORK_ERROR_VAR) {
            Some(raw) => parse_bool(RETAIN_ON_NETWORK_ERROR_VAR, &raw)?,
            None => false,
        };

        Ok(Self { api_base_url, request_timeout_ms, token_storage_key, retain_credential_on_network_error })
    }
}

fn build_env(key: &str) -> Option<&'static str> {
    match key {
        API_BASE_URL_VAR => option_env!("HR_API_BASE_URL"),
        REQUEST_TIMEOUT_VAR => option_env!("HR_REQUEST_TIMEOUT_MS"),
        TOKEN_STORAGE_KEY_VAR => option_env!("HR_TOKEN_STORAGE_KEY"),
        RETAIN_ON_NETWORK_ERROR_VAR => option_env!("HR_RETAIN_CREDENTIAL_ON_NETWORK_ERROR"),
        _ => None,
    }
}

fn normalize_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() { None } else { Some(trimmed.to_owned()) }
}

fn parse_timeout(key: &str, raw: &str) -> Result<u32, ConfigError> {
    match raw.parse::<u32>() {
        Ok(ms) if ms > 0 => Ok(ms),
        _ => Err(invalid(key, raw)),
    }
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(invalid(key, raw)),
    }
}

fn invalid(key: &str, raw: &str) -> ConfigError {
    ConfigError::InvalidValue { key: key.to_owned(), value: raw.to_owned() }
}
