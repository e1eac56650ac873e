//! Client configuration: credentials, target environment, endpoint and timeout.

use crate::{Error, ErrorContext, Result};
use keyring::Entry;
use std::env;
use std::fmt;
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://api.orquesta.cloud/v2/deployments";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const API_KEY_ENV: &str = "ORQUESTA_API_KEY";
pub const ENVIRONMENT_ENV: &str = "ORQUESTA_ENV";
pub const BASE_URL_ENV: &str = "ORQUESTA_BASE_URL";
pub const TIMEOUT_ENV: &str = "ORQUESTA_HTTP_TIMEOUT_SECS";

const KEYRING_SERVICE: &str = "orquesta";
const KEYRING_USER: &str = "api_key";

/// Resolved client options. Built by [`crate::OrquestaClientBuilder`].
#[derive(Clone)]
pub struct ClientOptions {
    pub api_key: String,
    pub environment: Option<String>,
    pub base_url: Url,
    pub timeout: Duration,
}

impl ClientOptions {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Ok(Self {
            api_key: api_key.into(),
            environment: None,
            base_url: parse_base_url(DEFAULT_BASE_URL)?,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    pub fn get_config_url(&self) -> Result<String> {
        self.endpoint(&["get_config"])
    }

    pub fn invoke_url(&self) -> Result<String> {
        self.endpoint(&["invoke"])
    }

    pub fn metrics_url(&self, id: &str) -> Result<String> {
        self.endpoint(&[id, "metrics"])
    }

    /// Append path segments to the base URL. Segments are percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<String> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                Error::configuration(
                    "base URL cannot carry path segments",
                    ErrorContext::new()
                        .with_field_path("base_url")
                        .with_details(self.base_url.to_string()),
                )
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url.into())
    }
}

impl fmt::Debug for ClientOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientOptions")
            .field("api_key", &"<redacted>")
            .field("environment", &self.environment)
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.timeout)
            .finish()
    }
}

pub(crate) fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|e| {
        Error::configuration(
            "invalid base URL",
            ErrorContext::new()
                .with_field_path("base_url")
                .with_details(format!("{}: {}", raw, e))
                .with_source("client_builder"),
        )
    })?;

    if url.cannot_be_a_base() {
        return Err(Error::configuration(
            "base URL cannot carry path segments",
            ErrorContext::new()
                .with_field_path("base_url")
                .with_details(raw.to_string())
                .with_source("client_builder"),
        ));
    }
    Ok(url)
}

/// API key lookup: OS keyring first, then `ORQUESTA_API_KEY`.
pub(crate) fn resolve_api_key() -> Option<String> {
    if let Ok(entry) = Entry::new(KEYRING_SERVICE, KEYRING_USER) {
        if let Ok(key) = entry.get_password() {
            return Some(key);
        }
    }

    env::var(API_KEY_ENV).ok().filter(|k| !k.trim().is_empty())
}

pub(crate) fn env_environment() -> Option<String> {
    env::var(ENVIRONMENT_ENV).ok().filter(|e| !e.trim().is_empty())
}

pub(crate) fn env_base_url() -> Option<String> {
    env::var(BASE_URL_ENV).ok()
}

pub(crate) fn env_timeout() -> Option<Duration> {
    env::var(TIMEOUT_ENV)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
}
