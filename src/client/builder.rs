use crate::client::core::OrquestaClient;
use crate::options::{self, ClientOptions};
use crate::transport::{HttpTransport, Transport};
use crate::{Error, ErrorContext, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Builder for creating clients with custom configuration.
///
/// Every setting falls back to the environment when not given explicitly:
/// - API key: OS keyring (`orquesta` / `api_key`), then `ORQUESTA_API_KEY`
/// - environment: `ORQUESTA_ENV`
/// - base URL: `ORQUESTA_BASE_URL`, then the public API
/// - timeout: `ORQUESTA_HTTP_TIMEOUT_SECS`, then 30 seconds
#[derive(Default)]
pub struct OrquestaClientBuilder {
    api_key: Option<String>,
    environment: Option<String>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    transport: Option<Arc<dyn Transport>>,
}

impl OrquestaClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Target environment sent with every request (e.g. "production").
    pub fn environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    /// Override the deployments API base URL (primarily for testing with mock servers).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Connect timeout for every call, and total deadline for non-streaming calls.
    /// Streamed invocations run as long as the server keeps sending.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Inject a transport. Default is [`HttpTransport`].
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn build(self) -> Result<OrquestaClient> {
        let api_key = self
            .api_key
            .filter(|k| !k.trim().is_empty())
            .or_else(options::resolve_api_key)
            .ok_or_else(|| {
                Error::configuration(
                    "no API key configured",
                    ErrorContext::new()
                        .with_field_path("api_key")
                        .with_details(format!(
                            "set it on the builder, in the OS keyring or via {}",
                            options::API_KEY_ENV
                        ))
                        .with_source("client_builder"),
                )
            })?;

        let base_url = self
            .base_url
            .or_else(options::env_base_url)
            .unwrap_or_else(|| options::DEFAULT_BASE_URL.to_string());

        let opts = ClientOptions {
            api_key,
            environment: self.environment.or_else(options::env_environment),
            base_url: options::parse_base_url(&base_url)?,
            timeout: self
                .timeout
                .or_else(options::env_timeout)
                .unwrap_or(Duration::from_secs(options::DEFAULT_TIMEOUT_SECS)),
        };

        let transport: Arc<dyn Transport> = match self.transport {
            Some(t) => t,
            None => Arc::new(HttpTransport::new(opts.timeout)?),
        };

        debug!(
            base_url = %opts.base_url,
            environment = ?opts.environment,
            "orquesta client configured"
        );

        Ok(OrquestaClient::from_parts(Arc::new(opts), transport))
    }
}
