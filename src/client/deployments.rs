//! The deployments facade: `get_config`, `invoke`, `invoke_with_stream`, `add_metrics`.

use crate::client::params::InvokeParams;
use crate::options::ClientOptions;
use crate::stream::decode_deployments;
use crate::transport::{Transport, TransportRequest, TransportResponse};
use crate::types::{Deployment, DeploymentConfig, DeploymentMetrics};
use crate::{BoxStream, Error, ErrorContext, Result};
use futures::StreamExt;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Facade over the deployments API.
///
/// Holds no per-call state, so one instance can serve concurrent tasks.
#[derive(Clone)]
pub struct Deployments {
    options: Arc<ClientOptions>,
    transport: Arc<dyn Transport>,
}

impl Deployments {
    pub fn new(options: Arc<ClientOptions>, transport: Arc<dyn Transport>) -> Self {
        Self { options, transport }
    }

    /// Fetch the configuration of the deployment identified by `params.key`.
    pub async fn get_config(&self, params: impl Into<InvokeParams>) -> Result<DeploymentConfig> {
        let params = params.into();
        let request = self.request(self.options.get_config_url()?, &params)?;
        debug!(key = %params.key, "fetching deployment config");

        let response = self.transport.post(&request).await?;
        let response = reject_failure(response, "get_config")?;
        let body = response.json()?;

        DeploymentConfig::from_value(&body, self)
    }

    /// Invoke a deployment and wait for the complete result.
    pub async fn invoke(&self, params: impl Into<InvokeParams>) -> Result<Deployment> {
        let params = params.into();
        let request = self.request(self.options.invoke_url()?, &params)?;
        info!(key = %params.key, "invoking deployment");

        let response = self.transport.post(&request).await?;
        let response = reject_failure(response, "invoke")?;
        let body = response.json()?;

        Deployment::from_value(&body, self)
    }

    /// Invoke a deployment and stream incremental results.
    ///
    /// Streaming is not supported for deployments of type `image`; callers must not use
    /// it for them.
    pub async fn invoke_with_stream(
        &self,
        params: impl Into<InvokeParams>,
    ) -> Result<BoxStream<'static, Deployment>> {
        let params = params.into();
        let request = self.request(self.options.invoke_url()?, &params)?;
        info!(key = %params.key, "invoking deployment (stream)");

        let response = self.transport.post_stream(&request).await?;
        if !response.is_success() {
            let status = response.status;
            let body = drain(response.lines).await;
            warn!(status, "streaming invocation rejected");
            return Err(Error::RequestFailed { status, body });
        }

        Ok(decode_deployments(response.lines, self.clone()))
    }

    /// Report metrics for the deployment result identified by `id`.
    pub async fn add_metrics(&self, id: &str, metrics: DeploymentMetrics) -> Result<()> {
        if id.is_empty() {
            return Err(Error::invalid_argument(
                "a deployment id is required to report metrics",
                ErrorContext::new().with_field_path("id").with_source("deployments"),
            ));
        }

        let request = TransportRequest {
            url: self.options.metrics_url(id)?,
            api_key: self.options.api_key.clone(),
            environment: self.options.environment.clone(),
            body: serde_json::to_value(&metrics)?,
        };
        debug!(id, "reporting deployment metrics");

        let response = self.transport.post(&request).await?;
        reject_failure(response, "add_metrics")?;
        Ok(())
    }

    fn request(&self, url: String, params: &InvokeParams) -> Result<TransportRequest> {
        let body: Value = serde_json::to_value(params.to_request()?)?;
        Ok(TransportRequest {
            url,
            api_key: self.options.api_key.clone(),
            environment: self.options.environment.clone(),
            body,
        })
    }
}

impl std::fmt::Debug for Deployments {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Deployments")
            .field("base_url", &self.options.base_url.as_str())
            .finish_non_exhaustive()
    }
}

fn reject_failure(response: TransportResponse, op: &str) -> Result<TransportResponse> {
    if !response.is_success() {
        warn!(status = response.status, op, "deployments request failed");
    }
    response.error_for_status()
}

async fn drain(lines: BoxStream<'static, String>) -> String {
    lines
        .filter_map(|line| async move { line.ok() })
        .collect::<Vec<_>>()
        .await
        .join("\n")
}

#[cfg(test)]
impl Deployments {
    pub(crate) fn for_tests(transport: Arc<dyn Transport>) -> Self {
        let options = ClientOptions::new("test-key").expect("default options");
        Self::new(Arc::new(options), transport)
    }
}
