//! Invocation results.

use crate::client::Deployments;
use crate::types::identity::{deserialize_id, require_id, MetricsReporter};
use crate::types::normalize::decode;
use crate::types::{DeploymentDataChoiceMessage, DeploymentMetrics};
use crate::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One invocation result. In streaming mode every decoded chunk is its own `Deployment`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deployment {
    #[serde(deserialize_with = "deserialize_id")]
    id: String,
    pub created: String,
    pub object: String,
    pub model: String,
    pub provider: String,
    /// Whether this is the terminal chunk of a stream.
    pub is_final: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finalized: Option<Value>,
    pub choices: Vec<DeploymentDataChoice>,
    #[serde(skip)]
    reporter: MetricsReporter,
}

impl Deployment {
    /// Decode a result payload and bind it to `deployments` for metric reporting.
    ///
    /// A missing or null `id` is `InvalidArgument`; any other shape problem is
    /// `MalformedResponse`.
    pub fn from_value(value: &Value, deployments: &Deployments) -> Result<Self> {
        require_id(value)?;
        let mut deployment: Self = decode(value, "deployment")?;
        deployment.reporter = MetricsReporter::bound(deployments);
        Ok(deployment)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Report feedback, usage or performance for this invocation.
    pub async fn add_metrics(&self, metrics: DeploymentMetrics) -> Result<()> {
        self.reporter.add_metrics(&self.id, metrics).await
    }

    /// First choice's text content, if any. Convenience for the common single-choice case.
    pub fn content(&self) -> Option<&str> {
        self.choices.first().and_then(|c| c.message.text())
    }

    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// `index` and `finish_reason` are always written, as null when unresolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeploymentDataChoice {
    #[serde(default)]
    pub index: Option<i64>,
    pub message: DeploymentDataChoiceMessage,
    #[serde(default)]
    pub finish_reason: Option<Value>,
}

impl DeploymentDataChoice {
    pub fn from_value(value: &Value) -> Result<Self> {
        decode(value, "choice")
    }

    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}
