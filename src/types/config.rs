//! Deployment configuration as returned by `get_config`.

use crate::client::Deployments;
use crate::types::identity::{deserialize_id, require_id, MetricsReporter};
use crate::types::normalize::decode;
use crate::types::DeploymentMetrics;
use crate::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Model type of a deployment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DeploymentType {
    Chat,
    Completion,
    Image,
    /// A type this SDK does not know yet, kept verbatim.
    Other(String),
}

impl DeploymentType {
    pub fn as_str(&self) -> &str {
        match self {
            DeploymentType::Chat => "chat",
            DeploymentType::Completion => "completion",
            DeploymentType::Image => "image",
            DeploymentType::Other(s) => s,
        }
    }

    /// Streaming invocation is not available for image deployments.
    pub fn supports_streaming(&self) -> bool {
        !matches!(self, DeploymentType::Image)
    }
}

impl From<&str> for DeploymentType {
    fn from(s: &str) -> Self {
        match s {
            "chat" => DeploymentType::Chat,
            "completion" => DeploymentType::Completion,
            "image" => DeploymentType::Image,
            other => DeploymentType::Other(other.to_string()),
        }
    }
}

impl From<String> for DeploymentType {
    fn from(s: String) -> Self {
        match DeploymentType::from(s.as_str()) {
            DeploymentType::Other(_) => DeploymentType::Other(s),
            known => known,
        }
    }
}

impl From<DeploymentType> for String {
    fn from(t: DeploymentType) -> Self {
        match t {
            DeploymentType::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for DeploymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration of a deployment: provider, model, prompt template and parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeploymentConfig {
    #[serde(deserialize_with = "deserialize_id")]
    id: String,
    pub provider: String,
    pub model: String,
    #[serde(rename = "type")]
    pub deployment_type: DeploymentType,
    /// Prompt template entries, opaque.
    pub messages: Vec<Value>,
    /// Model invocation parameters, opaque.
    pub parameters: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<Value>>,
    #[serde(skip)]
    reporter: MetricsReporter,
}

impl DeploymentConfig {
    /// Decode a `get_config` payload and bind it to `deployments` for metric reporting.
    pub fn from_value(value: &Value, deployments: &Deployments) -> Result<Self> {
        require_id(value)?;
        let mut config: Self = decode(value, "deployment config")?;
        config.reporter = MetricsReporter::bound(deployments);
        Ok(config)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub async fn add_metrics(&self, metrics: DeploymentMetrics) -> Result<()> {
        self.reporter.add_metrics(&self.id, metrics).await
    }

    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}
