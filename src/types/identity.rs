//! Ids of reportable entities and the metrics capability bound to them.

use crate::client::Deployments;
use crate::types::DeploymentMetrics;
use crate::{Error, ErrorContext, Result};
use serde::de::{self, Deserializer, Unexpected};
use serde::Deserialize;
use serde_json::Value;

/// Metrics capability embedded in [`crate::DeploymentConfig`] and [`crate::Deployment`].
///
/// Entities decoded by the facade are bound to it. An entity built with plain serde is
/// unbound and refuses to report.
#[derive(Debug, Clone, Default)]
pub struct MetricsReporter(Option<Deployments>);

impl MetricsReporter {
    pub(crate) fn bound(deployments: &Deployments) -> Self {
        Self(Some(deployments.clone()))
    }

    pub fn is_bound(&self) -> bool {
        self.0.is_some()
    }

    pub(crate) async fn add_metrics(&self, id: &str, metrics: DeploymentMetrics) -> Result<()> {
        match &self.0 {
            Some(deployments) => deployments.add_metrics(id, metrics).await,
            None => Err(Error::configuration(
                "entity was not decoded by a client and cannot report metrics",
                ErrorContext::new().with_source("metrics_reporter"),
            )),
        }
    }
}

/// Reject a payload whose `id` is missing or null before it is decoded.
///
/// Non-object payloads pass through; the decoder reports them.
pub(crate) fn require_id(value: &Value) -> Result<()> {
    let Some(fields) = value.as_object() else {
        return Ok(());
    };
    let problem = match fields.get("id") {
        None => "deployment payload has no id",
        Some(Value::Null) => "deployment payload has a null id",
        Some(_) => return Ok(()),
    };
    Err(Error::invalid_argument(
        problem,
        ErrorContext::new()
            .with_field_path("id")
            .with_source("normalizer"),
    ))
}

/// Accept any scalar id. Numbers and booleans keep their JSON spelling.
pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Err(de::Error::invalid_type(Unexpected::Unit, &"a deployment id")),
        Value::Array(_) => Err(de::Error::invalid_type(Unexpected::Seq, &"a deployment id")),
        Value::Object(_) => Err(de::Error::invalid_type(Unexpected::Map, &"a deployment id")),
    }
}
