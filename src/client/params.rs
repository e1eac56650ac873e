use crate::{Error, ErrorContext, Result};
use serde::Serialize;
use serde_json::{Map, Value};

/// Parameters of one `get_config` / `invoke` call.
///
/// Built fresh for every call; nothing is carried over between requests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InvokeParams {
    pub key: String,
    pub context: Option<Map<String, Value>>,
    pub inputs: Option<Map<String, Value>>,
    pub metadata: Option<Map<String, Value>>,
}

impl InvokeParams {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    pub fn context(mut self, context: Map<String, Value>) -> Self {
        self.context = Some(context);
        self
    }

    pub fn inputs(mut self, inputs: Map<String, Value>) -> Self {
        self.inputs = Some(inputs);
        self
    }

    /// Add a single prompt variable.
    pub fn input(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.inputs
            .get_or_insert_with(Map::new)
            .insert(name.into(), value.into());
        self
    }

    pub fn metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub(crate) fn to_request(&self) -> Result<DeploymentRequest<'_>> {
        if self.key.trim().is_empty() {
            return Err(Error::invalid_argument(
                "the deployment key is required",
                ErrorContext::new()
                    .with_field_path("key")
                    .with_source("deployments"),
            ));
        }

        Ok(DeploymentRequest {
            key: &self.key,
            context: self.context.as_ref(),
            variables: self.inputs.as_ref(),
            metadata: self.metadata.as_ref(),
        })
    }
}

impl From<&str> for InvokeParams {
    fn from(key: &str) -> Self {
        InvokeParams::new(key)
    }
}

impl From<String> for InvokeParams {
    fn from(key: String) -> Self {
        InvokeParams::new(key)
    }
}

/// Wire body of `get_config` and `invoke`.
#[derive(Debug, Serialize)]
pub(crate) struct DeploymentRequest<'a> {
    key: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    context: Option<&'a Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    variables: Option<&'a Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<&'a Map<String, Value>>,
}
