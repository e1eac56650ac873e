//! Metric groups reported through `add_metrics`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentFeedback {
    pub score: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentUsage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_tokens: Option<u64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DeploymentPerformance {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_to_first_token: Option<f64>,
}

/// Body of a metrics report. Unset groups are left out of the request entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeploymentMetrics {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<DeploymentFeedback>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<DeploymentUsage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performance: Option<DeploymentPerformance>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl DeploymentMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feedback(mut self, score: i64) -> Self {
        self.feedback = Some(DeploymentFeedback { score });
        self
    }

    pub fn usage(mut self, usage: DeploymentUsage) -> Self {
        self.usage = Some(usage);
        self
    }

    pub fn performance(mut self, performance: DeploymentPerformance) -> Self {
        self.performance = Some(performance);
        self
    }

    pub fn metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn chain_id(mut self, id: impl Into<String>) -> Self {
        self.chain_id = Some(id.into());
        self
    }

    pub fn conversation_id(mut self, id: impl Into<String>) -> Self {
        self.conversation_id = Some(id.into());
        self
    }

    pub fn user_id(mut self, id: impl Into<String>) -> Self {
        self.user_id = Some(id.into());
        self
    }
}
