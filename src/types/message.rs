//! Choice messages and the tool calls they may carry.

use crate::types::normalize::decode;
use crate::types::Field;
use crate::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Message produced by a deployment choice.
///
/// `url` and `content` exist only when the payload gave them a non-null value, and keep
/// that value verbatim (a string, or e.g. a list of content parts). A message with
/// `tool_calls` always has `content`, possibly [`Field::Null`]. Re-serialization emits
/// `url`/`content` only when they hold a value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "MessagePayload")]
pub struct DeploymentDataChoiceMessage {
    pub role: String,
    #[serde(skip_serializing_if = "Field::is_unset")]
    pub url: Field<Value>,
    #[serde(skip_serializing_if = "Field::is_unset")]
    pub content: Field<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<DeploymentDataChoiceToolCall>>,
}

/// Message as it appears on the wire, before presence rules apply.
#[derive(Deserialize)]
struct MessagePayload {
    role: String,
    #[serde(default)]
    url: Field<Value>,
    #[serde(default)]
    content: Field<Value>,
    #[serde(default)]
    tool_calls: Option<Vec<DeploymentDataChoiceToolCall>>,
}

impl From<MessagePayload> for DeploymentDataChoiceMessage {
    fn from(payload: MessagePayload) -> Self {
        let mut content = payload.content.non_null();
        if payload.tool_calls.is_some() {
            content = content.or_null();
        }
        Self {
            role: payload.role,
            url: payload.url.non_null(),
            content,
            tool_calls: payload.tool_calls,
        }
    }
}

impl DeploymentDataChoiceMessage {
    pub fn from_value(value: &Value) -> Result<Self> {
        decode(value, "message")
    }

    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Content as text, when the payload sent a plain string.
    pub fn text(&self) -> Option<&str> {
        self.content.value().and_then(Value::as_str)
    }
}

/// Tool invocation requested by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeploymentDataChoiceToolCall {
    /// Required key, value kept verbatim (usually `"function"`).
    #[serde(rename = "type")]
    pub tool_type: Value,
    pub function: ToolCallFunction,
}

impl DeploymentDataChoiceToolCall {
    pub fn from_value(value: &Value) -> Result<Self> {
        decode(value, "tool call")
    }

    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Function name and (usually JSON-encoded) arguments of a tool call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolCallFunction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
    /// Opaque; typically a string holding encoded call arguments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<Value>,
}
