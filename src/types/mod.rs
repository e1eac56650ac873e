//! Domain model: typed deployment configuration and invocation results.
//!
//! # Types Module
//!
//! Entities are serde types. The facade builds them with `from_value`, which rejects a
//! missing id and binds the metrics capability; they are never mutated afterwards.
//! `to_value` re-serializes them and optional fields keep their presence through the
//! round trip.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`DeploymentConfig`] | Provider, model, prompt template, parameters and tools |
//! | [`Deployment`] | One invocation result (or one streamed chunk) |
//! | [`DeploymentDataChoice`] | A choice with its message and finish reason |
//! | [`DeploymentDataChoiceMessage`] | Role, content, url and tool calls |
//! | [`Field`] | Absent / null / value tri-state |
//! | [`DeploymentMetrics`] | Feedback, usage and performance report |

pub mod config;
pub mod deployment;
pub mod field;
pub mod identity;
pub mod message;
pub mod metrics;
mod normalize;

pub use config::{DeploymentConfig, DeploymentType};
pub use deployment::{Deployment, DeploymentDataChoice};
pub use field::Field;
pub use identity::MetricsReporter;
pub use message::{DeploymentDataChoiceMessage, DeploymentDataChoiceToolCall, ToolCallFunction};
pub use metrics::{DeploymentFeedback, DeploymentMetrics, DeploymentPerformance, DeploymentUsage};
