//! # orquesta-sdk
//!
//! Client SDK for Orquesta deployments.
//!
//! Given a deployment key, the SDK fetches the deployment's configuration, invokes it
//! (optionally streaming incremental results), and reports feedback, usage and
//! performance metrics back to the service.
//!
//! ## Overview
//!
//! - **Typed results**: raw JSON payloads are normalized into [`DeploymentConfig`] and
//!   [`Deployment`], with field presence preserved when they are serialized again
//! - **Streaming**: line-delimited (SSE-framed) JSON is decoded lazily into a stream of
//!   [`Deployment`] chunks
//! - **Injected transport**: the network layer is the [`transport::Transport`] trait;
//!   [`transport::HttpTransport`] is the default
//! - **No hidden policy**: no retries, no caching, no rate limiting; every failure
//!   reaches the caller once
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use futures::StreamExt;
//! use orquesta_sdk::{DeploymentMetrics, InvokeParams, OrquestaClient};
//!
//! #[tokio::main]
//! async fn main() -> orquesta_sdk::Result<()> {
//!     let client = OrquestaClient::builder()
//!         .api_key("your-api-key")
//!         .environment("production")
//!         .build()?;
//!     let deployments = client.deployments();
//!
//!     let result = deployments
//!         .invoke(InvokeParams::new("customer_service").input("firstname", "John"))
//!         .await?;
//!     println!("{}", result.content().unwrap_or_default());
//!     result.add_metrics(DeploymentMetrics::new().feedback(1)).await?;
//!
//!     let mut stream = deployments.invoke_with_stream("customer_service").await?;
//!     while let Some(chunk) = stream.next().await {
//!         print!("{}", chunk?.content().unwrap_or_default());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | Client builder and the deployments facade |
//! | [`types`] | Domain model and normalization |
//! | [`stream`] | Line decoder for streamed invocations |
//! | [`transport`] | Transport trait and HTTP implementation |
//! | [`options`] | Client configuration |

pub mod client;
pub mod error;
pub mod options;
pub mod stream;
pub mod transport;
pub mod types;

// Re-export main types for convenience
pub use client::{Deployments, InvokeParams, OrquestaClient, OrquestaClientBuilder};
pub use error::{Error, ErrorContext};
pub use options::ClientOptions;
pub use types::{
    Deployment, DeploymentConfig, DeploymentDataChoice, DeploymentDataChoiceMessage,
    DeploymentDataChoiceToolCall, DeploymentFeedback, DeploymentMetrics, DeploymentPerformance,
    DeploymentType, DeploymentUsage, Field, MetricsReporter, ToolCallFunction,
};

use futures::Stream;
use std::pin::Pin;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// A unified pinned, boxed stream that emits `Result<T>`
pub type BoxStream<'a, T> = Pin<Box<dyn Stream<Item = Result<T>> + Send + 'a>>;
