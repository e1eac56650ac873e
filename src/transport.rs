//! Transport layer: the single network capability the deployments facade depends on.
//!
//! The facade never talks to `reqwest` directly. It hands a [`TransportRequest`] to an
//! injected [`Transport`] and receives either a fully buffered body or a lazy stream of
//! text lines. [`HttpTransport`] is the default implementation; [`InMemoryTransport`]
//! replays scripted responses in tests.

mod http;
mod memory;

pub use http::{split_lines, HttpTransport, ENVIRONMENT_HEADER};
pub use memory::InMemoryTransport;

use crate::{BoxStream, Error, ErrorContext, Result};
use async_trait::async_trait;
use bytes::Bytes;
use serde_json::Value;

/// One authenticated POST.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportRequest {
    pub url: String,
    pub api_key: String,
    pub environment: Option<String>,
    pub body: Value,
}

/// Fully buffered response.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Bytes,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// The service signals success with exactly 200; anything else is a failure.
    pub fn is_success(&self) -> bool {
        self.status == 200
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json(&self) -> Result<Value> {
        serde_json::from_slice(&self.body).map_err(|e| {
            Error::malformed(
                "response body is not valid JSON",
                ErrorContext::new()
                    .with_details(e.to_string())
                    .with_source("transport"),
            )
        })
    }

    /// Convert a non-success response into [`Error::RequestFailed`].
    pub fn error_for_status(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(Error::RequestFailed {
                status: self.status,
                body: self.text(),
            })
        }
    }
}

/// Streaming response: status plus a lazy, single-pass sequence of raw text lines.
pub struct StreamingResponse {
    pub status: u16,
    pub lines: BoxStream<'static, String>,
}

impl StreamingResponse {
    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

impl std::fmt::Debug for StreamingResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamingResponse")
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn post(&self, request: &TransportRequest) -> Result<TransportResponse>;

    async fn post_stream(&self, request: &TransportRequest) -> Result<StreamingResponse>;
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Other(String),
}
