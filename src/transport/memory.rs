use super::{StreamingResponse, Transport, TransportError, TransportRequest, TransportResponse};
use crate::Result;
use async_trait::async_trait;
use futures::stream;
use std::collections::VecDeque;
use std::sync::Mutex;

#[derive(Debug, Clone)]
enum Scripted {
    Body { status: u16, body: String },
    Lines { status: u16, lines: Vec<String> },
}

/// In-memory transport for testing.
///
/// Replays scripted responses in order and records every request it receives.
#[derive(Debug, Default)]
pub struct InMemoryTransport {
    responses: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<TransportRequest>>,
}

impl InMemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a buffered response.
    pub fn respond(self, status: u16, body: impl Into<String>) -> Self {
        self.push(Scripted::Body {
            status,
            body: body.into(),
        });
        self
    }

    /// Queue a streamed response delivered line by line.
    pub fn respond_lines<I, S>(self, status: u16, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(Scripted::Lines {
            status,
            lines: lines.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<TransportRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    fn push(&self, scripted: Scripted) {
        if let Ok(mut queue) = self.responses.lock() {
            queue.push_back(scripted);
        }
    }

    fn next(&self, request: &TransportRequest) -> Result<Scripted> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }
        self.responses
            .lock()
            .ok()
            .and_then(|mut queue| queue.pop_front())
            .ok_or_else(|| {
                TransportError::Other(format!("no scripted response for {}", request.url)).into()
            })
    }
}

#[async_trait]
impl Transport for InMemoryTransport {
    async fn post(&self, request: &TransportRequest) -> Result<TransportResponse> {
        Ok(match self.next(request)? {
            Scripted::Body { status, body } => TransportResponse::new(status, body),
            Scripted::Lines { status, lines } => TransportResponse::new(status, lines.join("\n")),
        })
    }

    async fn post_stream(&self, request: &TransportRequest) -> Result<StreamingResponse> {
        let (status, lines) = match self.next(request)? {
            Scripted::Body { status, body } => {
                (status, body.lines().map(str::to_string).collect::<Vec<_>>())
            }
            Scripted::Lines { status, lines } => (status, lines),
        };

        Ok(StreamingResponse {
            status,
            lines: Box::pin(stream::iter(lines.into_iter().map(Ok::<_, crate::Error>))),
        })
    }
}
