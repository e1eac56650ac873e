use super::{StreamingResponse, Transport, TransportError, TransportRequest, TransportResponse};
use crate::{BoxStream, Result};
use async_trait::async_trait;
use bytes::Bytes;
use futures::{stream, StreamExt, TryStreamExt};
use std::time::Duration;
use tracing::{debug, warn};

/// Header carrying the target environment (e.g. "production", "staging").
pub const ENVIRONMENT_HEADER: &str = "x-environment";

/// Longest line [`split_lines`] buffers before dropping it (1 MiB).
pub const MAX_LINE_BYTES: usize = 1024 * 1024;

/// `reqwest`-backed transport. Holds one client; every call is a single request.
///
/// The configured timeout bounds connection setup for every call and the whole
/// exchange for buffered `post` calls. Streams have no total deadline.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    request_timeout: Option<Duration>,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(timeout)
            .build()
            .map_err(|e| crate::Error::Transport(TransportError::Other(e.to_string())))?;

        Ok(Self {
            client,
            request_timeout: Some(timeout),
        })
    }

    /// Wrap an already configured client. Its own timeouts apply unchanged.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client,
            request_timeout: None,
        }
    }

    fn build(&self, request: &TransportRequest) -> reqwest::RequestBuilder {
        let mut req = self
            .client
            .post(&request.url)
            .bearer_auth(&request.api_key)
            .json(&request.body);

        if let Some(env) = &request.environment {
            req = req.header(ENVIRONMENT_HEADER, env);
        }
        req
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(&self, request: &TransportRequest) -> Result<TransportResponse> {
        debug!(url = %request.url, "POST");
        let mut req = self.build(request);
        if let Some(timeout) = self.request_timeout {
            req = req.timeout(timeout);
        }
        let response = req
            .send()
            .await
            .map_err(|e| crate::Error::Transport(TransportError::Http(e)))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| crate::Error::Transport(TransportError::Http(e)))?;

        Ok(TransportResponse { status, body })
    }

    async fn post_stream(&self, request: &TransportRequest) -> Result<StreamingResponse> {
        debug!(url = %request.url, "POST (stream)");
        let response = self
            .build(request)
            .header("accept", "text/event-stream")
            .send()
            .await
            .map_err(|e| crate::Error::Transport(TransportError::Http(e)))?;

        let status = response.status().as_u16();
        let byte_stream = response
            .bytes_stream()
            .map_err(|e| crate::Error::Transport(TransportError::Http(e)));

        Ok(StreamingResponse {
            status,
            lines: split_lines(Box::pin(byte_stream)),
        })
    }
}

/// Re-frame a byte stream into text lines.
///
/// Lines end at `\n` (a trailing `\r` is dropped). Bytes are buffered until a full line is
/// available so multi-byte characters split across network chunks decode correctly. Blank
/// lines are passed through; filtering them is the line decoder's job. A line longer
/// than [`MAX_LINE_BYTES`] is dropped with a warning.
pub fn split_lines(input: BoxStream<'static, Bytes>) -> BoxStream<'static, String> {
    split_lines_with_limit(input, MAX_LINE_BYTES)
}

struct LineState {
    input: BoxStream<'static, Bytes>,
    buf: Vec<u8>,
    max_line: usize,
    /// Inside an over-long line; bytes are discarded up to the next newline.
    skipping: bool,
    eof: bool,
}

pub(crate) fn split_lines_with_limit(
    input: BoxStream<'static, Bytes>,
    max_line: usize,
) -> BoxStream<'static, String> {
    let state = LineState {
        input,
        buf: Vec::new(),
        max_line,
        skipping: false,
        eof: false,
    };

    let lines = stream::unfold(state, |mut state| async move {
        loop {
            if let Some(idx) = state.buf.iter().position(|b| *b == b'\n') {
                let mut line: Vec<u8> = state.buf.drain(..=idx).collect();
                if state.skipping {
                    state.skipping = false;
                    continue;
                }
                line.pop();
                if line.last() == Some(&b'\r') {
                    line.pop();
                }
                if line.len() > state.max_line {
                    warn!(
                        len = line.len(),
                        max = state.max_line,
                        "dropping over-long stream line"
                    );
                    continue;
                }
                let line = String::from_utf8_lossy(&line).into_owned();
                return Some((Ok(line), state));
            }

            if state.buf.len() > state.max_line {
                if !state.skipping {
                    warn!(max = state.max_line, "dropping over-long stream line");
                }
                state.buf.clear();
                state.skipping = true;
            }

            if state.eof {
                if state.buf.is_empty() || state.skipping {
                    return None;
                }
                let line = String::from_utf8_lossy(&state.buf).into_owned();
                state.buf.clear();
                return Some((Ok(line), state));
            }

            match state.input.next().await {
                Some(Ok(bytes)) => state.buf.extend_from_slice(&bytes),
                Some(Err(e)) => {
                    state.eof = true;
                    return Some((Err(e), state));
                }
                None => state.eof = true,
            }
        }
    });

    Box::pin(lines)
}
