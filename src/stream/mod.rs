//! Streaming invocation: turns the transport's line stream into a stream of [`Deployment`].
//!
//! The produced stream is lazy and single pass. It reads one line per poll, yields every
//! record that line carries, and ends after the first error it yields.

pub mod decode;

pub use decode::extract_records;

use crate::client::Deployments;
use crate::types::Deployment;
use crate::BoxStream;
use futures::{stream, StreamExt};
use serde_json::Value;
use std::collections::VecDeque;

struct DecodeState {
    lines: BoxStream<'static, String>,
    pending: VecDeque<Value>,
    deployments: Deployments,
    finished: bool,
}

/// Decode a stream of raw lines into deployments.
///
/// Unparseable lines are skipped. A record that parses but fails normalization is yielded
/// as `Err(MalformedResponse)` and terminates the stream, as does a transport error.
pub fn decode_deployments(
    lines: BoxStream<'static, String>,
    deployments: Deployments,
) -> BoxStream<'static, Deployment> {
    let state = DecodeState {
        lines,
        pending: VecDeque::new(),
        deployments,
        finished: false,
    };

    let out = stream::unfold(state, |mut state| async move {
        loop {
            if state.finished {
                return None;
            }

            if let Some(record) = state.pending.pop_front() {
                let item = Deployment::from_value(&record, &state.deployments);
                if item.is_err() {
                    state.finished = true;
                }
                return Some((item, state));
            }

            match state.lines.next().await {
                Some(Ok(line)) => state.pending.extend(extract_records(&line)),
                Some(Err(e)) => {
                    state.finished = true;
                    return Some((Err(e), state));
                }
                None => return None,
            }
        }
    });

    Box::pin(out)
}
