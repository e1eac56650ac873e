//! Line decoder: one transport chunk in, zero or more JSON records out.

use serde_json::{Deserializer, Value};
use tracing::debug;

const DATA_PREFIX: &str = "data:";
const DONE_SIGNAL: &str = "[DONE]";

/// Extract the JSON records carried by one chunk of a streamed response.
///
/// - blank chunks, SSE comments (`:`), non-data SSE fields and `[DONE]` yield nothing
/// - a `data:` prefix is stripped
/// - several concatenated records in one chunk are returned in order; top-level arrays
///   are flattened
/// - text that is not JSON is framing noise and yields nothing; records decoded before
///   the first unparseable byte are kept
pub fn extract_records(chunk: &str) -> Vec<Value> {
    let mut records = Vec::new();

    for line in chunk.lines() {
        let Some(payload) = payload_of(line) else {
            continue;
        };

        for item in Deserializer::from_str(payload).into_iter::<Value>() {
            match item {
                Ok(Value::Array(items)) => records.extend(items.into_iter().filter(is_record)),
                Ok(value) if is_record(&value) => records.push(value),
                Ok(other) => debug!(value = %other, "skipping non-object stream record"),
                Err(e) => {
                    debug!(error = %e, line = %payload, "skipping undecodable stream chunk");
                    break;
                }
            }
        }
    }

    records
}

fn payload_of(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with(':') {
        return None;
    }

    let payload = match trimmed.strip_prefix(DATA_PREFIX) {
        Some(rest) => rest.trim_start(),
        None if is_sse_field(trimmed) => return None,
        None => trimmed,
    };

    if payload.is_empty() || payload == DONE_SIGNAL {
        None
    } else {
        Some(payload)
    }
}

fn is_sse_field(line: &str) -> bool {
    ["event:", "id:", "retry:"]
        .iter()
        .any(|field| line.starts_with(field))
}

fn is_record(value: &Value) -> bool {
    value.is_object()
}
