//! Shared decoding entry point for the domain model.

use crate::{Error, ErrorContext, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Deserialize `value` into an entity, reporting failures as `MalformedResponse`.
///
/// The message is serde's (e.g. "missing field `message`"); `entity` names what was
/// being decoded.
pub(crate) fn decode<T: DeserializeOwned>(value: &Value, entity: &str) -> Result<T> {
    T::deserialize(value).map_err(|err| {
        Error::malformed(
            err.to_string(),
            ErrorContext::new()
                .with_details(format!("while decoding {entity}"))
                .with_source("normalizer"),
        )
    })
}
