//! Raw JSON input mode.
//!
//! The payload is typed in directly instead of being drawn in the builder.
//! Anything that does not parse, or lacks one of the top-level keys, is
//! rejected before a request is made. Everything else is forwarded exactly as
//! written: field values are not coerced and unknown fields are kept, the
//! backend decides what it accepts.

use serde_json::Value;
use thiserror::Error;

/// 顶层必须出现的键
pub const TOPOLOGY_KEYS: [&str; 3] = ["nodes", "links", "flows"];

#[derive(Debug, Error)]
pub enum TopologyInputError {
    #[error("topology input is empty")]
    Empty,
    #[error("invalid topology JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("invalid topology JSON: expected an object with nodes, links and flows")]
    NotAnObject,
    #[error("invalid topology JSON: missing `{0}`")]
    MissingKey(&'static str),
}

pub fn parse_topology_json(text: &str) -> Result<Value, TopologyInputError> {
    if text.trim().is_empty() {
        return Err(TopologyInputError::Empty);
    }
    let value: Value = serde_json::from_str(text)?;
    let Some(obj) = value.as_object() else {
        return Err(TopologyInputError::NotAnObject);
    };
    if let Some(key) = TOPOLOGY_KEYS.into_iter().find(|k| !obj.contains_key(*k)) {
        return Err(TopologyInputError::MissingKey(key));
    }
    Ok(value)
}
