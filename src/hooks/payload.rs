//! Inbound event payloads
//!
//! The host writes one JSON object to stdin per invocation. Anything that
//! cannot be read as the expected shape becomes the empty event.

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::io::Read;

pub use crate::session::SessionEvent;
pub use crate::tools::ToolEvent;

/// Assistant response event
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AssistantResponse {
    #[serde(default)]
    pub response_text: String,
}

/// Parse a payload from raw text. Blank input is the empty event.
pub fn parse_payload<T>(raw: &str) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    if raw.trim().is_empty() {
        return Ok(T::default());
    }
    serde_json::from_str(raw).map_err(|e| Error::Payload(e.to_string()))
}

/// Read and parse a payload, degrading to the empty event on any failure
pub fn read_payload<T, R>(mut reader: R) -> T
where
    T: DeserializeOwned + Default,
    R: Read,
{
    let mut raw = String::new();
    if let Err(e) = reader.read_to_string(&mut raw) {
        tracing::debug!(error = %e, "Could not read event payload");
        return T::default();
    }

    parse_payload(&raw).unwrap_or_else(|e| {
        tracing::debug!(error = %e, "Ignoring malformed event payload");
        T::default()
    })
}
