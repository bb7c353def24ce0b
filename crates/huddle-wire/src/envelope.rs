// huddle/huddle-wire
//
// Copyright: 2026, Huddle Contributors
// License: Mozilla Public License v2.0 (MPL v2.0)

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The `{type, payload}` unit exchanged over a persistent socket. No other
/// component reads or writes the wire directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub payload: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("Malformed JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("Invalid payload for '{event_type}': {source}")]
    InvalidPayload {
        event_type: String,
        source: serde_json::Error,
    },
}

impl Envelope {
    pub fn new(event_type: impl Into<String>, payload: Value) -> Self {
        Envelope {
            event_type: event_type.into(),
            payload,
        }
    }

    pub fn from_json(text: &str) -> Result<Self, CodecError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String, CodecError> {
        Ok(serde_json::to_string(self)?)
    }

    pub(crate) fn decode_payload<T: serde::de::DeserializeOwned>(&self) -> Result<T, CodecError> {
        serde_json::from_value(self.payload.clone()).map_err(|err| CodecError::InvalidPayload {
            event_type: self.event_type.clone(),
            source: err,
        })
    }
}
