//! Response decoding.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::PoolResult;

/// How the body of a successful response is handed back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeMode {
    /// Ignore the body.
    Discard,
    /// Return the raw body as text.
    Text,
    /// Parse the body as JSON.
    Json,
}

/// A decoded response body.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    Empty,
    Text(String),
    Json(Value),
}

impl Decoded {
    pub fn into_text(self) -> Option<String> {
        match self {
            Decoded::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn into_json(self) -> Option<Value> {
        match self {
            Decoded::Json(value) => Some(value),
            _ => None,
        }
    }
}

/// Decode a response body according to `mode`.
pub fn decode(mode: DecodeMode, body: &[u8]) -> PoolResult<Decoded> {
    Ok(match mode {
        DecodeMode::Discard => Decoded::Empty,
        DecodeMode::Text => Decoded::Text(decode_text(body)),
        DecodeMode::Json => Decoded::Json(decode_json(body)?),
    })
}

pub fn decode_text(body: &[u8]) -> String {
    String::from_utf8_lossy(body).into_owned()
}

pub fn decode_json<T: DeserializeOwned>(body: &[u8]) -> PoolResult<T> {
    Ok(serde_json::from_slice(body)?)
}
