//! Byte/object normalization for boundary payloads
//!
//! Call sites accept text, byte buffers or structured objects and must hand
//! the native engine exactly one shape. Content is only ever re-encoded,
//! never rewritten.

use crate::errors::BridgeError;
use crate::value::HostValue;
use serde_json::Value;
use tracing::debug;

/// Coerce text or bytes into a byte buffer.
///
/// Bytes are returned as-is and text is encoded as UTF-8.
pub fn to_buffer(input: impl Into<HostValue>) -> Result<Vec<u8>, BridgeError> {
    match input.into() {
        HostValue::Bytes(bytes) => Ok(bytes),
        HostValue::Text(text) => Ok(text.into_bytes()),
        other => Err(invalid_input("byte sequence or text", &other)),
    }
}

/// Coerce text, bytes or a structured value into a parsed JSON value.
///
/// Objects (and arrays) move through untouched. Text and bytes are parsed as
/// JSON. Bytes are decoded leniently: invalid UTF-8 sequences become
/// U+FFFD before parsing.
pub fn to_object(input: impl Into<HostValue>) -> Result<Value, BridgeError> {
    match input.into() {
        HostValue::Object(map) => Ok(Value::Object(map)),
        HostValue::Array(items) => Ok(Value::Array(items)),
        HostValue::Bytes(bytes) => {
            parse_json(serde_json::from_str(&String::from_utf8_lossy(&bytes)))
        }
        HostValue::Text(text) => parse_json(serde_json::from_str(&text)),
        other => Err(invalid_input("byte sequence, text, or object", &other)),
    }
}

/// Turn an optional text-or-object payload into optional boundary bytes.
///
/// Absent, `undefined`, `null` and the empty string all mean "no payload"
/// and yield `None`. Structured values are JSON-encoded in their own key
/// order.
pub fn serialize_object(input: Option<HostValue>) -> Result<Option<Vec<u8>>, BridgeError> {
    let Some(input) = input else {
        return Ok(None);
    };

    let value = match input {
        HostValue::Undefined | HostValue::Null => return Ok(None),
        HostValue::Text(text) if text.is_empty() => return Ok(None),
        HostValue::Text(text) => return to_buffer(text).map(Some),
        bytes @ HostValue::Bytes(_) => return Err(invalid_input("text or object", &bytes)),
        HostValue::Bool(b) => Value::Bool(b),
        HostValue::Number(n) => Value::Number(n),
        HostValue::Array(items) => Value::Array(items),
        HostValue::Object(map) => Value::Object(map),
    };

    let encoded = serde_json::to_string(&value)?;
    to_buffer(encoded).map(Some)
}

fn parse_json(result: Result<Value, serde_json::Error>) -> Result<Value, BridgeError> {
    result.map_err(|e| {
        debug!(error = %e, "payload is not valid JSON");
        BridgeError::from(e)
    })
}

fn invalid_input(expected: &'static str, received: &HostValue) -> BridgeError {
    debug!(expected, received = received.kind(), "rejected boundary value");
    BridgeError::InvalidInputKind {
        expected,
        received: received.kind(),
    }
}
