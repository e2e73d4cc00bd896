//! Host-level values as they arrive at the boundary
//!
//! `HostValue` mirrors what a scripting host can hand over: scalars, text,
//! raw byte buffers and JSON-shaped structures. Only text, bytes and objects
//! are meaningful to the normalizers; the remaining variants exist so that a
//! wrong shape can be reported by name instead of being unrepresentable.

use serde_json::{Map, Number, Value};

#[derive(Debug, Clone, PartialEq)]
pub enum HostValue {
    Undefined,
    Null,
    Bool(bool),
    Number(Number),
    Text(String),
    Bytes(Vec<u8>),
    Array(Vec<Value>),
    Object(Map<String, Value>),
}

impl HostValue {
    /// Short name of the variant, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            HostValue::Undefined => "undefined",
            HostValue::Null => "null",
            HostValue::Bool(_) => "boolean",
            HostValue::Number(_) => "number",
            HostValue::Text(_) => "text",
            HostValue::Bytes(_) => "byte sequence",
            HostValue::Array(_) => "array",
            HostValue::Object(_) => "object",
        }
    }

    /// `true` for `Undefined` and `Null`
    pub fn is_nil(&self) -> bool {
        matches!(self, HostValue::Undefined | HostValue::Null)
    }
}

impl From<&str> for HostValue {
    fn from(text: &str) -> Self {
        HostValue::Text(text.to_string())
    }
}

impl From<String> for HostValue {
    fn from(text: String) -> Self {
        HostValue::Text(text)
    }
}

impl From<Vec<u8>> for HostValue {
    fn from(bytes: Vec<u8>) -> Self {
        HostValue::Bytes(bytes)
    }
}

impl From<&[u8]> for HostValue {
    fn from(bytes: &[u8]) -> Self {
        HostValue::Bytes(bytes.to_vec())
    }
}

impl From<Map<String, Value>> for HostValue {
    fn from(map: Map<String, Value>) -> Self {
        HostValue::Object(map)
    }
}

impl From<Value> for HostValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => HostValue::Null,
            Value::Bool(b) => HostValue::Bool(b),
            Value::Number(n) => HostValue::Number(n),
            Value::String(s) => HostValue::Text(s),
            Value::Array(items) => HostValue::Array(items),
            Value::Object(map) => HostValue::Object(map),
        }
    }
}
