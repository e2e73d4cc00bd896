//! Error taxonomy unification
//!
//! Failures reach the host from two directions: exceptions raised on the
//! host side and diagnostics rendered by the native engine. They share no
//! type, so the variant is recovered from the fields a value carries:
//!
//! 1. text is a bare message;
//! 2. anything exposing a `stack` field is a host exception;
//! 3. anything else with a truthy `formatted` field is an engine diagnostic;
//! 4. whatever remains is passed through untouched.
//!
//! [`concat_error_msg_and_stack`] folds every variant into a
//! [`CanonicalError`] carrying the richest text available.

use crate::errors::BridgeError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use tracing::trace;

const DEFAULT_ERROR_NAME: &str = "Error";

/// An exception raised on the host side.
///
/// Holds every field the host sent; only `message` is ever rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HostException {
    fields: Map<String, Value>,
}

impl HostException {
    pub fn new(message: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert("name".to_string(), Value::from(DEFAULT_ERROR_NAME));
        fields.insert("message".to_string(), Value::String(message.into()));
        HostException { fields }
    }

    pub fn from_fields(fields: Map<String, Value>) -> Self {
        HostException { fields }
    }

    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.fields
            .insert("stack".to_string(), Value::String(stack.into()));
        self
    }

    pub fn name(&self) -> &str {
        str_field(&self.fields, "name").unwrap_or(DEFAULT_ERROR_NAME)
    }

    pub fn message(&self) -> Option<&str> {
        str_field(&self.fields, "message")
    }

    pub fn stack(&self) -> Option<&str> {
        str_field(&self.fields, "stack")
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Replace the message with the stack when the stack is non-empty.
    ///
    /// Stacks already start with the message, so nothing is lost.
    pub fn fold_stack(&mut self) {
        let Some(stack) = self.stack().filter(|s| !s.is_empty()) else {
            return;
        };
        let stack = stack.to_string();
        self.fields
            .insert("message".to_string(), Value::String(stack));
    }
}

/// A diagnostic produced and pre-rendered by the native engine.
///
/// Kept exactly as received; the accessors only read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EngineError {
    fields: Map<String, Value>,
}

impl EngineError {
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        EngineError { fields }
    }

    pub fn message(&self) -> Option<&str> {
        str_field(&self.fields, "message")
    }

    /// The `formatted` marker in whatever type the engine sent
    pub fn formatted(&self) -> Option<&Value> {
        self.fields.get("formatted")
    }

    pub fn title(&self) -> Option<&str> {
        str_field(&self.fields, "title")
    }

    pub fn module_identifier(&self) -> Option<&str> {
        str_field(&self.fields, "moduleIdentifier")
    }

    pub fn module_name(&self) -> Option<&str> {
        str_field(&self.fields, "moduleName")
    }

    pub fn file(&self) -> Option<&str> {
        str_field(&self.fields, "file")
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

/// A failure value before unification
#[derive(Debug, Clone, PartialEq)]
pub enum Failure {
    Text(String),
    Exception(HostException),
    Engine(EngineError),
    Opaque(Value),
}

impl Failure {
    /// Classify an untyped value by probing its fields.
    pub fn from_value(value: Value) -> Failure {
        let failure = match value {
            Value::String(text) => Failure::Text(text),
            Value::Object(map) if map.contains_key("stack") => {
                Failure::Exception(HostException::from_fields(map))
            }
            Value::Object(map) if map.get("formatted").is_some_and(is_truthy) => {
                Failure::Engine(EngineError::from_fields(map))
            }
            other => Failure::Opaque(other),
        };
        trace!(variant = failure.variant_name(), "classified failure");
        failure
    }

    fn variant_name(&self) -> &'static str {
        match self {
            Failure::Text(_) => "text",
            Failure::Exception(_) => "exception",
            Failure::Engine(_) => "engine",
            Failure::Opaque(_) => "opaque",
        }
    }
}

impl From<String> for Failure {
    fn from(text: String) -> Self {
        Failure::Text(text)
    }
}

impl From<&str> for Failure {
    fn from(text: &str) -> Self {
        Failure::Text(text.to_string())
    }
}

impl From<HostException> for Failure {
    fn from(exception: HostException) -> Self {
        Failure::Exception(exception)
    }
}

impl From<EngineError> for Failure {
    fn from(error: EngineError) -> Self {
        Failure::Engine(error)
    }
}

/// The single error shape reported to the host
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CanonicalError {
    Host(HostException),
    Engine(EngineError),
    Opaque(Value),
}

impl CanonicalError {
    /// Unify an untyped failure value
    pub fn from_value(value: Value) -> Self {
        concat_error_msg_and_stack(Failure::from_value(value))
    }

    /// The diagnostic text; falls back to the rendered form, then to JSON
    pub fn message(&self) -> String {
        let fields = match self {
            CanonicalError::Host(exception) => exception.fields(),
            CanonicalError::Engine(error) => error.fields(),
            CanonicalError::Opaque(Value::Object(map)) => map,
            CanonicalError::Opaque(other) => return other.to_string(),
        };
        if let Some(message) = str_field(fields, "message") {
            return message.to_string();
        }
        match self {
            CanonicalError::Engine(error) => match error.formatted() {
                Some(Value::String(text)) => text.clone(),
                _ => Value::Object(fields.clone()).to_string(),
            },
            _ => Value::Object(fields.clone()).to_string(),
        }
    }

    /// The unified error as the host-side value it was built from
    pub fn into_value(self) -> Value {
        match self {
            CanonicalError::Host(exception) => Value::Object(exception.fields),
            CanonicalError::Engine(error) => Value::Object(error.fields),
            CanonicalError::Opaque(value) => value,
        }
    }
}

impl fmt::Display for CanonicalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for CanonicalError {}

impl From<BridgeError> for CanonicalError {
    fn from(err: BridgeError) -> Self {
        CanonicalError::Host(HostException::new(err.to_string()))
    }
}

/// Fold a failure into its canonical form.
///
/// Text becomes a host exception, exceptions get their stack folded into the
/// message, and engine diagnostics or unrecognised values pass through.
pub fn concat_error_msg_and_stack(failure: Failure) -> CanonicalError {
    match failure {
        Failure::Text(text) => CanonicalError::Host(HostException::new(text)),
        Failure::Exception(mut exception) => {
            exception.fold_stack();
            CanonicalError::Host(exception)
        }
        Failure::Engine(error) => CanonicalError::Engine(error),
        Failure::Opaque(value) => CanonicalError::Opaque(value),
    }
}

/// Whether a value is an engine-rendered stats diagnostic rather than an exception
pub fn is_engine_formatted(value: &Value) -> bool {
    match value {
        Value::Object(map) => {
            !map.contains_key("stack") && map.get("formatted").is_some_and(is_truthy)
        }
        _ => false,
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn str_field<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    map.get(key).and_then(Value::as_str)
}
