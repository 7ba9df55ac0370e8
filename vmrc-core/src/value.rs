//! The value union crossing the RPC boundary.
//!
//! Calls carry ordered argument lists and return a single value; arrays
//! cover multi-valued results. Managed object references travel as plain
//! strings — the typed wrappers in [`crate::handle`] exist only on the
//! client side.

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// A single value passed to or returned from a remote call.
///
/// Deserialization is untagged: `null` is [`Value::Void`], JSON booleans,
/// integers, strings, and arrays map to the matching variants. Fractional
/// numbers are rejected — the protocol has no floating-point values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
#[non_exhaustive]
pub enum Value {
    /// Absence of a result (calls with a void return).
    Void,
    /// A boolean attribute, e.g. a completion flag.
    Bool(bool),
    /// An integer; covers unsigned counts and signed result codes.
    Int(i64),
    /// A string; also the wire form of managed object references.
    Str(String),
    /// An ordered list of values.
    Array(Vec<Value>),
}

impl Value {
    /// Returns a short name for the variant, used in mismatch errors.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Void => "void",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Str(_) => "string",
            Value::Array(_) => "array",
        }
    }

    /// Borrows the string content, if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Consumes the value as a string.
    ///
    /// # Errors
    /// Returns [`CoreError::TypeMismatch`] for any other variant.
    pub fn into_string(self) -> Result<String, CoreError> {
        match self {
            Value::Str(s) => Ok(s),
            other => Err(CoreError::TypeMismatch { expected: "string", found: other.kind() }),
        }
    }

    /// Reads the value as a boolean.
    ///
    /// # Errors
    /// Returns [`CoreError::TypeMismatch`] for any other variant.
    pub fn to_bool(&self) -> Result<bool, CoreError> {
        match self {
            Value::Bool(b) => Ok(*b),
            other => Err(CoreError::TypeMismatch { expected: "bool", found: other.kind() }),
        }
    }

    /// Reads the value as an unsigned 32-bit integer.
    ///
    /// # Errors
    /// Returns [`CoreError::TypeMismatch`] for non-integer variants and
    /// [`CoreError::IntegerRange`] for integers outside `u32`.
    pub fn to_u32(&self) -> Result<u32, CoreError> {
        match self {
            Value::Int(n) => {
                u32::try_from(*n).map_err(|_| CoreError::IntegerRange { expected: "u32", value: *n })
            }
            other => Err(CoreError::TypeMismatch { expected: "int", found: other.kind() }),
        }
    }

    /// Reads the value as a signed 32-bit integer (result codes).
    ///
    /// # Errors
    /// Returns [`CoreError::TypeMismatch`] for non-integer variants and
    /// [`CoreError::IntegerRange`] for integers outside `i32`.
    pub fn to_i32(&self) -> Result<i32, CoreError> {
        match self {
            Value::Int(n) => {
                i32::try_from(*n).map_err(|_| CoreError::IntegerRange { expected: "i32", value: *n })
            }
            other => Err(CoreError::TypeMismatch { expected: "int", found: other.kind() }),
        }
    }

    /// Consumes the value as an array.
    ///
    /// # Errors
    /// Returns [`CoreError::TypeMismatch`] for any other variant.
    pub fn into_array(self) -> Result<Vec<Value>, CoreError> {
        match self {
            Value::Array(values) => Ok(values),
            other => Err(CoreError::TypeMismatch { expected: "array", found: other.kind() }),
        }
    }

    /// Consumes the value as an array of strings.
    ///
    /// # Errors
    /// Returns [`CoreError::TypeMismatch`] if the value is not an array or
    /// any element is not a string.
    pub fn into_string_array(self) -> Result<Vec<String>, CoreError> {
        self.into_array()?
            .into_iter()
            .map(Value::into_string)
            .collect()
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self {
        Value::Array(values)
    }
}
