//! Normalized section values
//!
//! Every raw SNMP string is converted into exactly one `Value` before any
//! check logic sees it. "Not applicable" readings get a dedicated variant
//! instead of overloading zero.

use serde::Serialize;
use std::fmt;

/// One normalized reading in a parsed section
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Free-form device text (model name, firmware version, dates)
    Text(String),
    /// Counter or flag reading
    Int(i64),
    /// Physical measurement after unit conversion
    Float(f64),
    /// Enumerated device state resolved through a value map
    State(&'static str),
    /// Reading reported as not applicable, or a sentinel-coded value
    Unknown,
}

impl Value {
    /// Numeric view of the value. `None` for text, states and unknowns.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Integer view of the value. Floats are not silently truncated.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Textual view for `Text` and `State` values
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            Value::State(s) => Some(s),
            _ => None,
        }
    }

    /// Whether this is the explicit indeterminate reading
    pub fn is_unknown(&self) -> bool {
        matches!(self, Value::Unknown)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => write!(f, "{}", s),
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::State(s) => write!(f, "{}", s),
            Value::Unknown => write!(f, "unknown"),
        }
    }
}
