//! Tagged observation values.
//!
//! Observers declare a [`ValueKind`] up front and produce a matching [`Value`]
//! every tick.  Conditions are keyed on the same tag, so an observer/condition
//! pairing is checked once when compiled blocks are built instead of probing
//! runtime types on every evaluation.

use std::fmt;

// ── ValueKind ─────────────────────────────────────────────────────────────────

/// The type tag of an observation value.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValueKind {
    Bool,
    Int,
    Float,
    Text,
}

impl ValueKind {
    /// The neutral starting value for this kind — what a condition sees on the
    /// very first tick, before the owning observer has produced anything.
    pub fn default_value(self) -> Value {
        match self {
            ValueKind::Bool  => Value::Bool(false),
            ValueKind::Int   => Value::Int(0),
            ValueKind::Float => Value::Float(0.0),
            ValueKind::Text  => Value::Text(String::new()),
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Bool  => "bool",
            ValueKind::Int   => "int",
            ValueKind::Float => "float",
            ValueKind::Text  => "text",
        };
        f.write_str(name)
    }
}

// ── Value ─────────────────────────────────────────────────────────────────────

/// A sensed value produced by an observer.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Value {
    /// The type tag of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Bool(_)  => ValueKind::Bool,
            Value::Int(_)   => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::Text(_)  => ValueKind::Text,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(v) => Some(v),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(v)  => write!(f, "{v}"),
            Value::Int(v)   => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Text(v)  => f.write_str(v),
        }
    }
}
