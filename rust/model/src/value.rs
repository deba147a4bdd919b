// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scalar property values
//!
//! Property values are booleans, numbers, or text. A value may additionally be
//! wrapped in a measure type (the STEP `IFCLABEL('...')` idiom); consumers
//! unwrap to the scalar before comparing or returning it.

use std::fmt;

/// A property value attached to a property set entry
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Boolean value
    Boolean(bool),
    /// Integer value
    Integer(i64),
    /// Real (floating point) value
    Real(f64),
    /// Text value
    Text(String),
    /// Value wrapped in a measure type, e.g. `IFCLABEL('Chilled Water')`
    Wrapped(Box<Value>),
    /// Null/undefined
    Null,
}

impl Value {
    /// Unwrap nested measure wrappers down to the scalar
    #[inline]
    pub fn scalar(&self) -> &Value {
        match self {
            Value::Wrapped(inner) => inner.scalar(),
            other => other,
        }
    }

    /// Get as boolean
    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self.scalar() {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as text
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match self.scalar() {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get as float (integers widen)
    #[inline]
    pub fn as_float(&self) -> Option<f64> {
        match self.scalar() {
            Value::Real(f) => Some(*f),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Check if null after unwrapping
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self.scalar(), Value::Null)
    }

    /// Check if the value is missing for lookup purposes: null, or empty text
    #[inline]
    pub fn is_empty(&self) -> bool {
        match self.scalar() {
            Value::Null => true,
            Value::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Coerce the scalar to text, or `None` when the value is missing
    pub fn to_text(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        Some(self.scalar().to_string())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Real(r) => write!(f, "{}", r),
            Value::Text(s) => write!(f, "{}", s),
            Value::Null => Ok(()),
            Value::Wrapped(inner) => inner.fmt(f),
        }
    }
}
