// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Property-set import from JSON attribute files
//!
//! Survey and GIS exports arrive as `{"attributes": {key: scalar, ...}}`
//! documents. The import filters the keys worth keeping, coerces each scalar
//! to a property value, and attaches the result to an element as one named
//! property set.

use crate::error::PsetError;
use ifc_syscolor_model::{Document, EntityId, Property, Value};

/// Selects which attribute keys an import retains
///
/// A key is accepted on an exact-name match or a prefix match. A filter with
/// no names and no prefixes accepts every key.
#[derive(Debug, Clone, Default)]
pub struct KeyFilter {
    exact: Vec<String>,
    prefixes: Vec<String>,
}

impl KeyFilter {
    /// Create a filter that accepts every key
    pub fn new() -> Self {
        Self::default()
    }

    /// Add exact key names to accept
    pub fn keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exact.extend(keys.into_iter().map(Into::into));
        self
    }

    /// Add key prefixes to accept
    pub fn prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prefixes.extend(prefixes.into_iter().map(Into::into));
        self
    }

    /// Check whether a key passes the filter
    pub fn accepts(&self, key: &str) -> bool {
        if self.exact.is_empty() && self.prefixes.is_empty() {
            return true;
        }
        self.exact.iter().any(|k| k == key) || self.prefixes.iter().any(|p| key.starts_with(p))
    }
}

/// Attach a property set built from a JSON attribute document to an element
///
/// Returns the id of the created property set. The element must exist; an
/// import that retains no attributes is an error rather than a silent no-op.
pub fn attach_json_pset(
    doc: &mut Document,
    element: EntityId,
    pset_name: &str,
    json: &str,
    filter: &KeyFilter,
) -> Result<EntityId, PsetError> {
    doc.element(element)?;

    let parsed: serde_json::Value = serde_json::from_str(json)?;
    let attributes = parsed
        .get("attributes")
        .and_then(|v| v.as_object())
        .ok_or(PsetError::MissingAttributes)?;

    let properties: Vec<Property> = attributes
        .iter()
        .filter(|(key, _)| filter.accepts(key))
        .map(|(key, value)| Property::new(key.as_str(), coerce_scalar(value)))
        .collect();
    if properties.is_empty() {
        return Err(PsetError::NoMatchingKeys);
    }

    let pset = doc.add_property_set(pset_name, properties);
    doc.relate_properties(element, pset)?;
    Ok(pset)
}

/// Coerce a JSON value to a property value: booleans stay booleans, numbers
/// become reals, everything else becomes text
fn coerce_scalar(value: &serde_json::Value) -> Value {
    match value {
        serde_json::Value::Bool(b) => Value::Boolean(*b),
        serde_json::Value::Number(n) => Value::Real(n.as_f64().unwrap_or(0.0)),
        serde_json::Value::String(s) => Value::Text(s.clone()),
        serde_json::Value::Null => Value::Null,
        // Arrays and objects keep their JSON text form
        other => Value::Text(other.to_string()),
    }
}
