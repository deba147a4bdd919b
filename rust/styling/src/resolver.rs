// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! System Type resolution
//!
//! An element's System Type may live on an instance property set or on the
//! property sets of its type definition. Instance wins; the type definition is
//! the fallback. Key matching is canonical (case and punctuation insensitive),
//! values are unwrapped to their scalar and coerced to text.

use crate::canon::{canon, SYSTEM_TYPE_KEY};
use ifc_syscolor_model::{Document, EntityId, PropertySet};

/// Resolve the effective System Type of an element
///
/// Pure read; returns `None` when neither the instance property sets nor the
/// type definition carry a non-empty System Type.
pub fn resolve_system_type(doc: &Document, element: EntityId) -> Option<String> {
    // Instance property sets first
    if let Some(found) = scan_property_sets(doc.property_sets_of(element)) {
        return Some(found);
    }

    // Fall back to the element's type definition
    let tdef = doc.type_definition_of(element)?;
    scan_property_sets(doc.type_property_sets(tdef))
}

/// Scan property sets for the first non-empty System Type value
fn scan_property_sets<'a>(psets: impl Iterator<Item = &'a PropertySet>) -> Option<String> {
    for pset in psets {
        for prop in &pset.properties {
            if canon(&prop.name) == SYSTEM_TYPE_KEY {
                if let Some(text) = prop.value.to_text() {
                    return Some(text);
                }
                // Empty value: keep scanning, another set may carry it
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use ifc_syscolor_model::{ElementClass, Property, Value};

    fn text_prop(name: &str, value: &str) -> Property {
        Property::new(name, Value::Text(value.to_string()))
    }

    fn element_with_instance_pset(doc: &mut Document, props: Vec<Property>) -> EntityId {
        let element = doc.add_element(ElementClass::DuctSegment, None);
        let pset = doc.add_property_set("Mechanical", props);
        doc.relate_properties(element, pset).unwrap();
        element
    }

    fn attach_type_pset(doc: &mut Document, element: EntityId, props: Vec<Property>) {
        let tdef = doc.add_type_definition(Some("DuctType-A"));
        let pset = doc.add_property_set("Mechanical", props);
        doc.attach_type_property_set(tdef, pset).unwrap();
        doc.relate_type(element, tdef).unwrap();
    }

    #[test]
    fn test_instance_value_wins_over_type() {
        let mut doc = Document::new();
        let element =
            element_with_instance_pset(&mut doc, vec![text_prop("System Type", "Supply Air")]);
        attach_type_pset(&mut doc, element, vec![text_prop("System Type", "Return Air")]);

        assert_eq!(
            resolve_system_type(&doc, element).as_deref(),
            Some("Supply Air")
        );
    }

    #[test]
    fn test_type_definition_is_the_fallback() {
        let mut doc = Document::new();
        let element = doc.add_element(ElementClass::PipeSegment, None);
        attach_type_pset(
            &mut doc,
            element,
            vec![text_prop("System Type", "Chilled Water")],
        );

        assert_eq!(
            resolve_system_type(&doc, element).as_deref(),
            Some("Chilled Water")
        );
    }

    #[test]
    fn test_key_matching_ignores_case_and_punctuation() {
        let mut doc = Document::new();
        let element =
            element_with_instance_pset(&mut doc, vec![text_prop("SYSTEM_TYPE", "Exhaust Air")]);

        assert_eq!(
            resolve_system_type(&doc, element).as_deref(),
            Some("Exhaust Air")
        );
    }

    #[test]
    fn test_wrapped_value_is_unwrapped() {
        let mut doc = Document::new();
        let element = element_with_instance_pset(
            &mut doc,
            vec![Property::new(
                "System Type",
                Value::Wrapped(Box::new(Value::Text("Condenser Water".to_string()))),
            )],
        );

        assert_eq!(
            resolve_system_type(&doc, element).as_deref(),
            Some("Condenser Water")
        );
    }

    #[test]
    fn test_empty_instance_value_falls_through_to_type() {
        let mut doc = Document::new();
        let element = element_with_instance_pset(&mut doc, vec![text_prop("System Type", "  ")]);
        attach_type_pset(&mut doc, element, vec![text_prop("System Type", "Return Air")]);

        assert_eq!(
            resolve_system_type(&doc, element).as_deref(),
            Some("Return Air")
        );
    }

    #[test]
    fn test_no_system_type_anywhere() {
        let mut doc = Document::new();
        let element = element_with_instance_pset(&mut doc, vec![text_prop("Reference", "D-7")]);
        assert_eq!(resolve_system_type(&doc, element), None);
    }

    #[test]
    fn test_numeric_value_coerces_to_text() {
        let mut doc = Document::new();
        let element =
            element_with_instance_pset(&mut doc, vec![Property::new("System Type", Value::Integer(3))]);
        assert_eq!(resolve_system_type(&doc, element).as_deref(), Some("3"));
    }
}
