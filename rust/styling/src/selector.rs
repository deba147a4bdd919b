// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Representation selection
//!
//! Visible geometry conventionally lives in a representation tagged `"Body"`,
//! either on the representation identifier or on the identifier of its
//! geometric context. Elements without a Body tag fall back to all of their
//! representations.

use ifc_syscolor_model::{Document, EntityId, Representation, Result};

const BODY: &str = "Body";

/// Collect the representation items of an element eligible for styling
///
/// Prefers representations tagged `"Body"`; falls back to the full set when
/// none carry the tag. Items are returned flattened in document order; the
/// result may be empty. Computed fresh per call.
pub fn body_items(doc: &Document, element: EntityId) -> Result<Vec<EntityId>> {
    let all = doc.representations_of(element)?;

    let body: Vec<&Representation> = all.iter().copied().filter(|r| is_body(r)).collect();
    let selected = if body.is_empty() { all } else { body };

    Ok(selected
        .iter()
        .flat_map(|r| r.items.iter().copied())
        .collect())
}

#[inline]
fn is_body(rep: &Representation) -> bool {
    rep.identifier.as_deref() == Some(BODY) || rep.context_identifier.as_deref() == Some(BODY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ifc_syscolor_model::ElementClass;

    #[test]
    fn test_body_representation_is_preferred() {
        let mut doc = Document::new();
        let duct = doc.add_element(ElementClass::DuctSegment, None);
        let axis_item = doc.add_item();
        let body_a = doc.add_item();
        let body_b = doc.add_item();
        doc.add_representation(duct, Some("Axis"), None, &[axis_item])
            .unwrap();
        doc.add_representation(duct, Some("Body"), None, &[body_a, body_b])
            .unwrap();

        assert_eq!(body_items(&doc, duct).unwrap(), vec![body_a, body_b]);
    }

    #[test]
    fn test_context_identifier_counts_as_body() {
        let mut doc = Document::new();
        let pipe = doc.add_element(ElementClass::PipeSegment, None);
        let item = doc.add_item();
        doc.add_representation(pipe, Some("Facetation"), Some("Body"), &[item])
            .unwrap();

        assert_eq!(body_items(&doc, pipe).unwrap(), vec![item]);
    }

    #[test]
    fn test_fallback_to_all_representations() {
        let mut doc = Document::new();
        let wall = doc.add_element(ElementClass::Wall, None);
        let a = doc.add_item();
        let b = doc.add_item();
        doc.add_representation(wall, Some("Axis"), None, &[a]).unwrap();
        doc.add_representation(wall, None, None, &[b]).unwrap();

        assert_eq!(body_items(&doc, wall).unwrap(), vec![a, b]);
    }

    #[test]
    fn test_element_without_representations_yields_empty() {
        let mut doc = Document::new();
        let proxy = doc.add_element(ElementClass::BuildingElementProxy, None);
        assert!(body_items(&doc, proxy).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_element_is_an_error() {
        let doc = Document::new();
        assert!(body_items(&doc, 404).is_err());
    }
}
