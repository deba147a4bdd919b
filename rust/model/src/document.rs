// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory document graph
//!
//! A mutable entity store addressed by numeric ids. Entities live in per-kind
//! tables; the relations the styling pass traverses (defines-by-properties,
//! defines-by-type, styled-by-item) are kept as inverse indexes so lookups are
//! O(1) per element.

use crate::class::ElementClass;
use crate::error::{Error, Result};
use crate::value::Value;
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

/// Entity identifier, unique across all entity kinds of one document
pub type EntityId = u32;

/// A named key/value entry of a property set
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub name: String,
    pub value: Value,
}

impl Property {
    /// Create a new property
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// A named group of properties, owned by an element or a type definition
#[derive(Debug, Clone)]
pub struct PropertySet {
    pub id: EntityId,
    pub name: String,
    pub properties: Vec<Property>,
}

impl PropertySet {
    /// Get a property by exact name
    pub fn get(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }
}

/// A shared template an element may reference, carrying its own property sets
#[derive(Debug, Clone)]
pub struct TypeDefinition {
    pub id: EntityId,
    pub name: Option<String>,
    pub property_sets: SmallVec<[EntityId; 4]>,
}

/// A building-model entity (duct, wall, pipe, spatial container, ...)
#[derive(Debug, Clone)]
pub struct Element {
    pub id: EntityId,
    pub class: ElementClass,
    pub global_id: Option<String>,
    pub name: Option<String>,
    pub representations: SmallVec<[EntityId; 2]>,
}

/// A named, typed collection of geometric items owned by an element
#[derive(Debug, Clone)]
pub struct Representation {
    pub id: EntityId,
    /// Representation identifier, conventionally `"Body"` for visible geometry
    pub identifier: Option<String>,
    /// Identifier of the geometric context the representation belongs to
    pub context_identifier: Option<String>,
    pub items: SmallVec<[EntityId; 4]>,
}

/// A colour + transparency pair materialized as a shared entity
#[derive(Debug, Clone)]
pub struct SurfaceStyle {
    pub id: EntityId,
    pub name: Option<String>,
    /// Normalized RGB channels in [0, 1]
    pub rgb: [f64; 3],
    /// 0.0 = opaque, 1.0 = fully transparent
    pub transparency: f64,
}

/// The association binding styles to one representation item
#[derive(Debug, Clone)]
pub struct StyledItem {
    pub id: EntityId,
    pub item: EntityId,
    /// Style ids in attachment order; duplicates are rejected on append
    pub styles: Vec<EntityId>,
}

/// Styling state of a representation item, resolved once per target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemStyling {
    /// No styled item exists for the target yet
    Unstyled,
    /// The target already carries this styled item
    Styled(EntityId),
}

/// The mutable in-memory document graph
#[derive(Debug, Default)]
pub struct Document {
    next_id: EntityId,

    elements: FxHashMap<EntityId, Element>,
    /// Insertion order of elements for deterministic traversal
    element_order: Vec<EntityId>,

    property_sets: FxHashMap<EntityId, PropertySet>,
    type_definitions: FxHashMap<EntityId, TypeDefinition>,
    representations: FxHashMap<EntityId, Representation>,
    items: FxHashSet<EntityId>,

    styles: FxHashMap<EntityId, SurfaceStyle>,
    /// Creation order of styles for deterministic iteration
    style_order: Vec<EntityId>,
    styled_items: FxHashMap<EntityId, StyledItem>,

    /// Inverse of defines-by-properties: element -> owned property sets
    psets_of: FxHashMap<EntityId, SmallVec<[EntityId; 4]>>,
    /// Inverse of defines-by-type: element -> type definition
    type_of: FxHashMap<EntityId, EntityId>,
    /// Inverse of the styled-item association: item -> styled item
    styled_by: FxHashMap<EntityId, EntityId>,
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn alloc(&mut self) -> EntityId {
        self.next_id += 1;
        self.next_id
    }

    // ---- construction -------------------------------------------------

    /// Add an element and return its id
    pub fn add_element(&mut self, class: ElementClass, name: Option<&str>) -> EntityId {
        let id = self.alloc();
        self.elements.insert(
            id,
            Element {
                id,
                class,
                global_id: None,
                name: name.map(str::to_string),
                representations: SmallVec::new(),
            },
        );
        self.element_order.push(id);
        id
    }

    /// Add a property set and return its id
    pub fn add_property_set(&mut self, name: &str, properties: Vec<Property>) -> EntityId {
        let id = self.alloc();
        self.property_sets.insert(
            id,
            PropertySet {
                id,
                name: name.to_string(),
                properties,
            },
        );
        id
    }

    /// Add a type definition and return its id
    pub fn add_type_definition(&mut self, name: Option<&str>) -> EntityId {
        let id = self.alloc();
        self.type_definitions.insert(
            id,
            TypeDefinition {
                id,
                name: name.map(str::to_string),
                property_sets: SmallVec::new(),
            },
        );
        id
    }

    /// Add a geometric representation item (opaque geometry handle)
    pub fn add_item(&mut self) -> EntityId {
        let id = self.alloc();
        self.items.insert(id);
        id
    }

    /// Add a representation to an element, owning the given items
    pub fn add_representation(
        &mut self,
        element: EntityId,
        identifier: Option<&str>,
        context_identifier: Option<&str>,
        items: &[EntityId],
    ) -> Result<EntityId> {
        self.check_element(element)?;
        for &item in items {
            self.check_item(item)?;
        }

        let id = self.alloc();
        self.representations.insert(
            id,
            Representation {
                id,
                identifier: identifier.map(str::to_string),
                context_identifier: context_identifier.map(str::to_string),
                items: items.into(),
            },
        );
        if let Some(owner) = self.elements.get_mut(&element) {
            owner.representations.push(id);
        }
        Ok(id)
    }

    /// Relate a property set to an element (defines-by-properties)
    pub fn relate_properties(&mut self, element: EntityId, pset: EntityId) -> Result<()> {
        self.check_element(element)?;
        self.check_property_set(pset)?;
        self.psets_of.entry(element).or_default().push(pset);
        Ok(())
    }

    /// Relate a type definition to an element (defines-by-type)
    ///
    /// An element references at most one type; a second call replaces the first.
    pub fn relate_type(&mut self, element: EntityId, type_definition: EntityId) -> Result<()> {
        self.check_element(element)?;
        self.check_type_definition(type_definition)?;
        self.type_of.insert(element, type_definition);
        Ok(())
    }

    /// Attach a property set to a type definition
    pub fn attach_type_property_set(
        &mut self,
        type_definition: EntityId,
        pset: EntityId,
    ) -> Result<()> {
        self.check_property_set(pset)?;
        let tdef = self
            .type_definitions
            .get_mut(&type_definition)
            .ok_or(Error::UnknownEntity {
                id: type_definition,
                kind: "type definition",
            })?;
        tdef.property_sets.push(pset);
        Ok(())
    }

    // ---- queries ------------------------------------------------------

    /// Get an element by id
    pub fn element(&self, id: EntityId) -> Result<&Element> {
        self.elements.get(&id).ok_or(Error::UnknownEntity {
            id,
            kind: "element",
        })
    }

    /// Iterate all elements in insertion order
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.element_order
            .iter()
            .filter_map(move |id| self.elements.get(id))
    }

    /// Iterate elements of one class in insertion order
    pub fn elements_of_class(&self, class: ElementClass) -> impl Iterator<Item = &Element> {
        self.elements().filter(move |e| e.class == class)
    }

    /// Get a property set by id
    pub fn property_set(&self, id: EntityId) -> Result<&PropertySet> {
        self.property_sets.get(&id).ok_or(Error::UnknownEntity {
            id,
            kind: "property set",
        })
    }

    /// Iterate the instance property sets of an element (defines-by-properties)
    pub fn property_sets_of(&self, element: EntityId) -> impl Iterator<Item = &PropertySet> {
        self.psets_of
            .get(&element)
            .into_iter()
            .flatten()
            .filter_map(move |id| self.property_sets.get(id))
    }

    /// Get the type definition an element references, if any
    pub fn type_definition_of(&self, element: EntityId) -> Option<&TypeDefinition> {
        self.type_of
            .get(&element)
            .and_then(|id| self.type_definitions.get(id))
    }

    /// Iterate the property sets owned by a type definition
    pub fn type_property_sets<'a>(
        &'a self,
        type_definition: &'a TypeDefinition,
    ) -> impl Iterator<Item = &'a PropertySet> + 'a {
        type_definition
            .property_sets
            .iter()
            .filter_map(move |id| self.property_sets.get(id))
    }

    /// Get a representation by id
    pub fn representation(&self, id: EntityId) -> Result<&Representation> {
        self.representations.get(&id).ok_or(Error::UnknownEntity {
            id,
            kind: "representation",
        })
    }

    /// Iterate the representations of an element in attachment order
    pub fn representations_of(&self, element: EntityId) -> Result<Vec<&Representation>> {
        let element = self.element(element)?;
        element
            .representations
            .iter()
            .map(|&id| self.representation(id))
            .collect()
    }

    /// Get a surface style by id
    pub fn surface_style(&self, id: EntityId) -> Result<&SurfaceStyle> {
        self.styles.get(&id).ok_or(Error::UnknownEntity {
            id,
            kind: "surface style",
        })
    }

    /// Iterate all surface styles in creation order
    pub fn surface_styles(&self) -> impl Iterator<Item = &SurfaceStyle> {
        self.style_order
            .iter()
            .filter_map(move |id| self.styles.get(id))
    }

    /// Number of surface styles in the document
    pub fn surface_style_count(&self) -> usize {
        self.styles.len()
    }

    /// Get a styled item by id
    pub fn styled_item(&self, id: EntityId) -> Result<&StyledItem> {
        self.styled_items.get(&id).ok_or(Error::UnknownEntity {
            id,
            kind: "styled item",
        })
    }

    /// Iterate all styled items
    pub fn styled_items(&self) -> impl Iterator<Item = &StyledItem> {
        self.styled_items.values()
    }

    /// Number of styled items in the document
    pub fn styled_item_count(&self) -> usize {
        self.styled_items.len()
    }

    /// Resolve the styling state of an item once: no link, or the existing link
    pub fn item_styling(&self, item: EntityId) -> Result<ItemStyling> {
        self.check_item(item)?;
        Ok(match self.styled_by.get(&item) {
            Some(&styled) => ItemStyling::Styled(styled),
            None => ItemStyling::Unstyled,
        })
    }

    // ---- style mutation ----------------------------------------------

    /// Create a surface style entity
    pub fn create_surface_style(
        &mut self,
        name: Option<&str>,
        rgb: [f64; 3],
        transparency: f64,
    ) -> EntityId {
        let id = self.alloc();
        self.styles.insert(
            id,
            SurfaceStyle {
                id,
                name: name.map(str::to_string),
                rgb,
                transparency,
            },
        );
        self.style_order.push(id);
        id
    }

    /// Create a styled item binding exactly one style to an item
    ///
    /// Fails if the item already carries a styled item; callers resolve
    /// [`Document::item_styling`] first and append to the existing link instead.
    pub fn create_styled_item(&mut self, item: EntityId, style: EntityId) -> Result<EntityId> {
        self.check_item(item)?;
        self.surface_style(style)?;
        if let Some(&existing) = self.styled_by.get(&item) {
            return Err(Error::DuplicateStyledItem { item, existing });
        }

        let id = self.alloc();
        self.styled_items.insert(
            id,
            StyledItem {
                id,
                item,
                styles: vec![style],
            },
        );
        self.styled_by.insert(item, id);
        Ok(id)
    }

    /// Append a style to an existing styled item with set semantics
    ///
    /// Returns `true` if the style was added, `false` if it was already present.
    pub fn append_style(&mut self, styled_item: EntityId, style: EntityId) -> Result<bool> {
        self.surface_style(style)?;
        let link = self
            .styled_items
            .get_mut(&styled_item)
            .ok_or(Error::UnknownEntity {
                id: styled_item,
                kind: "styled item",
            })?;
        if link.styles.contains(&style) {
            return Ok(false);
        }
        link.styles.push(style);
        Ok(true)
    }

    // ---- internal checks ----------------------------------------------

    fn check_element(&self, id: EntityId) -> Result<()> {
        if self.elements.contains_key(&id) {
            Ok(())
        } else {
            Err(Error::UnknownEntity {
                id,
                kind: "element",
            })
        }
    }

    fn check_item(&self, id: EntityId) -> Result<()> {
        if self.items.contains(&id) {
            Ok(())
        } else {
            Err(Error::UnknownEntity { id, kind: "item" })
        }
    }

    fn check_property_set(&self, id: EntityId) -> Result<()> {
        if self.property_sets.contains_key(&id) {
            Ok(())
        } else {
            Err(Error::UnknownEntity {
                id,
                kind: "property set",
            })
        }
    }

    fn check_type_definition(&self, id: EntityId) -> Result<()> {
        if self.type_definitions.contains_key(&id) {
            Ok(())
        } else {
            Err(Error::UnknownEntity {
                id,
                kind: "type definition",
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn duct_with_pset(doc: &mut Document) -> EntityId {
        let duct = doc.add_element(ElementClass::DuctSegment, Some("Duct-001"));
        let pset = doc.add_property_set(
            "Mechanical",
            vec![Property::new(
                "System Type",
                Value::Text("Supply Air".to_string()),
            )],
        );
        doc.relate_properties(duct, pset).unwrap();
        duct
    }

    #[test]
    fn test_property_set_traversal() {
        let mut doc = Document::new();
        let duct = duct_with_pset(&mut doc);

        let psets: Vec<_> = doc.property_sets_of(duct).collect();
        assert_eq!(psets.len(), 1);
        assert_eq!(psets[0].name, "Mechanical");
        assert_eq!(
            psets[0].get("System Type").unwrap().value.as_text(),
            Some("Supply Air")
        );
    }

    #[test]
    fn test_type_definition_traversal() {
        let mut doc = Document::new();
        let duct = doc.add_element(ElementClass::DuctSegment, None);
        let tdef = doc.add_type_definition(Some("DuctType-A"));
        let pset = doc.add_property_set(
            "Mechanical",
            vec![Property::new(
                "System Type",
                Value::Text("Return Air".to_string()),
            )],
        );
        doc.attach_type_property_set(tdef, pset).unwrap();
        doc.relate_type(duct, tdef).unwrap();

        let tdef = doc.type_definition_of(duct).unwrap();
        let psets: Vec<_> = doc.type_property_sets(tdef).collect();
        assert_eq!(psets.len(), 1);
        assert_eq!(psets[0].name, "Mechanical");
    }

    #[test]
    fn test_styled_item_is_unique_per_item() {
        let mut doc = Document::new();
        let item = doc.add_item();
        let blue = doc.create_surface_style(None, [0.0, 0.0, 1.0], 0.0);
        let red = doc.create_surface_style(None, [1.0, 0.0, 0.0], 0.0);

        let link = doc.create_styled_item(item, blue).unwrap();
        assert!(matches!(
            doc.create_styled_item(item, red),
            Err(Error::DuplicateStyledItem { .. })
        ));

        // Appending merges into the existing link instead
        assert!(doc.append_style(link, red).unwrap());
        assert!(!doc.append_style(link, red).unwrap());
        assert_eq!(doc.styled_item(link).unwrap().styles, vec![blue, red]);
        assert_eq!(doc.styled_item_count(), 1);
    }

    #[test]
    fn test_item_styling_union() {
        let mut doc = Document::new();
        let item = doc.add_item();
        assert_eq!(doc.item_styling(item).unwrap(), ItemStyling::Unstyled);

        let style = doc.create_surface_style(None, [0.5, 0.5, 0.5], 0.2);
        let link = doc.create_styled_item(item, style).unwrap();
        assert_eq!(doc.item_styling(item).unwrap(), ItemStyling::Styled(link));
    }

    #[test]
    fn test_unknown_ids_are_errors() {
        let mut doc = Document::new();
        assert!(doc.element(99).is_err());
        assert!(doc.item_styling(99).is_err());
        assert!(doc.relate_properties(1, 2).is_err());
        let duct = doc.add_element(ElementClass::DuctSegment, None);
        assert!(doc.add_representation(duct, Some("Body"), None, &[404]).is_err());
    }

    #[test]
    fn test_elements_iterate_in_insertion_order() {
        let mut doc = Document::new();
        let a = doc.add_element(ElementClass::Wall, Some("a"));
        let b = doc.add_element(ElementClass::DuctSegment, Some("b"));
        let c = doc.add_element(ElementClass::Wall, Some("c"));

        let order: Vec<_> = doc.elements().map(|e| e.id).collect();
        assert_eq!(order, vec![a, b, c]);

        let walls: Vec<_> = doc
            .elements_of_class(ElementClass::Wall)
            .map(|e| e.id)
            .collect();
        assert_eq!(walls, vec![a, c]);
    }
}
