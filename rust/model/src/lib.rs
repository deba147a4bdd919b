// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # IFC-SysColor Model
//!
//! In-memory document graph for building-model mutation.
//!
//! ## Overview
//!
//! This crate provides the document side of IFC-SysColor:
//!
//! - **Entity store**: elements, property sets, type definitions,
//!   representations, and representation items addressed by numeric ids
//! - **Inverse indexes**: defines-by-properties, defines-by-type, and
//!   styled-by-item relations with O(1) per-element lookup
//! - **Style mutation**: surface styles and styled-item links with a
//!   one-link-per-item invariant enforced at the store level
//!
//! ## Quick Start
//!
//! ```rust
//! use ifc_syscolor_model::{Document, ElementClass, Property, Value};
//!
//! let mut doc = Document::new();
//! let duct = doc.add_element(ElementClass::DuctSegment, Some("Duct-001"));
//! let pset = doc.add_property_set(
//!     "Mechanical",
//!     vec![Property::new("System Type", Value::Text("Chilled Water".into()))],
//! );
//! doc.relate_properties(duct, pset).unwrap();
//!
//! let item = doc.add_item();
//! doc.add_representation(duct, Some("Body"), None, &[item]).unwrap();
//! ```

pub mod class;
pub mod document;
pub mod error;
pub mod value;

pub use class::ElementClass;
pub use document::{
    Document, Element, EntityId, ItemStyling, Property, PropertySet, Representation, StyledItem,
    SurfaceStyle, TypeDefinition,
};
pub use error::{Error, Result};
pub use value::Value;
