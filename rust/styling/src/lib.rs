// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # IFC-SysColor Styling
//!
//! System-Type driven surface style resolution and assignment for in-memory
//! building-model documents.
//!
//! ## Overview
//!
//! This crate provides the resolution-and-assignment core of IFC-SysColor:
//!
//! - **Attribute Resolver**: effective System Type of an element, instance
//!   property sets first, type definition as fallback
//! - **Colour Table**: spreadsheet-dump normalization with case-insensitive
//!   lookup
//! - **Style Cache**: one shared surface style per (colour, transparency) pair
//! - **Assignment Engine**: per-item style attachment with merge-into-existing
//!   link semantics and a run report
//! - **Property-set import**: custom property sets from JSON attribute files
//!
//! ## Quick Start
//!
//! ```rust
//! use ifc_syscolor_model::{Document, ElementClass, Property, Value};
//! use ifc_syscolor_styling::{assign_styles, CancelToken, Cell, CellValue, ColourTable, Sheet};
//!
//! // Document with one duct carrying a System Type and Body geometry
//! let mut doc = Document::new();
//! let duct = doc.add_element(ElementClass::DuctSegment, Some("Duct-001"));
//! let pset = doc.add_property_set(
//!     "Mechanical",
//!     vec![Property::new("System Type", Value::Text("Chilled Water".into()))],
//! );
//! doc.relate_properties(duct, pset).unwrap();
//! let item = doc.add_item();
//! doc.add_representation(duct, Some("Body"), None, &[item]).unwrap();
//!
//! // Colour table from a workbook dump
//! let text = |s: &str| Cell { value: Some(CellValue::Text(s.into())), fill: None };
//! let sheet = Sheet {
//!     rows: vec![
//!         vec![text("Object or Group [+]"), text("Color"), text("Transparency %")],
//!         vec![text("Chilled Water"), text("#0000FF"), Cell::default()],
//!     ],
//! };
//! let table = ColourTable::from_sheet(&sheet).unwrap();
//!
//! let report = assign_styles(&mut doc, &table, &CancelToken::new()).unwrap();
//! assert_eq!(report.assigned, 1);
//! ```

pub mod cache;
pub mod canon;
pub mod colour;
pub mod engine;
pub mod error;
pub mod pset_json;
pub mod resolver;
pub mod selector;
pub mod table;

pub use cache::{StyleCache, StyleKey};
pub use canon::canon;
pub use colour::{hex_to_rgb, percentage_to_fraction, rgb_to_hex, ColourError};
pub use engine::{assign_styles, AssignmentReport, CancelToken};
pub use error::{AssignError, ConfigError, PsetError, Result};
pub use pset_json::{attach_json_pset, KeyFilter};
pub use resolver::resolve_system_type;
pub use selector::body_items;
pub use table::{Cell, CellValue, ColourTable, Sheet, TableEntry, Workbook};
