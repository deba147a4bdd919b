// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Style assignment pass
//!
//! One sequential traversal over the element set: resolve the System Type,
//! look up its colour, fetch the shared style from the cache, and attach it to
//! the element's Body representation items. Attachment is per item: every item
//! carries at most one styled-item link, and repeated runs merge into the
//! existing link instead of duplicating it.
//!
//! Per-element misses are not errors. Elements without a System Type are
//! skipped, unmapped System Types and missing geometry are counted, and the
//! run keeps going; only document-graph inconsistencies abort it.

use crate::cache::StyleCache;
use crate::error::{AssignError, Result};
use crate::resolver::resolve_system_type;
use crate::selector::body_items;
use crate::table::ColourTable;
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

use ifc_syscolor_model::{Document, EntityId, ItemStyling};

/// Cooperative cancellation flag, checked once per element
///
/// Clones share the flag, so a host can hand one side to an interactive
/// abort button and the other to the running pass.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Create a fresh, unset token
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Check whether cancellation was requested
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Summary of one assignment run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AssignmentReport {
    /// Elements that received a style
    pub assigned: usize,
    /// Elements whose selected representations held no items
    pub no_geometry: usize,
    /// Normalized System Type names without a table entry, with occurrence
    /// counts, most frequent first
    pub unmatched: Vec<(String, usize)>,
}

/// Assign surface styles to every eligible element of the document
///
/// Spatial containers (project/site/building/storey/space) are excluded. The
/// style cache lives for exactly this run and is primed from the document's
/// existing styles, so rerunning with the same table allocates no new style
/// entities and leaves every styled-item link unique.
///
/// Styles attached before a cancellation or a fatal document error stay in
/// place; partial application is reported through the counters.
pub fn assign_styles(
    doc: &mut Document,
    table: &ColourTable,
    cancel: &CancelToken,
) -> Result<AssignmentReport> {
    let mut cache = StyleCache::for_document(doc);
    let mut assigned = 0usize;
    let mut no_geometry = 0usize;
    let mut unmatched: FxHashMap<String, usize> = FxHashMap::default();

    let candidates: Vec<EntityId> = doc
        .elements()
        .filter(|e| !e.class.is_container())
        .map(|e| e.id)
        .collect();

    for element in candidates {
        if cancel.is_cancelled() {
            info!(assigned, "assignment cancelled");
            return Err(AssignError::Cancelled);
        }

        let system_type = match resolve_system_type(doc, element) {
            Some(found) => found,
            None => continue,
        };

        let entry = match table.get(&system_type) {
            Some(entry) => entry,
            None => {
                *unmatched.entry(system_type.trim().to_lowercase()).or_insert(0) += 1;
                debug!(element, system_type = %system_type, "no colour mapping");
                continue;
            }
        };

        let style = cache.ensure_style(doc, &entry.hex, entry.transparency)?;

        let items = body_items(doc, element)?;
        if items.is_empty() {
            no_geometry += 1;
            debug!(element, "no stylable geometry");
            continue;
        }

        for item in items {
            match doc.item_styling(item)? {
                ItemStyling::Styled(link) => {
                    doc.append_style(link, style)?;
                }
                ItemStyling::Unstyled => {
                    doc.create_styled_item(item, style)?;
                }
            }
        }
        assigned += 1;
    }

    let report = AssignmentReport {
        assigned,
        no_geometry,
        unmatched: sort_unmatched(unmatched),
    };
    info!(
        assigned = report.assigned,
        unmatched = report.unmatched.len(),
        no_geometry = report.no_geometry,
        "style assignment finished"
    );
    Ok(report)
}

/// Order unmatched names most frequent first, alphabetical on ties
fn sort_unmatched(unmatched: FxHashMap<String, usize>) -> Vec<(String, usize)> {
    let mut entries: Vec<_> = unmatched.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{Cell, CellValue, ColourTable, Sheet};
    use ifc_syscolor_model::{ElementClass, Property, Value};

    fn text(s: &str) -> Cell {
        Cell {
            value: Some(CellValue::Text(s.to_string())),
            fill: None,
        }
    }

    fn number(n: f64) -> Cell {
        Cell {
            value: Some(CellValue::Number(n)),
            fill: None,
        }
    }

    fn table(rows: &[(&str, &str, Option<f64>)]) -> ColourTable {
        let mut sheet = Sheet {
            rows: vec![vec![
                text("Object or Group [+]"),
                text("Color"),
                text("Transparency %"),
            ]],
        };
        for (name, hex, pct) in rows {
            let trans = match pct {
                Some(p) => number(*p),
                None => Cell::default(),
            };
            sheet.rows.push(vec![text(name), text(hex), trans]);
        }
        ColourTable::from_sheet(&sheet).unwrap()
    }

    fn duct(doc: &mut Document, system_type: &str, item_count: usize) -> Vec<EntityId> {
        let element = doc.add_element(ElementClass::DuctSegment, None);
        let pset = doc.add_property_set(
            "Mechanical",
            vec![Property::new(
                "System Type",
                Value::Text(system_type.to_string()),
            )],
        );
        doc.relate_properties(element, pset).unwrap();

        let items: Vec<EntityId> = (0..item_count).map(|_| doc.add_item()).collect();
        if !items.is_empty() {
            doc.add_representation(element, Some("Body"), None, &items)
                .unwrap();
        }
        items
    }

    #[test]
    fn test_spatial_containers_are_skipped() {
        let mut doc = Document::new();
        let space = doc.add_element(ElementClass::Space, Some("Room 101"));
        let pset = doc.add_property_set(
            "Mechanical",
            vec![Property::new(
                "System Type",
                Value::Text("Supply Air".to_string()),
            )],
        );
        doc.relate_properties(space, pset).unwrap();
        let item = doc.add_item();
        doc.add_representation(space, Some("Body"), None, &[item])
            .unwrap();

        let table = table(&[("Supply Air", "#00FF00", None)]);
        let report = assign_styles(&mut doc, &table, &CancelToken::new()).unwrap();

        assert_eq!(report.assigned, 0);
        assert_eq!(doc.styled_item_count(), 0);
        assert_eq!(doc.surface_style_count(), 0);
    }

    #[test]
    fn test_unmatched_names_are_counted_most_frequent_first() {
        let mut doc = Document::new();
        duct(&mut doc, "Unknown-XYZ", 1);
        duct(&mut doc, "unknown-xyz ", 1);
        duct(&mut doc, "Rare", 1);

        let table = table(&[("Chilled Water", "#0000FF", Some(20.0))]);
        let report = assign_styles(&mut doc, &table, &CancelToken::new()).unwrap();

        assert_eq!(report.assigned, 0);
        assert_eq!(
            report.unmatched,
            vec![("unknown-xyz".to_string(), 2), ("rare".to_string(), 1)]
        );
    }

    #[test]
    fn test_elements_without_geometry_are_counted() {
        let mut doc = Document::new();
        duct(&mut doc, "Chilled Water", 0);

        let table = table(&[("Chilled Water", "#0000FF", None)]);
        let report = assign_styles(&mut doc, &table, &CancelToken::new()).unwrap();

        assert_eq!(report.assigned, 0);
        assert_eq!(report.no_geometry, 1);
        // The style was still materialized before geometry was inspected
        assert_eq!(doc.surface_style_count(), 1);
    }

    #[test]
    fn test_existing_link_is_merged_not_duplicated() {
        let mut doc = Document::new();
        let items = duct(&mut doc, "Chilled Water", 1);
        let manual = doc.create_surface_style(Some("Manual"), [1.0, 1.0, 1.0], 0.0);
        let link = doc.create_styled_item(items[0], manual).unwrap();

        let table = table(&[("Chilled Water", "#0000FF", None)]);
        assign_styles(&mut doc, &table, &CancelToken::new()).unwrap();

        assert_eq!(doc.styled_item_count(), 1);
        let styles = &doc.styled_item(link).unwrap().styles;
        assert_eq!(styles.len(), 2);
        assert_eq!(styles[0], manual);
    }

    #[test]
    fn test_cancelled_token_aborts_before_work() {
        let mut doc = Document::new();
        duct(&mut doc, "Chilled Water", 2);

        let token = CancelToken::new();
        token.cancel();

        let table = table(&[("Chilled Water", "#0000FF", None)]);
        assert!(matches!(
            assign_styles(&mut doc, &table, &token),
            Err(AssignError::Cancelled)
        ));
        assert_eq!(doc.styled_item_count(), 0);
    }

    #[test]
    fn test_one_style_shared_across_elements() {
        let mut doc = Document::new();
        duct(&mut doc, "Chilled Water", 2);
        duct(&mut doc, "chilled water", 3);

        let table = table(&[("Chilled Water", "#0000FF", Some(20.0))]);
        let report = assign_styles(&mut doc, &table, &CancelToken::new()).unwrap();

        assert_eq!(report.assigned, 2);
        assert_eq!(doc.surface_style_count(), 1);
        assert_eq!(doc.styled_item_count(), 5);
    }
}
