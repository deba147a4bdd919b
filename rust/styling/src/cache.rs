// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Style deduplication cache
//!
//! Styles are shared document entities: one (colour, transparency) pair maps
//! to exactly one surface style per run. The cache normalizes requests into a
//! canonical key and hands back the existing entity on a hit. It lives for one
//! assignment run and is primed from styles already present in the document,
//! so a rerun on an already coloured document allocates nothing new.

use crate::colour::{hex_to_rgb, rgb_to_hex, ColourError};
use rustc_hash::FxHashMap;

use ifc_syscolor_model::{Document, EntityId};

/// Canonical cache key for one (colour, transparency) pair
///
/// The hex token is uppercased and the transparency is rounded to three
/// decimals, held in integer thousandths so the key is `Eq + Hash`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StyleKey {
    hex: String,
    transparency_milli: u32,
}

impl StyleKey {
    /// Build the canonical key; missing transparency means fully opaque
    pub fn new(hex: &str, transparency: Option<f64>) -> Self {
        Self {
            hex: hex.to_ascii_uppercase(),
            transparency_milli: (transparency.unwrap_or(0.0) * 1000.0).round() as u32,
        }
    }
}

/// Per-run style cache keyed by [`StyleKey`]
#[derive(Debug, Default)]
pub struct StyleCache {
    styles: FxHashMap<StyleKey, EntityId>,
}

impl StyleCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cache primed with the document's existing surface styles
    ///
    /// When two pre-existing styles share a key, the earliest one wins.
    pub fn for_document(doc: &Document) -> Self {
        let mut styles = FxHashMap::default();
        for style in doc.surface_styles() {
            let key = StyleKey::new(&rgb_to_hex(style.rgb), Some(style.transparency));
            styles.entry(key).or_insert(style.id);
        }
        Self { styles }
    }

    /// Get the style for a (colour, transparency) pair, creating it on a miss
    pub fn ensure_style(
        &mut self,
        doc: &mut Document,
        hex: &str,
        transparency: Option<f64>,
    ) -> Result<EntityId, ColourError> {
        let key = StyleKey::new(hex, transparency);
        if let Some(&id) = self.styles.get(&key) {
            return Ok(id);
        }

        let rgb = hex_to_rgb(hex)?;
        let name = format!("SYS::{}", key.hex);
        let id = doc.create_surface_style(Some(&name), rgb, transparency.unwrap_or(0.0));
        self.styles.insert(key, id);
        Ok(id)
    }

    /// Number of distinct style keys the cache knows
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}
