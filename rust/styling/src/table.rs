// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Colour lookup table
//!
//! The spreadsheet reader dumps the workbook as JSON: named sheets, each a
//! row-major grid of cells carrying an optional value and an optional
//! background-fill colour. This module locates the header row, normalizes the
//! data rows into a name → (colour, transparency) mapping, and exposes
//! case-insensitive lookup.

use crate::colour::{cell_hex_token, fill_argb, percentage_to_fraction};
use crate::error::ConfigError;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::warn;

/// Column labels the header row must contain (case-insensitive, any order):
/// the entry name, the colour, and the transparency percentage.
pub const REQUIRED_HEADERS: [&str; 3] = ["Object or Group [+]", "Color", "Transparency %"];

/// A spreadsheet cell value: numbers stay numbers, everything else is text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
}

/// One cell of the workbook dump
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    /// Cell value, if the cell is non-empty
    #[serde(default)]
    pub value: Option<CellValue>,
    /// Background fill as 8 hex digits `AARRGGBB`, if the cell is filled
    #[serde(default)]
    pub fill: Option<String>,
}

impl Cell {
    /// Get the cell value as text
    pub fn text(&self) -> Option<&str> {
        match self.value.as_ref()? {
            CellValue::Text(s) => Some(s),
            CellValue::Number(_) => None,
        }
    }

    /// Get the cell value as a number, parsing numeric text
    pub fn number(&self) -> Option<f64> {
        match self.value.as_ref()? {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// A row-major cell grid
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Sheet {
    pub rows: Vec<Vec<Cell>>,
}

/// A workbook dump: named sheets of cell grids
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Workbook {
    pub sheets: FxHashMap<String, Sheet>,
}

/// One normalized lookup entry
#[derive(Debug, Clone, PartialEq)]
pub struct TableEntry {
    /// Uppercase `#RRGGBB` token
    pub hex: String,
    /// Transparency fraction in [0, 1], if the row specified one
    pub transparency: Option<f64>,
}

/// Name → (colour, transparency) mapping with case-insensitive lookup
#[derive(Debug, Clone, Default)]
pub struct ColourTable {
    entries: FxHashMap<String, TableEntry>,
}

impl ColourTable {
    /// Load a table from a JSON workbook dump on disk
    pub fn load(path: impl AsRef<Path>, sheet: &str) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let workbook: Workbook = serde_json::from_str(&raw)?;
        let grid = workbook
            .sheets
            .get(sheet)
            .ok_or_else(|| ConfigError::SheetMissing(sheet.to_string()))?;
        Self::from_sheet(grid)
    }

    /// Build a table from one sheet of the workbook dump
    pub fn from_sheet(sheet: &Sheet) -> Result<Self, ConfigError> {
        let (header_row, [name_col, colour_col, trans_col]) =
            find_header(sheet).ok_or(ConfigError::HeaderNotFound)?;

        let mut entries: FxHashMap<String, TableEntry> = FxHashMap::default();
        for (offset, row) in sheet.rows[header_row + 1..].iter().enumerate() {
            let row_number = header_row + 1 + offset;

            let name = match row.get(name_col).and_then(Cell::text) {
                Some(text) if !text.trim().is_empty() => text.trim(),
                _ => continue,
            };

            let (hex, fill_alpha) = match row.get(colour_col).and_then(resolve_colour) {
                Some(resolved) => resolved,
                None => {
                    warn!(row = row_number, name, "row has no usable colour, skipping");
                    continue;
                }
            };

            let mut transparency = row
                .get(trans_col)
                .and_then(Cell::number)
                .map(percentage_to_fraction);
            if transparency.is_none() {
                // A fill encodes opacity in its alpha channel
                transparency = fill_alpha.map(|alpha| 1.0 - alpha);
            }

            let key = name.to_lowercase();
            let entry = TableEntry { hex, transparency };
            if let Some(previous) = entries.insert(key.clone(), entry) {
                warn!(
                    name = %key,
                    previous = %previous.hex,
                    "duplicate colour table name, keeping the later row"
                );
            }
        }

        Ok(Self { entries })
    }

    /// Look up an entry by name, case-insensitive and whitespace-trimmed
    pub fn get(&self, name: &str) -> Option<&TableEntry> {
        self.entries.get(&name.trim().to_lowercase())
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Locate the header row: the first row containing all required labels.
/// Returns the row index and the column of each label, in
/// [`REQUIRED_HEADERS`] order.
fn find_header(sheet: &Sheet) -> Option<(usize, [usize; 3])> {
    for (row_idx, row) in sheet.rows.iter().enumerate() {
        let mut cols = [None; 3];
        for (col_idx, cell) in row.iter().enumerate() {
            let text = match cell.text() {
                Some(text) => text,
                None => continue,
            };
            for (slot, header) in cols.iter_mut().zip(REQUIRED_HEADERS) {
                if slot.is_none() && text.trim().eq_ignore_ascii_case(header) {
                    *slot = Some(col_idx);
                }
            }
        }
        if let [Some(name), Some(colour), Some(trans)] = cols {
            return Some((row_idx, [name, colour, trans]));
        }
    }
    None
}

/// Resolve a colour cell: explicit hex token first, background fill second.
/// Returns the `#RRGGBB` token and the fill alpha when the fill was used.
fn resolve_colour(cell: &Cell) -> Option<(String, Option<f64>)> {
    if let Some(hex) = cell.text().and_then(cell_hex_token) {
        return Some((hex, None));
    }
    let (hex, alpha) = fill_argb(cell.fill.as_deref()?)?;
    Some((hex, Some(alpha)))
}
