// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::colour::ColourError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for assignment runs
pub type Result<T> = std::result::Result<T, AssignError>;

/// Errors raised while loading the colour lookup table
///
/// All of these are fatal and surface before any document mutation.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read colour table {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("colour table is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("sheet {0:?} not found in colour table")]
    SheetMissing(String),

    #[error("no row with the required header columns found in sheet")]
    HeaderNotFound,
}

/// Errors that abort an assignment run
///
/// Per-element misses (no System Type, no table entry, no geometry) are not
/// errors; they accumulate in the run report instead.
#[derive(Error, Debug)]
pub enum AssignError {
    #[error("assignment cancelled")]
    Cancelled,

    #[error("document error: {0}")]
    Document(#[from] ifc_syscolor_model::Error),

    #[error("colour error: {0}")]
    Colour(#[from] ColourError),
}

/// Errors raised while importing a property set from a JSON attribute file
#[derive(Error, Debug)]
pub enum PsetError {
    #[error("attribute file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("attribute file has no \"attributes\" object")]
    MissingAttributes,

    #[error("no attributes matched the key filter")]
    NoMatchingKeys,

    #[error("document error: {0}")]
    Document(#[from] ifc_syscolor_model::Error),
}
