// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::document::EntityId;
use thiserror::Error;

/// Result type for document operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading or mutating the document graph
#[derive(Error, Debug)]
pub enum Error {
    #[error("{kind} entity #{id} not found")]
    UnknownEntity { id: EntityId, kind: &'static str },

    #[error("item #{item} already carries styled item #{existing}")]
    DuplicateStyledItem { item: EntityId, existing: EntityId },
}
