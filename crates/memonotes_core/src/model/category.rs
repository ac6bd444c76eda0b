//! Category domain model.
//!
//! # Responsibility
//! - Define the named grouping shared between memos.
//! - Own the display-color cycling rule used when creating categories.
//!
//! # Invariants
//! - `name` is unique within the destination store and within a run.
//! - `color` stays in `[MIN_CATEGORY_COLOR, MAX_CATEGORY_COLOR]`.
//! - Categories are never deleted or renamed by this tool.

use crate::model::ident::RecordId;
use serde::{Deserialize, Serialize};

pub const MIN_CATEGORY_COLOR: i64 = 1;
pub const MAX_CATEGORY_COLOR: i64 = 6;

/// A named memo grouping with display color and ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: RecordId,
    pub name: String,
    /// Display color in `[1, 6]`.
    pub color: i64,
    /// Epoch seconds of the last change to this category.
    pub modified: f64,
    /// Display position; strictly increasing for newly created categories.
    pub order: i64,
}

/// Returns the display color following `color`, wrapping past the maximum.
///
/// `next_color(0)` yields the minimum, so an empty destination starts the
/// cycle at 1.
pub fn next_color(color: i64) -> i64 {
    let next = color + 1;
    if next > MAX_CATEGORY_COLOR {
        MIN_CATEGORY_COLOR
    } else {
        next
    }
}
