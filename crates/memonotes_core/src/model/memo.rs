//! Memo domain model.
//!
//! # Invariants
//! - A memo is immutable once parsed from the export stream.

use serde::{Deserialize, Serialize};

/// One Palm Memo Pad note, as parsed from the CSV export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memo {
    /// Raw body text, still in the Palm newline convention.
    pub body: String,
    /// True when the export's locked flag was a nonzero integer.
    pub locked: bool,
    /// Category name as written in the export; resolved during
    /// reconciliation.
    pub category_name: String,
}

impl Memo {
    pub fn new(
        body: impl Into<String>,
        locked: bool,
        category_name: impl Into<String>,
    ) -> Self {
        Self {
            body: body.into(),
            locked,
            category_name: category_name.into(),
        }
    }
}
