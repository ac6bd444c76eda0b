//! Note rows derived from memos.
//!
//! # Responsibility
//! - Define the row shape inserted into the destination `memos` table.
//! - Own newline normalization and subject derivation.
//!
//! # Invariants
//! - A note references exactly one resolved category.
//! - Notes are never mutated after insertion.

use crate::model::category::Category;
use crate::model::ident::RecordId;
use crate::model::memo::Memo;

/// Palm line separator as it appears in export bodies.
pub const PALM_NEWLINE: &str = "\r\r\n";
/// Notes-application line separator.
pub const NOTES_NEWLINE: &str = "\n";

/// One row destined for the `memos` table.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteRecord {
    pub id: RecordId,
    /// First normalized body line, trimmed.
    pub subject: String,
    pub category_id: RecordId,
    /// Epoch seconds at derivation time.
    pub modified: f64,
    pub locked: bool,
    /// Body in the single-newline convention.
    pub body: String,
}

impl NoteRecord {
    /// Builds the insert row for one memo and its resolved category.
    pub fn from_memo(memo: &Memo, category: &Category, id: RecordId, modified: f64) -> Self {
        let body = normalize_newlines(&memo.body);
        let subject = derive_subject(&body);
        Self {
            id,
            subject,
            category_id: category.id,
            modified,
            locked: memo.locked,
            body,
        }
    }
}

/// Rewrites Palm line separators to the Notes convention.
///
/// Idempotent: normalized text contains no further Palm separators.
pub fn normalize_newlines(body: &str) -> String {
    body.replace(PALM_NEWLINE, NOTES_NEWLINE)
}

/// Returns the text before the first newline, trimmed.
///
/// Empty when the body has no content before its first newline.
pub fn derive_subject(body: &str) -> String {
    body.split(NOTES_NEWLINE)
        .next()
        .unwrap_or("")
        .trim()
        .to_string()
}
