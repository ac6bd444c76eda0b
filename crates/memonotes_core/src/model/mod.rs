//! Domain records for the Palm-to-Notes conversion.
//!
//! # Responsibility
//! - Define the memo, category and note shapes shared by reader, repository
//!   and service layers.
//! - Keep derivation rules (subject, newline normalization) next to the data
//!   they describe.
//!
//! # Invariants
//! - Parsed memos are immutable once read; conversion derives new records
//!   instead of mutating input.
//! - Every record is identified by a 128-bit `RecordId`.

pub mod category;
pub mod ident;
pub mod memo;
pub mod note;
