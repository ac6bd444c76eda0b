//! Palm Memo Pad export parsing.
//!
//! # Responsibility
//! - Turn the export byte stream into ordered `Memo` records.
//! - Keep the export dialect quirks out of the rest of the crate.
//!
//! # Invariants
//! - Parsing is a pure transform; malformed input fails the whole run
//!   before anything is written.

pub mod palm_csv;
