//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the exact store surface the conversion needs.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - The destination schema pre-exists; this layer never creates tables.
//! - Repository APIs return semantic errors (`InvalidData`) in addition to
//!   DB transport errors.

pub mod notes_repo;
