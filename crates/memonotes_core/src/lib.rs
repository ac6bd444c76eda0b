//! Core conversion logic for importing Palm Memo Pad CSV exports into a
//! Notes-application SQLite database.
//! This crate is the single source of truth for conversion invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod reader;
pub mod repo;
pub mod service;

pub use db::{open_db, verify_schema, DbError};
pub use logging::{default_log_level, init_logging};
pub use model::category::{next_color, Category, MAX_CATEGORY_COLOR, MIN_CATEGORY_COLOR};
pub use model::ident::{IdGenerator, RecordId, UuidIdGenerator};
pub use model::memo::Memo;
pub use model::note::{
    derive_subject, normalize_newlines, NoteRecord, NOTES_NEWLINE, PALM_NEWLINE,
};
pub use reader::palm_csv::{parse_export, read_memos, FormatError};
pub use repo::notes_repo::{NotesRepository, RepoError, RepoResult, SqliteNotesRepository};
pub use service::import_service::{
    convert, reconcile_categories, write_notes, FailedNote, ImportError, ImportOptions,
    ImportSummary,
};
