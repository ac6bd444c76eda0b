//! Destination store contracts and SQLite implementation.
//!
//! # Responsibility
//! - Expose category load, category insert, note insert and the
//!   category-marker update as an explicit, test-doubleable interface.
//! - Keep SQL inside the persistence boundary.
//!
//! # Invariants
//! - Identifier columns are bound as 16-byte blobs, never spliced into SQL.
//! - No statement here commits; the caller owns the transaction.

use crate::db::DbError;
use crate::model::category::Category;
use crate::model::ident::RecordId;
use crate::model::note::NoteRecord;
use rusqlite::{params, Connection, Row};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence error for destination store operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => {
                write!(f, "invalid persisted category data: {message}")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Store interface for one import run.
///
/// Inserts happen inside the caller's transaction; commit/discard is the
/// caller's decision.
pub trait NotesRepository {
    fn list_categories(&self) -> RepoResult<HashMap<String, Category>>;
    fn insert_category(&self, category: &Category) -> RepoResult<()>;
    fn insert_note(&self, note: &NoteRecord) -> RepoResult<()>;
    /// Sets the singleton `data.categoryModified` marker.
    fn update_category_marker(&self, modified: f64) -> RepoResult<()>;
}

/// SQLite-backed destination store.
///
/// Also works against a `rusqlite::Transaction` through deref coercion.
pub struct SqliteNotesRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNotesRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl NotesRepository for SqliteNotesRepository<'_> {
    fn list_categories(&self) -> RepoResult<HashMap<String, Category>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, color, modified, order_ FROM categories;")?;
        let mut rows = stmt.query([])?;
        let mut categories = HashMap::new();

        while let Some(row) = rows.next()? {
            let category = parse_category_row(row)?;
            categories.insert(category.name.clone(), category);
        }

        Ok(categories)
    }

    fn insert_category(&self, category: &Category) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO categories (id, name, color, modified, order_)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                category.id.as_bytes().as_slice(),
                category.name.as_str(),
                category.color,
                category.modified,
                category.order,
            ],
        )?;
        Ok(())
    }

    fn insert_note(&self, note: &NoteRecord) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO memos (id, subject, category, modified, locked, body)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                note.id.as_bytes().as_slice(),
                note.subject.as_str(),
                note.category_id.as_bytes().as_slice(),
                note.modified,
                bool_to_int(note.locked),
                note.body.as_str(),
            ],
        )?;
        Ok(())
    }

    fn update_category_marker(&self, modified: f64) -> RepoResult<()> {
        self.conn
            .execute("UPDATE data SET categoryModified = ?1;", params![modified])?;
        Ok(())
    }
}

fn parse_category_row(row: &Row<'_>) -> RepoResult<Category> {
    let id_blob: Vec<u8> = row.get("id")?;
    let id = RecordId::from_slice(&id_blob).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "id blob of {} bytes in categories.id, expected 16",
            id_blob.len()
        ))
    })?;

    Ok(Category {
        id,
        name: row.get("name")?,
        color: row.get("color")?,
        modified: row.get("modified")?,
        order: row.get("order_")?,
    })
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
