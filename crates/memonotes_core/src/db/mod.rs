//! SQLite connection bootstrap for the destination Notes database.
//!
//! # Responsibility
//! - Open and configure the single connection used for a whole import run.
//! - Verify the pre-existing destination schema before any write.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=ON`.
//! - This crate never creates or migrates the destination schema; it is
//!   owned by the Notes application.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;

pub use open::{open_db, verify_schema};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    MissingTable(&'static str),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::MissingTable(table) => write!(
                f,
                "destination database is missing required table `{table}`"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::MissingTable(_) => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
