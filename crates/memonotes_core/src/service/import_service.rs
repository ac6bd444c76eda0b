//! Import orchestration: category reconciliation and note writing.
//!
//! # Responsibility
//! - Diff import-time category names against the destination set and create
//!   missing categories with fresh id/color/order.
//! - Transform memos into note rows and insert them with the configured
//!   failure tolerance.
//!
//! # Invariants
//! - Category inserts are never retried or rolled back here; the caller's
//!   commit/discard decision is the only persistence boundary.
//! - A category insert failure aborts the run regardless of force mode.
//! - Note insert failures abort immediately unless force mode is set; any
//!   failure still yields an overall failure at the end.

use crate::model::category::{next_color, Category};
use crate::model::ident::IdGenerator;
use crate::model::memo::Memo;
use crate::model::note::NoteRecord;
use crate::reader::palm_csv::{read_memos, FormatError};
use crate::repo::notes_repo::{NotesRepository, RepoError};
use log::{error, info};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::Read;
use std::time::{SystemTime, UNIX_EPOCH};

/// Failure-tolerance and verbosity settings for one run.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImportOptions {
    /// Keep importing past per-memo insert failures.
    pub force: bool,
    /// Suppress success summaries on stdout.
    pub quiet: bool,
}

/// Counts reported by a fully successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub memos_imported: usize,
    pub categories_added: usize,
}

/// One memo the destination store rejected.
#[derive(Debug)]
pub struct FailedNote {
    pub subject: String,
    pub category_name: String,
    pub source: RepoError,
}

/// Conversion failure. Any variant means the caller must not commit.
#[derive(Debug)]
pub enum ImportError {
    /// Malformed export input; nothing was written.
    Format(FormatError),
    /// A new category row was rejected. Fatal, no force override; earlier
    /// category inserts from the same batch stay in the open transaction.
    Category { name: String, source: RepoError },
    /// One or more note rows were rejected.
    Notes { failed: Vec<FailedNote> },
    /// Category load or marker update failed.
    Repo(RepoError),
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Format(err) => write!(f, "{err}"),
            Self::Category { name, source } => {
                write!(f, "failed to insert category `{name}`: {source}")
            }
            Self::Notes { failed } => {
                write!(f, "failed to import {} memo(s)", failed.len())
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ImportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Format(err) => Some(err),
            Self::Category { source, .. } => Some(source),
            Self::Notes { .. } => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<FormatError> for ImportError {
    fn from(value: FormatError) -> Self {
        Self::Format(value)
    }
}

impl From<RepoError> for ImportError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Creates destination categories for names that only exist in the import.
///
/// New categories are allocated in first-occurrence order: color continues
/// the cycle from the highest existing color, order continues past the
/// highest existing order. Each is inserted immediately; the singleton
/// category marker is bumped once when anything was added. Returns the
/// number of categories created.
pub fn reconcile_categories<R, G>(
    repo: &R,
    categories: &mut HashMap<String, Category>,
    memos: &[Memo],
    ids: &mut G,
    options: &ImportOptions,
) -> Result<usize, ImportError>
where
    R: NotesRepository,
    G: IdGenerator,
{
    let mut color = categories.values().map(|c| c.color).max().unwrap_or(0);
    let mut order = categories.values().map(|c| c.order).max().unwrap_or(0);
    let mut new_names = Vec::new();

    for memo in memos {
        if categories.contains_key(&memo.category_name) {
            continue;
        }
        color = next_color(color);
        order += 1;
        let category = Category {
            id: ids.next_id(),
            name: memo.category_name.clone(),
            color,
            modified: now_epoch_seconds(),
            order,
        };
        new_names.push(memo.category_name.clone());
        categories.insert(memo.category_name.clone(), category);
    }

    for name in &new_names {
        let category = &categories[name.as_str()];
        repo.insert_category(category).map_err(|source| {
            error!(
                "event=category_insert module=service status=error name={name} error={source}"
            );
            ImportError::Category {
                name: name.clone(),
                source,
            }
        })?;
    }

    if let Some(last) = new_names.last() {
        repo.update_category_marker(categories[last.as_str()].modified)?;
        info!(
            "event=category_reconcile module=service status=ok added={}",
            new_names.len()
        );
        if !options.quiet {
            println!("Added {} categories", new_names.len());
        }
    }

    Ok(new_names.len())
}

/// Inserts one note row per memo, honoring the force-mode failure policy.
///
/// Returns the number of memos imported when every insert succeeded.
pub fn write_notes<R, G>(
    repo: &R,
    categories: &HashMap<String, Category>,
    memos: &[Memo],
    ids: &mut G,
    options: &ImportOptions,
) -> Result<usize, ImportError>
where
    R: NotesRepository,
    G: IdGenerator,
{
    let mut failed = Vec::new();

    for memo in memos {
        let category = categories
            .get(&memo.category_name)
            .expect("every memo category is reconciled before notes are written");
        let note = NoteRecord::from_memo(memo, category, ids.next_id(), now_epoch_seconds());

        if let Err(source) = repo.insert_note(&note) {
            error!(
                "event=note_insert module=service status=error subject={} category={} error={}",
                note.subject, memo.category_name, source
            );
            failed.push(FailedNote {
                subject: note.subject,
                category_name: memo.category_name.clone(),
                source,
            });
            if !options.force {
                report_failures(&failed);
                return Err(ImportError::Notes { failed });
            }
        }
    }

    if !failed.is_empty() {
        report_failures(&failed);
        return Err(ImportError::Notes { failed });
    }

    info!(
        "event=note_import module=service status=ok imported={}",
        memos.len()
    );
    if !options.quiet {
        println!("Imported {} memo(s)", memos.len());
    }
    Ok(memos.len())
}

/// Runs the full conversion: parse, reconcile categories, write notes.
///
/// The caller owns the surrounding transaction and must commit only on
/// `Ok`; on `Err`, rows inserted so far (new categories included) survive
/// only until the transaction is discarded.
pub fn convert<R, G>(
    input: &mut dyn Read,
    repo: &R,
    ids: &mut G,
    options: &ImportOptions,
) -> Result<ImportSummary, ImportError>
where
    R: NotesRepository,
    G: IdGenerator,
{
    let memos = read_memos(input)?;
    let mut categories = repo.list_categories()?;
    let categories_added = reconcile_categories(repo, &mut categories, &memos, ids, options)?;
    let memos_imported = write_notes(repo, &categories, &memos, ids, options)?;
    Ok(ImportSummary {
        memos_imported,
        categories_added,
    })
}

fn report_failures(failed: &[FailedNote]) {
    eprintln!("Failed to import {} memo(s):", failed.len());
    for note in failed {
        eprintln!("{} ({})", note.subject, note.category_name);
    }
}

fn now_epoch_seconds() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs_f64())
        .unwrap_or(0.0)
}
