//! Palm Memo Pad importer command line.
//!
//! # Responsibility
//! - Parse arguments and resolve the input stream and database connection.
//! - Run the conversion inside one transaction and decide commit/discard.
//!
//! # Invariants
//! - The transaction commits only when the conversion fully succeeds.
//! - A conversion failure still exits through the normal path with status 0;
//!   the failed run is observable as an absence of new rows.

use clap::Parser;
use log::{error, info};
use memonotes_core::{
    convert, default_log_level, init_logging, open_db, ImportError, ImportOptions,
    SqliteNotesRepository, UuidIdGenerator,
};
use std::fs::File;
use std::io::Read;
use std::process::ExitCode;

const STDIN_FILENAME: &str = "-";

#[derive(Parser, Debug)]
#[command(name = "memonotes")]
#[command(about = "Convert a Palm Memo CSV export to a Notes SQLite database")]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILENAME",
        default_value = STDIN_FILENAME,
        help = "Input Palm Memo CSV export filename (`-` reads standard input)"
    )]
    input: String,

    #[arg(
        short,
        long,
        value_name = "FILENAME",
        default_value = "User.db",
        help = "SQLite3 database filename"
    )]
    dbname: String,

    #[arg(short, long, help = "Keep importing past per-memo insert failures")]
    force: bool,

    #[arg(short, long, help = "Suppress success summaries")]
    quiet: bool,

    #[arg(
        long,
        value_name = "LEVEL",
        help = "Log level (defaults per build mode)"
    )]
    log_level: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| default_log_level().to_string());
    if let Err(err) = init_logging(&level) {
        eprintln!("memonotes: {err}");
        return ExitCode::FAILURE;
    }

    if cli.dbname.trim().is_empty() {
        eprintln!("memonotes: no database filename given");
        return ExitCode::FAILURE;
    }

    let mut input: Box<dyn Read> = if cli.input == STDIN_FILENAME {
        Box::new(std::io::stdin())
    } else {
        match File::open(&cli.input) {
            Ok(file) => Box::new(file),
            Err(err) => {
                eprintln!("memonotes: cannot open `{}`: {err}", cli.input);
                return ExitCode::FAILURE;
            }
        }
    };

    let mut conn = match open_db(&cli.dbname) {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("memonotes: cannot open database `{}`: {err}", cli.dbname);
            return ExitCode::FAILURE;
        }
    };

    let tx = match conn.transaction() {
        Ok(tx) => tx,
        Err(err) => {
            eprintln!("memonotes: cannot start transaction: {err}");
            return ExitCode::FAILURE;
        }
    };

    let options = ImportOptions {
        force: cli.force,
        quiet: cli.quiet,
    };
    let mut ids = UuidIdGenerator;
    let repo = SqliteNotesRepository::new(&tx);

    match convert(&mut input, &repo, &mut ids, &options) {
        Ok(summary) => {
            if let Err(err) = tx.commit() {
                eprintln!("memonotes: commit failed: {err}");
                return ExitCode::FAILURE;
            }
            info!(
                "event=import module=cli status=ok memos={} categories={}",
                summary.memos_imported, summary.categories_added
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            // Dropping the transaction uncommitted discards every row the
            // run inserted, new categories included.
            error!("event=import module=cli status=error error={err}");
            if !matches!(err, ImportError::Notes { .. }) {
                // Note failures were already reported per memo.
                eprintln!("memonotes: {err}");
            }
            ExitCode::SUCCESS
        }
    }
}
