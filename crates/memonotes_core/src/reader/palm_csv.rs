//! Scanner for the Palm Memo Pad CSV export dialect.
//!
//! The dialect differs from ordinary CSV in one way that matters here:
//! records are terminated by the byte sequence CR CR LF, and the same
//! sequence appears inside quoted bodies as the Palm line separator. Every
//! field is double-quote enclosed, with `""` escaping an embedded quote.
//!
//! # Invariants
//! - Exactly three fields per record: body, locked flag, category name.
//! - The terminator after the final record may be omitted at end of input.

use crate::model::memo::Memo;
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::Read;

const RECORD_TERMINATOR: &[u8] = b"\r\r\n";
const FIELDS_PER_RECORD: usize = 3;

pub type ReadResult<T> = Result<T, FormatError>;

/// Parse failure for a Palm export stream. Record numbers count from 1.
#[derive(Debug)]
pub enum FormatError {
    Io(std::io::Error),
    ExpectedQuote { record: usize },
    UnterminatedField { record: usize },
    ExpectedSeparator { record: usize },
    FieldCount { record: usize, found: usize },
    InvalidLockedFlag { record: usize, value: String },
}

impl Display for FormatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "cannot read export stream: {err}"),
            Self::ExpectedQuote { record } => {
                write!(f, "record {record}: field does not start with a quote")
            }
            Self::UnterminatedField { record } => {
                write!(f, "record {record}: quoted field never closes")
            }
            Self::ExpectedSeparator { record } => write!(
                f,
                "record {record}: expected `,` or record terminator after field"
            ),
            Self::FieldCount { record, found } => write!(
                f,
                "record {record}: expected {FIELDS_PER_RECORD} fields, found {found}"
            ),
            Self::InvalidLockedFlag { record, value } => {
                write!(f, "record {record}: locked flag `{value}` is not an integer")
            }
        }
    }
}

impl Error for FormatError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

/// Reads an entire export stream and parses it into memos.
pub fn read_memos(input: &mut dyn Read) -> ReadResult<Vec<Memo>> {
    let mut text = String::new();
    input.read_to_string(&mut text).map_err(FormatError::Io)?;
    parse_export(&text)
}

/// Parses export text into memos, in input order.
pub fn parse_export(text: &str) -> ReadResult<Vec<Memo>> {
    let mut memos = Vec::new();
    let mut pos = 0;

    while pos < text.len() {
        let record = memos.len() + 1;
        let (fields, next) = parse_record(text, pos, record)?;
        memos.push(memo_from_fields(fields, record)?);
        pos = next;
    }

    debug!(
        "event=memo_parse module=reader status=ok records={}",
        memos.len()
    );
    Ok(memos)
}

fn parse_record(text: &str, mut pos: usize, record: usize) -> ReadResult<(Vec<String>, usize)> {
    let bytes = text.as_bytes();
    let mut fields = Vec::with_capacity(FIELDS_PER_RECORD);

    loop {
        let (field, next) = parse_field(text, pos, record)?;
        fields.push(field);
        pos = next;

        match bytes.get(pos) {
            Some(b',') => pos += 1,
            None => return Ok((fields, pos)),
            Some(_) => {
                if bytes[pos..].starts_with(RECORD_TERMINATOR) {
                    return Ok((fields, pos + RECORD_TERMINATOR.len()));
                }
                return Err(FormatError::ExpectedSeparator { record });
            }
        }
    }
}

fn parse_field(text: &str, mut pos: usize, record: usize) -> ReadResult<(String, usize)> {
    let bytes = text.as_bytes();
    if bytes.get(pos) != Some(&b'"') {
        return Err(FormatError::ExpectedQuote { record });
    }
    pos += 1;

    let mut field = String::new();
    let mut run_start = pos;
    loop {
        match bytes.get(pos) {
            None => return Err(FormatError::UnterminatedField { record }),
            Some(b'"') => {
                // Slicing is safe: `"` is ASCII, so both bounds sit on
                // character boundaries.
                field.push_str(&text[run_start..pos]);
                if bytes.get(pos + 1) == Some(&b'"') {
                    field.push('"');
                    pos += 2;
                    run_start = pos;
                } else {
                    return Ok((field, pos + 1));
                }
            }
            Some(_) => pos += 1,
        }
    }
}

fn memo_from_fields(fields: Vec<String>, record: usize) -> ReadResult<Memo> {
    if fields.len() != FIELDS_PER_RECORD {
        return Err(FormatError::FieldCount {
            record,
            found: fields.len(),
        });
    }

    let mut fields = fields.into_iter();
    let body = fields.next().unwrap_or_default();
    let locked_raw = fields.next().unwrap_or_default();
    let category_name = fields.next().unwrap_or_default();

    let locked = locked_raw
        .trim()
        .parse::<i64>()
        .map_err(|_| FormatError::InvalidLockedFlag {
            record,
            value: locked_raw.clone(),
        })?
        != 0;

    Ok(Memo {
        body,
        locked,
        category_name,
    })
}
