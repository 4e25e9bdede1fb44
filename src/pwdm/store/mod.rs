//! # Storage Layer
//!
//! The [`RecordStore`] trait is the only way the rest of the crate touches the
//! password database.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: the production store, a handle owning the path of one
//!   text file. Every call opens the file, does its work and closes it again;
//!   there is no state carried between calls.
//! - [`memory::InMemoryStore`]: keeps the lines in a `Vec`, used by command
//!   tests so they never touch the filesystem.
//!
//! ## Semantics shared by all stores
//!
//! - Lookups are exact and case-sensitive. Callers normalize account names.
//! - `lookup` reports the first matching record; `remove` drops every match.
//! - `append` refuses an account that already exists.
//! - Malformed lines are skipped by `lookup` and `list`, preserved by
//!   `remove`, and reported by `scan`.
//! - Reading a database that does not exist is an I/O error, not an empty
//!   result.

use crate::error::Result;
use crate::model::{Line, Record};
use std::path::Path;

pub mod fs;
pub mod memory;

pub trait RecordStore {
    /// True iff the backing database is present.
    fn exists(&self) -> bool;

    /// Adds a record at the end of the database, creating it if needed.
    fn append(&mut self, record: &Record) -> Result<()>;

    /// Returns the first record whose account equals `account`.
    fn lookup(&self, account: &str) -> Result<Record>;

    /// Returns all well-formed records in file order.
    fn list(&self) -> Result<Vec<Record>>;

    /// Removes every record for `account` and returns the first one removed.
    fn remove(&mut self, account: &str) -> Result<Record>;

    /// Returns every line of the database, classified.
    fn scan(&self) -> Result<Vec<Line>>;

    /// Replaces the whole database with `lines`, written as their raw text.
    fn rewrite(&mut self, lines: &[Line]) -> Result<()>;

    /// Where the database lives, for messages.
    fn location(&self) -> &Path;
}

pub(crate) fn first_match<'a>(lines: &'a [Line], account: &str) -> Option<&'a Record> {
    lines
        .iter()
        .filter_map(Line::record)
        .find(|record| record.account == account)
}

pub(crate) fn records(lines: &[Line]) -> Vec<Record> {
    lines.iter().filter_map(Line::record).cloned().collect()
}

/// Joins raw lines back into database contents.
///
/// A kept line that lost its terminator (the old last line) gets one, so
/// lines never merge.
pub(crate) fn join_lines<'a>(lines: impl IntoIterator<Item = &'a Line>) -> Vec<u8> {
    let mut out = Vec::new();
    for line in lines {
        if !out.is_empty() && !out.ends_with(b"\n") {
            out.push(b'\n');
        }
        out.extend_from_slice(line.raw());
    }
    out
}

fn warn_malformed(lines: &[Line], location: &Path) {
    for line in lines {
        if let Line::Malformed(m) = line {
            tracing::warn!(
                path = %location.display(),
                line = m.line,
                reason = %m.reason,
                "skipping malformed record"
            );
        }
    }
}
