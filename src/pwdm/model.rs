//! Core data types and the line format of the password database.
//!
//! A database is plain text, one record per line:
//!
//! ```text
//! Github: q$7Lr!xZ0a
//! Mail Server: 9}Kp@w2Fh_
//! ```
//!
//! There is no escaping, so neither field may contain a newline or the
//! separator itself. [`Record::encode`] refuses such records and
//! [`Record::decode`] classifies any line that does not split into exactly two
//! fields as malformed.

use crate::error::{PwdmError, Result};
use serde::Serialize;

/// Separator between account and password on a database line.
pub const SEPARATOR: &str = ": ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub account: String,
    pub password: String,
}

impl Record {
    pub fn new(account: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            account: account.into(),
            password: password.into(),
        }
    }

    /// Checks that the record can be written and read back unchanged.
    pub fn validate(&self) -> Result<()> {
        validate_field("Account", &self.account)?;
        validate_field("Password", &self.password)
    }

    /// Formats the record as a database line, newline included.
    pub fn encode(&self) -> Result<String> {
        self.validate()?;
        Ok(format!("{}{}{}\n", self.account, SEPARATOR, self.password))
    }

    /// Parses a single database line. A trailing `\n` or `\r\n` is ignored.
    ///
    /// `line_no` is only used for the error report.
    pub fn decode(line: &str, line_no: usize) -> Result<Self> {
        let text = strip_newline(line);
        let parse_err = |reason: &str| PwdmError::Parse {
            line: line_no,
            reason: reason.to_string(),
        };

        if text.trim().is_empty() {
            return Err(parse_err("empty line"));
        }

        let fields: Vec<&str> = text.split(SEPARATOR).collect();
        match fields.as_slice() {
            [account, password] if !account.is_empty() && !password.is_empty() => {
                Ok(Record::new(*account, *password))
            }
            [_, _] => Err(parse_err("empty account or password")),
            [_] => Err(parse_err("missing `: ` separator")),
            _ => Err(parse_err("more than one `: ` separator")),
        }
    }
}

fn validate_field(name: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(PwdmError::Validation(format!("{} cannot be empty", name)));
    }
    if value.contains('\n') || value.contains('\r') {
        return Err(PwdmError::Validation(format!(
            "{} cannot contain a line break",
            name
        )));
    }
    if value.contains(SEPARATOR) {
        return Err(PwdmError::Validation(format!(
            "{} cannot contain `{}`",
            name, SEPARATOR
        )));
    }
    Ok(())
}

fn strip_newline(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

/// A database line that could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedLine {
    /// 1-based line number.
    pub line: usize,
    pub raw: Vec<u8>,
    pub reason: String,
}

/// One physical line of the database, as read from disk.
///
/// `raw` keeps the original bytes including the line terminator, so a
/// rewrite can reproduce untouched lines exactly, even ones that are not
/// valid UTF-8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Record { raw: Vec<u8>, record: Record },
    Malformed(MalformedLine),
}

impl Line {
    /// A freshly encoded line for `record`.
    pub fn from_record(record: &Record) -> Result<Self> {
        Ok(Line::Record {
            raw: record.encode()?.into_bytes(),
            record: record.clone(),
        })
    }

    pub fn raw(&self) -> &[u8] {
        match self {
            Line::Record { raw, .. } => raw,
            Line::Malformed(m) => &m.raw,
        }
    }

    pub fn record(&self) -> Option<&Record> {
        match self {
            Line::Record { record, .. } => Some(record),
            Line::Malformed(_) => None,
        }
    }
}

/// Splits database text into classified lines.
pub fn parse_lines(text: &str) -> Vec<Line> {
    parse_bytes(text.as_bytes())
}

/// Splits raw database contents into classified lines. A line that is not
/// valid UTF-8 is malformed; the lines around it are unaffected.
pub fn parse_bytes(bytes: &[u8]) -> Vec<Line> {
    bytes
        .split_inclusive(|b| *b == b'\n')
        .enumerate()
        .map(|(i, raw)| {
            let decoded = std::str::from_utf8(raw)
                .map_err(|_| PwdmError::Parse {
                    line: i + 1,
                    reason: "invalid UTF-8".to_string(),
                })
                .and_then(|text| Record::decode(text, i + 1));
            match decoded {
                Ok(record) => Line::Record {
                    raw: raw.to_vec(),
                    record,
                },
                Err(PwdmError::Parse { line, reason }) => Line::Malformed(MalformedLine {
                    line,
                    raw: raw.to_vec(),
                    reason,
                }),
                Err(other) => Line::Malformed(MalformedLine {
                    line: i + 1,
                    raw: raw.to_vec(),
                    reason: other.to_string(),
                }),
            }
        })
        .collect()
}

/// Title-cases an account name: the first letter of every word is uppercased
/// and the remaining letters lowercased. Any non-alphabetic character starts a
/// new word, so `"my-bank"` becomes `"My-Bank"`.
pub fn normalize_account(account: &str) -> String {
    let mut out = String::with_capacity(account.len());
    let mut at_word_start = true;

    for c in account.trim().chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }

    out
}
