use super::{first_match, records, RecordStore};
use crate::error::{PwdmError, Result};
use crate::model::{parse_lines, Line, Record};
use std::path::{Path, PathBuf};

/// In-memory storage for testing.
/// Does NOT persist data.
///
/// Starts out "absent", like a database file that was never created.
#[derive(Debug)]
pub struct InMemoryStore {
    lines: Option<Vec<Line>>,
    location: PathBuf,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self {
            lines: None,
            location: PathBuf::from("<memory>"),
        }
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding `text` as if it had been read from disk.
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: Some(parse_lines(text)),
            ..Self::default()
        }
    }

    fn lines(&self) -> Result<&Vec<Line>> {
        self.lines.as_ref().ok_or_else(|| {
            PwdmError::io(
                &self.location,
                std::io::Error::new(std::io::ErrorKind::NotFound, "database does not exist"),
            )
        })
    }
}

impl RecordStore for InMemoryStore {
    fn exists(&self) -> bool {
        self.lines.is_some()
    }

    fn append(&mut self, record: &Record) -> Result<()> {
        let line = Line::from_record(record)?;
        let lines = self.lines.get_or_insert_with(Vec::new);
        if first_match(lines, &record.account).is_some() {
            return Err(PwdmError::DuplicateAccount(record.account.clone()));
        }
        lines.push(line);
        Ok(())
    }

    fn lookup(&self, account: &str) -> Result<Record> {
        first_match(self.lines()?, account)
            .cloned()
            .ok_or_else(|| PwdmError::NotFound(account.to_string()))
    }

    fn list(&self) -> Result<Vec<Record>> {
        Ok(records(self.lines()?))
    }

    fn remove(&mut self, account: &str) -> Result<Record> {
        let removed = self.lookup(account)?;
        if let Some(lines) = self.lines.as_mut() {
            lines.retain(|line| line.record().map_or(true, |r| r.account != account));
        }
        Ok(removed)
    }

    fn scan(&self) -> Result<Vec<Line>> {
        Ok(self.lines()?.clone())
    }

    fn rewrite(&mut self, lines: &[Line]) -> Result<()> {
        self.lines = Some(lines.to_vec());
        Ok(())
    }

    fn location(&self) -> &Path {
        &self.location
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        pub fn empty() -> Self {
            Self {
                store: InMemoryStore::from_text(""),
            }
        }

        pub fn with_records(mut self, count: usize) -> Self {
            for i in 0..count {
                let record = Record::new(format!("Account {}", i + 1), format!("Secret-{}!", i + 1));
                self.store.append(&record).unwrap();
            }
            self
        }

        pub fn with_record(mut self, account: &str, password: &str) -> Self {
            self.store.append(&Record::new(account, password)).unwrap();
            self
        }
    }
}
