use crate::commands::{CmdMessage, CmdResult};
use crate::error::{PwdmError, Result};
use crate::model::{Line, Record};
use crate::store::RecordStore;

/// Stores `password` under `account`.
///
/// An existing account is an error unless `force` is set, in which case the
/// old record is replaced in place with a single rewrite of the database.
pub fn run<S: RecordStore>(
    store: &mut S,
    account: &str,
    password: &str,
    force: bool,
) -> Result<CmdResult> {
    let record = Record::new(account, password);
    record.validate()?;

    let mut result = CmdResult::default();

    match store.append(&record) {
        Ok(()) => {}
        Err(PwdmError::DuplicateAccount(_)) if force => {
            replace(store, &record)?;
            result.add_message(CmdMessage::info(format!(
                "Replaced the previous password for `{}`.",
                account
            )));
        }
        Err(e) => return Err(e),
    }

    tracing::info!(account, "record added");
    result.add_message(CmdMessage::success(format!(
        "`{}` added to the database.",
        account
    )));
    Ok(result.with_affected_records(vec![record]))
}

/// Puts `record` where the first line for its account was and drops any
/// later lines for the same account. Other lines are kept as they are.
fn replace<S: RecordStore>(store: &mut S, record: &Record) -> Result<()> {
    let new_line = Line::from_record(record)?;
    let mut replaced = false;
    let mut lines = Vec::new();

    for line in store.scan()? {
        match line.record() {
            Some(existing) if existing.account == record.account => {
                if !replaced {
                    lines.push(new_line.clone());
                    replaced = true;
                }
            }
            _ => lines.push(line),
        }
    }
    if !replaced {
        lines.push(new_line);
    }

    store.rewrite(&lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn adds_to_absent_database() {
        let mut store = InMemoryStore::new();
        let result = run(&mut store, "Alice", "p@ss1234", false).unwrap();

        assert_eq!(result.affected_records, vec![Record::new("Alice", "p@ss1234")]);
        assert_eq!(store.lookup("Alice").unwrap().password, "p@ss1234");
    }

    #[test]
    fn rejects_duplicate_account() {
        let mut store = StoreFixture::new().with_record("Bob", "secret").store;

        let err = run(&mut store, "Bob", "other", false).unwrap_err();

        assert!(matches!(err, PwdmError::DuplicateAccount(_)));
        assert_eq!(store.lookup("Bob").unwrap().password, "secret");
    }

    #[test]
    fn force_replaces_existing_record() {
        let mut store = StoreFixture::new()
            .with_record("Bob", "secret")
            .with_record("Amy", "hers")
            .store;

        run(&mut store, "Bob", "other", true).unwrap();

        let accounts: Vec<_> = store.list().unwrap().into_iter().map(|r| r.account).collect();
        assert_eq!(accounts, vec!["Bob", "Amy"]);
        assert_eq!(store.lookup("Bob").unwrap().password, "other");
    }

    #[test]
    fn force_collapses_duplicates_and_keeps_malformed_lines() {
        let mut store = InMemoryStore::from_text("Bob: one\njunk\nAmy: hers\nBob: two\n");

        run(&mut store, "Bob", "three", true).unwrap();

        let raw: Vec<u8> = store.scan().unwrap().iter().flat_map(|l| l.raw().to_vec()).collect();
        assert_eq!(raw, b"Bob: three\njunk\nAmy: hers\n");
    }

    /// Delegates to an in-memory store but refuses to rewrite.
    struct ReadOnlyStore(InMemoryStore);

    impl RecordStore for ReadOnlyStore {
        fn exists(&self) -> bool {
            self.0.exists()
        }
        fn append(&mut self, record: &Record) -> Result<()> {
            self.0.append(record)
        }
        fn lookup(&self, account: &str) -> Result<Record> {
            self.0.lookup(account)
        }
        fn list(&self) -> Result<Vec<Record>> {
            self.0.list()
        }
        fn remove(&mut self, _account: &str) -> Result<Record> {
            Err(PwdmError::io(
                self.0.location(),
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            ))
        }
        fn scan(&self) -> Result<Vec<Line>> {
            self.0.scan()
        }
        fn rewrite(&mut self, _lines: &[Line]) -> Result<()> {
            Err(PwdmError::io(
                self.0.location(),
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            ))
        }
        fn location(&self) -> &std::path::Path {
            self.0.location()
        }
    }

    #[test]
    fn failed_force_keeps_previous_record() {
        let mut store = ReadOnlyStore(StoreFixture::new().with_record("Bob", "secret").store);

        let err = run(&mut store, "Bob", "other", true).unwrap_err();

        assert!(matches!(err, PwdmError::Io { .. }));
        assert_eq!(store.lookup("Bob").unwrap().password, "secret");
    }

    #[test]
    fn rejects_password_with_separator() {
        let mut store = InMemoryStore::new();
        let err = run(&mut store, "Alice", "a: b", false).unwrap_err();
        assert!(matches!(err, PwdmError::Validation(_)));
        assert!(!store.exists());
    }
}
