use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::RecordStore;

pub fn run<S: RecordStore>(store: &S) -> Result<CmdResult> {
    let records = store.list()?;

    let mut result = CmdResult::default();
    if records.is_empty() {
        result.add_message(CmdMessage::info("The database is empty."));
    }
    Ok(result.with_listed_records(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::error::PwdmError;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn lists_in_insertion_order() {
        let store = StoreFixture::new()
            .with_record("Zed", "z1")
            .with_record("Amy", "a1")
            .store;

        let result = run(&store).unwrap();
        let accounts: Vec<_> = result.listed_records.iter().map(|r| r.account.as_str()).collect();
        assert_eq!(accounts, vec!["Zed", "Amy"]);
        assert!(result.messages.is_empty());
    }

    #[test]
    fn empty_database_gets_info_message() {
        let store = StoreFixture::empty().store;
        let result = run(&store).unwrap();
        assert!(result.listed_records.is_empty());
        assert_eq!(result.messages[0].level, MessageLevel::Info);
    }

    #[test]
    fn skips_malformed_lines() {
        let store = InMemoryStore::from_text("A: 1\ngarbage\nB: 2\n");
        assert_eq!(run(&store).unwrap().listed_records.len(), 2);
    }

    #[test]
    fn absent_database_is_io_error() {
        assert!(matches!(
            run(&InMemoryStore::new()),
            Err(PwdmError::Io { .. })
        ));
    }
}
