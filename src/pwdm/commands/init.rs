use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::RecordStore;

/// Creates an empty database (and its directory) if none exists yet.
pub fn run<S: RecordStore>(store: &mut S) -> Result<CmdResult> {
    let location = store.location().to_path_buf();
    let mut result = CmdResult::default();

    if store.exists() {
        result.add_message(CmdMessage::info(format!(
            "Database already exists at {}",
            location.display()
        )));
    } else {
        store.rewrite(&[])?;
        tracing::info!(path = %location.display(), "database created");
        result.add_message(CmdMessage::success(format!(
            "Initialized database at {}",
            location.display()
        )));
    }

    Ok(result.with_paths(vec![location]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn creates_empty_database() {
        let mut store = InMemoryStore::new();
        let result = run(&mut store).unwrap();
        assert!(store.exists());
        assert!(store.list().unwrap().is_empty());
        assert_eq!(result.messages[0].level, MessageLevel::Success);
    }

    #[test]
    fn leaves_existing_database_alone() {
        let mut store = StoreFixture::new().with_records(2).store;
        let result = run(&mut store).unwrap();
        assert_eq!(store.list().unwrap().len(), 2);
        assert_eq!(result.messages[0].level, MessageLevel::Info);
    }
}
