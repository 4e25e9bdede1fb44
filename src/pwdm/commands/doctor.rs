use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{Line, Record};
use crate::store::RecordStore;
use std::collections::HashSet;

/// A record hidden behind an earlier record for the same account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateRecord {
    /// 1-based line number.
    pub line: usize,
    pub record: Record,
}

/// Checks the database for malformed lines and repeated accounts.
///
/// With `fix`, the database is rewritten keeping only the first record of
/// each account.
pub fn run<S: RecordStore>(store: &mut S, fix: bool) -> Result<CmdResult> {
    let lines = store.scan()?;

    let mut seen = HashSet::new();
    let mut kept = Vec::with_capacity(lines.len());
    let mut result = CmdResult::default();

    for (i, line) in lines.iter().enumerate() {
        match line {
            Line::Malformed(m) => result.malformed.push(m.clone()),
            Line::Record { record, .. } => {
                if seen.insert(record.account.as_str()) {
                    kept.push(line.clone());
                } else {
                    result.duplicates.push(DuplicateRecord {
                        line: i + 1,
                        record: record.clone(),
                    });
                }
            }
        }
    }

    if result.malformed.is_empty() && result.duplicates.is_empty() {
        result.add_message(CmdMessage::success("No problems found."));
        return Ok(result);
    }

    for m in &result.malformed {
        result.messages.push(CmdMessage::warning(format!(
            "  - line {}: {}",
            m.line, m.reason
        )));
    }
    for d in &result.duplicates {
        result.messages.push(CmdMessage::warning(format!(
            "  - line {}: `{}` repeats an earlier account",
            d.line, d.record.account
        )));
    }

    let total = result.malformed.len() + result.duplicates.len();
    if fix {
        store.rewrite(&kept)?;
        tracing::info!(removed = total, "database repaired");
        result.add_message(CmdMessage::success(format!(
            "Removed {} problem line(s).",
            total
        )));
    } else {
        result.add_message(CmdMessage::info(format!(
            "{} problem line(s) found. Run with --fix to remove them.",
            total
        )));
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn clean_database_reports_success() {
        let mut store = StoreFixture::new().with_records(2).store;
        let result = run(&mut store, false).unwrap();
        assert!(result.malformed.is_empty());
        assert!(result.duplicates.is_empty());
        assert_eq!(result.messages[0].level, MessageLevel::Success);
    }

    #[test]
    fn reports_without_fixing() {
        let text = "Bob: one\nbroken\nAmy: two\nBob: three\n";
        let mut store = InMemoryStore::from_text(text);

        let result = run(&mut store, false).unwrap();

        assert_eq!(result.malformed.len(), 1);
        assert_eq!(result.malformed[0].line, 2);
        assert_eq!(
            result.duplicates,
            vec![DuplicateRecord {
                line: 4,
                record: Record::new("Bob", "three")
            }]
        );
        assert_eq!(store.scan().unwrap().len(), 4);
    }

    #[test]
    fn fix_keeps_first_record_per_account() {
        let mut store = InMemoryStore::from_text("Bob: one\nbroken\nAmy: two\nBob: three\n");

        run(&mut store, true).unwrap();

        let records = store.list().unwrap();
        assert_eq!(
            records,
            vec![Record::new("Bob", "one"), Record::new("Amy", "two")]
        );
        assert_eq!(store.scan().unwrap().len(), 2);
    }
}
