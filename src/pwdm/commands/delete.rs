use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::RecordStore;

pub fn run<S: RecordStore>(store: &mut S, account: &str) -> Result<CmdResult> {
    let removed = store.remove(account)?;
    tracing::info!(account, "record deleted");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "`{}` removed from the database.",
        account
    )));
    Ok(result.with_affected_records(vec![removed]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PwdmError;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn removes_record_and_reports_it() {
        let mut store = StoreFixture::new().with_records(3).store;

        let result = run(&mut store, "Account 1").unwrap();

        assert_eq!(result.affected_records[0].account, "Account 1");
        let accounts: Vec<_> = store.list().unwrap().into_iter().map(|r| r.account).collect();
        assert_eq!(accounts, vec!["Account 2", "Account 3"]);
    }

    #[test]
    fn unknown_account_leaves_store_alone() {
        let mut store = StoreFixture::new().with_records(2).store;

        assert!(matches!(
            run(&mut store, "Account 9"),
            Err(PwdmError::NotFound(_))
        ));
        assert_eq!(store.list().unwrap().len(), 2);
    }
}
