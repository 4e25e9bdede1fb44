use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::RecordStore;

pub fn run<S: RecordStore>(store: &S, account: &str) -> Result<CmdResult> {
    let record = store.lookup(account)?;
    tracing::debug!(account, "record retrieved");
    Ok(CmdResult::default().with_affected_records(vec![record]))
}
