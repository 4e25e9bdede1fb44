//! # API Facade
//!
//! The API layer is a thin facade over the command layer and the single entry
//! point for every pwdm operation, whatever the UI.
//!
//! It:
//! - **Dispatches** to the matching command function
//! - **Normalizes inputs**: account names are title-cased here, so the menu,
//!   the flags and the subcommands all address the same record
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It never prints, prompts or formats. That belongs to the CLI.
//!
//! `PwdmApi<S: RecordStore>` is generic over the storage backend:
//! - Production: `PwdmApi<FileStore>`
//! - Testing: `PwdmApi<InMemoryStore>`

use crate::commands;
use crate::error::{PwdmError, Result};
use crate::model::normalize_account;
use crate::store::RecordStore;

/// The main API facade for pwdm operations.
pub struct PwdmApi<S: RecordStore> {
    store: S,
    paths: commands::PwdmPaths,
}

impl<S: RecordStore> PwdmApi<S> {
    pub fn new(store: S, paths: commands::PwdmPaths) -> Self {
        Self { store, paths }
    }

    pub fn add_record(
        &mut self,
        account: &str,
        password: &str,
        force: bool,
    ) -> Result<commands::CmdResult> {
        let account = normalize(account)?;
        commands::add::run(&mut self.store, &account, password, force)
    }

    pub fn get_record(&self, account: &str) -> Result<commands::CmdResult> {
        let account = normalize(account)?;
        commands::get::run(&self.store, &account)
    }

    pub fn delete_record(&mut self, account: &str) -> Result<commands::CmdResult> {
        let account = normalize(account)?;
        commands::delete::run(&mut self.store, &account)
    }

    pub fn view_records(&self) -> Result<commands::CmdResult> {
        commands::view::run(&self.store)
    }

    pub fn generate(&self, length: usize) -> Result<commands::CmdResult> {
        commands::generate::run(length)
    }

    pub fn doctor(&mut self, fix: bool) -> Result<commands::CmdResult> {
        commands::doctor::run(&mut self.store, fix)
    }

    pub fn init(&mut self) -> Result<commands::CmdResult> {
        commands::init::run(&mut self.store)
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.paths, action)
    }

    pub fn database_path(&self) -> Result<commands::CmdResult> {
        commands::path::run(&self.paths)
    }

    /// Whether `account` is stored. An absent database holds no accounts.
    pub fn account_exists(&self, account: &str) -> Result<bool> {
        if !self.store.exists() {
            return Ok(false);
        }
        match self.store.lookup(&normalize(account)?) {
            Ok(_) => Ok(true),
            Err(PwdmError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    pub fn paths(&self) -> &commands::PwdmPaths {
        &self.paths
    }
}

fn normalize(account: &str) -> Result<String> {
    let account = normalize_account(account);
    if account.is_empty() {
        return Err(PwdmError::Validation(
            "Account name cannot be empty".to_string(),
        ));
    }
    Ok(account)
}

pub use crate::commands::config::ConfigAction;
pub use crate::commands::doctor::DuplicateRecord;
pub use commands::{CmdMessage, CmdResult, MessageLevel, PwdmPaths};
