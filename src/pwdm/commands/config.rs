use crate::commands::{CmdMessage, CmdResult, PwdmPaths};
use crate::config::PwdmConfig;
use crate::error::Result;

/// What `pwdm config` was asked to do, decided by how many arguments it got.
#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

/// Reads or updates the settings file in the config directory.
///
/// Unknown keys and invalid values are errors, and nothing is written when
/// the new value does not validate.
pub fn run(paths: &PwdmPaths, action: ConfigAction) -> Result<CmdResult> {
    let mut config = PwdmConfig::load(&paths.config_dir)?;
    let mut result = CmdResult::default();

    match action {
        ConfigAction::ShowAll => {}
        ConfigAction::ShowKey(key) => {
            // bare value so scripts can capture it
            result.add_message(CmdMessage::info(config.value(&key)?));
        }
        ConfigAction::Set(key, value) => {
            config.set(&key, &value)?;
            config.save(&paths.config_dir)?;
            tracing::info!(key = %key, "setting updated");

            let shown = config.value(&key)?;
            let message = if shown.is_empty() {
                format!("`{}` cleared.", key)
            } else {
                format!("`{}` is now {}.", key, shown)
            };
            result.add_message(CmdMessage::success(message));
        }
    }

    Ok(result.with_config(config))
}
