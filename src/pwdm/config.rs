use crate::error::{PwdmError, Result};
use crate::generator;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_LENGTH: usize = 16;

/// Configuration for pwdm, stored in `<config dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PwdmConfig {
    /// Database file to use when neither `--db` nor `PWDM_DB` is given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<PathBuf>,

    /// Length of generated passwords when none is requested
    #[serde(default = "default_length")]
    pub length: usize,

    /// Copy retrieved passwords to the clipboard
    #[serde(default = "default_clipboard")]
    pub clipboard: bool,
}

fn default_length() -> usize {
    DEFAULT_LENGTH
}

fn default_clipboard() -> bool {
    true
}

impl Default for PwdmConfig {
    fn default() -> Self {
        Self {
            database: None,
            length: DEFAULT_LENGTH,
            clipboard: true,
        }
    }
}

impl PwdmConfig {
    pub const KEYS: [&'static str; 3] = ["database", "length", "clipboard"];

    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(|e| PwdmError::io(&config_path, e))?;
        let config: PwdmConfig = serde_json::from_str(&content)?;
        generator::validate_length(config.length)
            .map_err(|e| PwdmError::Config(format!("{}: {}", config_path.display(), e)))?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(|e| PwdmError::io(config_dir, e))?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, content).map_err(|e| PwdmError::io(&config_path, e))?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "database" => Some(
                self.database
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default(),
            ),
            "length" => Some(self.length.to_string()),
            "clipboard" => Some(self.clipboard.to_string()),
            _ => None,
        }
    }

    /// Like [`PwdmConfig::get`], but an unknown key is an error.
    pub fn value(&self, key: &str) -> Result<String> {
        self.get(key).ok_or_else(|| unknown_key(key))
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "database" => {
                let value = value.trim();
                self.database = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
            "length" => {
                self.length = generator::parse_length(value)?;
            }
            "clipboard" => {
                self.clipboard = match value.trim().to_lowercase().as_str() {
                    "true" | "yes" | "on" | "1" => true,
                    "false" | "no" | "off" | "0" => false,
                    other => {
                        return Err(PwdmError::Config(format!(
                            "clipboard expects true or false, got `{}`",
                            other
                        )))
                    }
                };
            }
            other => return Err(unknown_key(other)),
        }
        Ok(())
    }

    pub fn list_all(&self) -> Vec<(&'static str, String)> {
        Self::KEYS
            .iter()
            .map(|k| (*k, self.get(k).unwrap_or_default()))
            .collect()
    }
}

fn unknown_key(key: &str) -> PwdmError {
    PwdmError::Config(format!(
        "`{}` is not a setting. Known settings: {}",
        key,
        PwdmConfig::KEYS.join(", ")
    ))
}
