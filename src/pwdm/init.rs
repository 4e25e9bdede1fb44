use crate::api::{PwdmApi, PwdmPaths};
use crate::config::PwdmConfig;
use crate::error::{PwdmError, Result};
use crate::store::fs::FileStore;
use directories::ProjectDirs;
use std::env;
use std::path::{Path, PathBuf};

pub const DB_ENV: &str = "PWDM_DB";
pub const CONFIG_DIR_ENV: &str = "PWDM_CONFIG_DIR";
pub const DEFAULT_DB_FILENAME: &str = "passwords.txt";

pub struct PwdmContext {
    pub api: PwdmApi<FileStore>,
    pub config: PwdmConfig,
}

/// Platform directories for config and data.
#[derive(Debug, Clone)]
pub struct Locations {
    pub config_dir: PathBuf,
    pub data_dir: PathBuf,
}

impl Locations {
    /// `PWDM_CONFIG_DIR` wins over the platform config directory.
    pub fn from_env() -> Result<Self> {
        let proj_dirs = ProjectDirs::from("com", "pwdm", "pwdm").ok_or_else(|| {
            PwdmError::Config("Could not determine a home directory".to_string())
        })?;
        let config_dir = env::var_os(CONFIG_DIR_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| proj_dirs.config_dir().to_path_buf());
        Ok(Self {
            config_dir,
            data_dir: proj_dirs.data_dir().to_path_buf(),
        })
    }
}

/// Picks the database file: `--db` flag, then `PWDM_DB`, then the
/// `database` config key, then `<data dir>/passwords.txt`.
pub fn resolve_database(
    flag: Option<&Path>,
    env_db: Option<PathBuf>,
    config: &PwdmConfig,
    data_dir: &Path,
) -> PathBuf {
    flag.map(Path::to_path_buf)
        .or(env_db)
        .or_else(|| config.database.clone())
        .unwrap_or_else(|| data_dir.join(DEFAULT_DB_FILENAME))
}

pub fn initialize(db_override: Option<&Path>) -> Result<PwdmContext> {
    let locations = Locations::from_env()?;
    let env_db = env::var_os(DB_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from);
    initialize_with(&locations, db_override, env_db)
}

pub fn initialize_with(
    locations: &Locations,
    db_override: Option<&Path>,
    env_db: Option<PathBuf>,
) -> Result<PwdmContext> {
    let config = PwdmConfig::load(&locations.config_dir)?;
    let database = resolve_database(db_override, env_db, &config, &locations.data_dir);
    tracing::debug!(
        config_dir = %locations.config_dir.display(),
        database = %database.display(),
        "resolved paths"
    );

    let store = FileStore::new(&database);
    let paths = PwdmPaths {
        config_dir: locations.config_dir.clone(),
        database,
    };

    Ok(PwdmContext {
        api: PwdmApi::new(store, paths),
        config,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn locations(temp: &TempDir) -> Locations {
        Locations {
            config_dir: temp.path().join("config"),
            data_dir: temp.path().join("data"),
        }
    }

    #[test]
    fn test_flag_beats_everything() {
        let mut config = PwdmConfig::default();
        config.database = Some(PathBuf::from("/from/config.txt"));
        let db = resolve_database(
            Some(Path::new("/from/flag.txt")),
            Some(PathBuf::from("/from/env.txt")),
            &config,
            Path::new("/data"),
        );
        assert_eq!(db, PathBuf::from("/from/flag.txt"));
    }

    #[test]
    fn test_env_beats_config() {
        let mut config = PwdmConfig::default();
        config.database = Some(PathBuf::from("/from/config.txt"));
        let db = resolve_database(
            None,
            Some(PathBuf::from("/from/env.txt")),
            &config,
            Path::new("/data"),
        );
        assert_eq!(db, PathBuf::from("/from/env.txt"));
    }

    #[test]
    fn test_default_is_in_data_dir() {
        let db = resolve_database(None, None, &PwdmConfig::default(), Path::new("/data"));
        assert_eq!(db, PathBuf::from("/data/passwords.txt"));
    }

    #[test]
    fn test_initialize_reads_config_file() {
        let temp = TempDir::new().unwrap();
        let locations = locations(&temp);
        let mut config = PwdmConfig::default();
        config.set("database", "/elsewhere/db.txt").unwrap();
        config.set("length", "20").unwrap();
        config.save(&locations.config_dir).unwrap();

        let ctx = initialize_with(&locations, None, None).unwrap();

        assert_eq!(ctx.config.length, 20);
        assert_eq!(
            ctx.api.paths().database,
            PathBuf::from("/elsewhere/db.txt")
        );
    }

    #[test]
    fn test_initialize_does_not_create_database() {
        let temp = TempDir::new().unwrap();
        let locations = locations(&temp);

        let ctx = initialize_with(&locations, None, None).unwrap();

        assert_eq!(
            ctx.api.paths().database,
            temp.path().join("data").join("passwords.txt")
        );
        assert!(!ctx.api.paths().database.exists());
    }
}
