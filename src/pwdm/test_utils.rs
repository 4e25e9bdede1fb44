use crate::api::{PwdmApi, PwdmPaths};
use crate::store::fs::FileStore;
use std::path::PathBuf;
use tempfile::TempDir;

/// A database and config directory inside a throwaway temp dir.
pub struct TestEnv {
    // Keeps the directory alive until the test is done
    pub _temp_dir: TempDir,
    pub root: PathBuf,
    pub paths: PwdmPaths,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        let paths = PwdmPaths {
            config_dir: root.join("config"),
            database: root.join("passwords.txt"),
        };
        Self {
            _temp_dir: temp_dir,
            root,
            paths,
        }
    }

    pub fn store(&self) -> FileStore {
        FileStore::new(&self.paths.database)
    }

    pub fn api(&self) -> PwdmApi<FileStore> {
        PwdmApi::new(self.store(), self.paths.clone())
    }
}
