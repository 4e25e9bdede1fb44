use crate::commands::{CmdResult, PwdmPaths};
use crate::error::Result;

pub fn run(paths: &PwdmPaths) -> Result<CmdResult> {
    Ok(CmdResult::default().with_paths(vec![paths.database.clone()]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn reports_database_path() {
        let paths = PwdmPaths {
            config_dir: PathBuf::from("/cfg"),
            database: PathBuf::from("/data/passwords.txt"),
        };
        let result = run(&paths).unwrap();
        assert_eq!(result.paths, vec![PathBuf::from("/data/passwords.txt")]);
    }
}
