use super::{first_match, join_lines, records, warn_malformed, RecordStore};
use crate::error::{PwdmError, Result};
use crate::model::{parse_bytes, Line, Record};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// A password database backed by one text file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_lines(&self) -> Result<Vec<Line>> {
        let bytes = fs::read(&self.path).map_err(|e| PwdmError::io(&self.path, e))?;
        Ok(parse_bytes(&bytes))
    }

    fn ensure_parent_dir(&self) -> Result<()> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
                fs::create_dir_all(parent).map_err(|e| PwdmError::io(parent, e))
            }
            _ => Ok(()),
        }
    }

    /// Writes `content` to a temp file next to the database, then renames it
    /// over the database so readers see either the old or the new file.
    fn replace_content(&self, content: &[u8]) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "passwords".to_string());
        let tmp_path = dir.join(format!(".{}-{}.tmp", file_name, Uuid::new_v4()));

        let write_tmp = || -> std::io::Result<()> {
            let mut file = private_options().write(true).create_new(true).open(&tmp_path)?;
            file.write_all(content)?;
            file.sync_all()
        };

        if let Err(e) = write_tmp() {
            let _ = fs::remove_file(&tmp_path);
            return Err(PwdmError::io(&tmp_path, e));
        }
        if let Err(e) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(PwdmError::io(&self.path, e));
        }
        Ok(())
    }
}

/// Open options that create files readable by the owner only.
fn private_options() -> OpenOptions {
    #[allow(unused_mut)]
    let mut options = OpenOptions::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    options
}

impl RecordStore for FileStore {
    fn exists(&self) -> bool {
        self.path.exists()
    }

    fn append(&mut self, record: &Record) -> Result<()> {
        let line = record.encode()?;

        let mut needs_newline = false;
        if self.exists() {
            let bytes = fs::read(&self.path).map_err(|e| PwdmError::io(&self.path, e))?;
            if first_match(&parse_bytes(&bytes), &record.account).is_some() {
                return Err(PwdmError::DuplicateAccount(record.account.clone()));
            }
            needs_newline = !bytes.is_empty() && !bytes.ends_with(b"\n");
        } else {
            self.ensure_parent_dir()?;
        }

        let mut file = private_options()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| PwdmError::io(&self.path, e))?;
        if needs_newline {
            file.write_all(b"\n")
                .map_err(|e| PwdmError::io(&self.path, e))?;
        }
        file.write_all(line.as_bytes())
            .map_err(|e| PwdmError::io(&self.path, e))?;

        tracing::debug!(path = %self.path.display(), account = %record.account, "appended record");
        Ok(())
    }

    fn lookup(&self, account: &str) -> Result<Record> {
        let lines = self.read_lines()?;
        warn_malformed(&lines, &self.path);
        first_match(&lines, account)
            .cloned()
            .ok_or_else(|| PwdmError::NotFound(account.to_string()))
    }

    fn list(&self) -> Result<Vec<Record>> {
        let lines = self.read_lines()?;
        warn_malformed(&lines, &self.path);
        Ok(records(&lines))
    }

    fn remove(&mut self, account: &str) -> Result<Record> {
        let lines = self.read_lines()?;
        let removed = first_match(&lines, account)
            .cloned()
            .ok_or_else(|| PwdmError::NotFound(account.to_string()))?;

        let kept: Vec<&Line> = lines
            .iter()
            .filter(|line| line.record().map_or(true, |r| r.account != account))
            .collect();
        let dropped = lines.len() - kept.len();

        self.replace_content(&join_lines(kept))?;

        tracing::debug!(
            path = %self.path.display(),
            account,
            dropped,
            "removed record"
        );
        Ok(removed)
    }

    fn scan(&self) -> Result<Vec<Line>> {
        self.read_lines()
    }

    fn rewrite(&mut self, lines: &[Line]) -> Result<()> {
        self.ensure_parent_dir()?;
        self.replace_content(&join_lines(lines))
    }

    fn location(&self) -> &Path {
        &self.path
    }
}
