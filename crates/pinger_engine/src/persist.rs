use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("not a file path: {0:?}")]
    NotAFile(PathBuf),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Creates the directory that will hold `target` if it does not exist yet.
/// Returns that directory.
pub fn ensure_parent_dir(target: &Path) -> Result<PathBuf, PersistError> {
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    if dir.exists() {
        if !dir.is_dir() {
            return Err(PersistError::OutputDir(format!("{dir:?} is not a directory")));
        }
    } else {
        fs::create_dir_all(&dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
    }
    Ok(dir)
}

/// Writes `content` to `target` through a temp file in the same directory,
/// so readers never see a half-written file.
pub fn write_atomic(target: &Path, content: &str) -> Result<PathBuf, PersistError> {
    if target.file_name().is_none() {
        return Err(PersistError::NotAFile(target.to_path_buf()));
    }
    let dir = ensure_parent_dir(target)?;

    let mut tmp = NamedTempFile::new_in(&dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
    tmp.write_all(content.as_bytes())?;
    tmp.flush()?;
    tmp.as_file_mut().sync_all()?;

    tmp.persist(target).map_err(|e| PersistError::Io(e.error))?;
    Ok(target.to_path_buf())
}
