//! Note store contract and `std::fs` implementation.
//!
//! # Responsibility
//! - Create directories and files on demand for daily notes.
//! - Append to existing notes without rewriting prior content.
//! - Read the trailing lines of a note to choose entry separators.
//!
//! # Invariants
//! - `path_exists` reports `false` only for `NotFound`; other stat failures
//!   (permission denied, a file used as a directory) are returned as errors.
//! - `ensure_directory` never reports `true` for a directory that existed.
//! - Writes never truncate a file except through `create_file`.

use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs::{self, OpenOptions};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

pub type StoreResult<T> = Result<T, StoreError>;

/// Filesystem operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOp {
    CreateDirectory,
    Stat,
    CreateFile,
    Append,
    Read,
}

impl StoreOp {
    /// Verb phrase used in diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CreateDirectory => "create directory",
            Self::Stat => "stat",
            Self::CreateFile => "create file",
            Self::Append => "append to",
            Self::Read => "read",
        }
    }
}

/// I/O failure tagged with the operation and path involved.
#[derive(Debug)]
pub struct StoreError {
    pub op: StoreOp,
    pub path: PathBuf,
    pub source: io::Error,
}

impl StoreError {
    fn new(op: StoreOp, path: &Path, source: io::Error) -> Self {
        Self {
            op,
            path: path.to_path_buf(),
            source,
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "failed to {} `{}`: {}",
            self.op.as_str(),
            self.path.display(),
            self.source
        )
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

/// Storage interface used by note use-cases.
pub trait NoteStore {
    /// Creates `path` and missing ancestors; returns whether anything was created.
    fn ensure_directory(&self, path: &Path) -> StoreResult<bool>;
    /// Returns whether `path` exists.
    fn path_exists(&self, path: &Path) -> StoreResult<bool>;
    /// Writes `content` to `path`, truncating any existing file.
    fn create_file(&self, path: &Path, content: &str) -> StoreResult<()>;
    /// Appends `content` to `path`, creating the file when absent.
    fn append_to_file(&self, path: &Path, content: &str) -> StoreResult<()>;
    /// Returns the last `count` elements of the file split on `\n`.
    ///
    /// A trailing newline yields a final empty element.
    fn trailing_lines_of(&self, path: &Path, count: usize) -> StoreResult<Vec<String>>;

    /// Returns the final element of the file split on `\n`.
    ///
    /// This is `""` when the file ends with a newline or is empty.
    fn last_line_of(&self, path: &Path) -> StoreResult<String> {
        Ok(self
            .trailing_lines_of(path, 1)?
            .pop()
            .unwrap_or_default())
    }
}

/// Note store backed by the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsNoteStore;

impl FsNoteStore {
    pub fn new() -> Self {
        Self
    }
}

impl NoteStore for FsNoteStore {
    fn ensure_directory(&self, path: &Path) -> StoreResult<bool> {
        match fs::metadata(path) {
            Ok(meta) if meta.is_dir() => {
                debug!(
                    "event=ensure_directory module=store status=ok created=false path={}",
                    path.display()
                );
                Ok(false)
            }
            Ok(_) => Err(StoreError::new(
                StoreOp::CreateDirectory,
                path,
                io::Error::new(ErrorKind::AlreadyExists, "path exists and is not a directory"),
            )),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                fs::create_dir_all(path)
                    .map_err(|err| StoreError::new(StoreOp::CreateDirectory, path, err))?;
                debug!(
                    "event=ensure_directory module=store status=ok created=true path={}",
                    path.display()
                );
                Ok(true)
            }
            Err(err) => Err(StoreError::new(StoreOp::Stat, path, err)),
        }
    }

    fn path_exists(&self, path: &Path) -> StoreResult<bool> {
        match fs::metadata(path) {
            Ok(_) => Ok(true),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
            Err(err) => Err(StoreError::new(StoreOp::Stat, path, err)),
        }
    }

    fn create_file(&self, path: &Path, content: &str) -> StoreResult<()> {
        fs::write(path, content).map_err(|err| StoreError::new(StoreOp::CreateFile, path, err))?;
        debug!(
            "event=create_file module=store status=ok bytes={} path={}",
            content.len(),
            path.display()
        );
        Ok(())
    }

    fn append_to_file(&self, path: &Path, content: &str) -> StoreResult<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|err| StoreError::new(StoreOp::Append, path, err))?;
        file.write_all(content.as_bytes())
            .map_err(|err| StoreError::new(StoreOp::Append, path, err))?;
        debug!(
            "event=append_file module=store status=ok bytes={} path={}",
            content.len(),
            path.display()
        );
        Ok(())
    }

    fn trailing_lines_of(&self, path: &Path, count: usize) -> StoreResult<Vec<String>> {
        let content = fs::read(path).map_err(|err| StoreError::new(StoreOp::Read, path, err))?;
        Ok(trailing_lines(&content, count))
    }
}

// Hand-edited notes may hold bytes that are not UTF-8; only the tail is decoded.
fn trailing_lines(content: &[u8], count: usize) -> Vec<String> {
    let lines: Vec<&[u8]> = content.split(|byte| *byte == b'\n').collect();
    let start = lines.len().saturating_sub(count);
    lines[start..]
        .iter()
        .map(|line| String::from_utf8_lossy(line).into_owned())
        .collect()
}
