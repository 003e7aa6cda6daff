use scaffold_core::CoreError;
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Result of trying to write one generated file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteOutcome {
    Written,
    /// A file already existed at the path and was left untouched
    Skipped,
}

/// Writes generated files without ever replacing existing ones
#[derive(Debug, Clone, Copy, Default)]
pub struct CodeWriter;

impl CodeWriter {
    pub fn new() -> Self {
        Self
    }

    /// Create `dir` and its parents if missing
    pub fn ensure_dir(&self, dir: &Path) -> Result<(), CoreError> {
        fs::create_dir_all(dir)?;
        Ok(())
    }

    /// Write `content` to `path` unless a file is already there.
    ///
    /// The file is opened with create-new semantics, so a file that appears
    /// after the caller's existence check is still left alone.
    pub fn write_new(&self, path: &Path, content: &str) -> Result<WriteOutcome, CoreError> {
        if let Some(parent) = path.parent() {
            self.ensure_dir(parent)?;
        }

        let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                tracing::debug!(path = %path.display(), "file exists, skipping");
                return Ok(WriteOutcome::Skipped);
            }
            Err(e) => return Err(e.into()),
        };

        file.write_all(content.as_bytes())?;
        tracing::info!(path = %path.display(), "created");
        Ok(WriteOutcome::Written)
    }
}

/// Files touched by one generation run
#[derive(Debug, Clone, Default, Serialize)]
pub struct GenerationReport {
    pub written: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

impl GenerationReport {
    pub fn record(&mut self, path: PathBuf, outcome: WriteOutcome) {
        match outcome {
            WriteOutcome::Written => self.written.push(path),
            WriteOutcome::Skipped => self.skipped.push(path),
        }
    }

    /// True when nothing new was written
    pub fn is_noop(&self) -> bool {
        self.written.is_empty()
    }
}
