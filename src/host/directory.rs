//! Sinks the exporter streams blocking entries into.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Failure reported by the host blocking directory.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("directory io error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("host rejected the request: {0}")]
    Rejected(String),
}

/// Host side of the call-blocking directory.
///
/// Entries must arrive in strictly ascending order; the host is free to
/// reject anything else.
pub trait BlockingDirectory {
    /// Drop everything previously exported (incremental reload).
    fn remove_all_blocking_entries(&mut self) -> Result<(), DirectoryError>;

    fn add_blocking_entry(&mut self, number: u64) -> Result<(), DirectoryError>;

    /// Finish the request; called once after the last entry.
    fn complete(&mut self) -> Result<(), DirectoryError>;
}

/// Collects entries in memory.
#[derive(Debug, Default)]
pub struct MemoryDirectory {
    pub entries: Vec<u64>,
    pub completed: bool,
    pub clears: usize,
}

impl MemoryDirectory {
    pub fn new() -> MemoryDirectory {
        Self::default()
    }
}

impl BlockingDirectory for MemoryDirectory {
    fn remove_all_blocking_entries(&mut self) -> Result<(), DirectoryError> {
        self.entries.clear();
        self.completed = false;
        self.clears += 1;
        Ok(())
    }

    fn add_blocking_entry(&mut self, number: u64) -> Result<(), DirectoryError> {
        self.entries.push(number);
        Ok(())
    }

    fn complete(&mut self) -> Result<(), DirectoryError> {
        self.completed = true;
        Ok(())
    }
}

/// Writes one number per line to a file, for hosts that ingest a flat list.
///
/// Every request rewrites the file from scratch, so it always holds exactly
/// the entries of the last completed export.
pub struct FileDirectory {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
}

impl FileDirectory {
    pub fn new(path: impl Into<PathBuf>) -> FileDirectory {
        FileDirectory {
            path: path.into(),
            writer: None,
        }
    }

    fn io_err(&self, source: std::io::Error) -> DirectoryError {
        DirectoryError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }

    /// Truncate the file and start a new request.
    fn start(&mut self) -> Result<(), DirectoryError> {
        let file = File::create(&self.path).map_err(|e| self.io_err(e))?;
        self.writer = Some(BufWriter::new(file));
        Ok(())
    }

    fn writer(&mut self) -> Result<&mut BufWriter<File>, DirectoryError> {
        if self.writer.is_none() {
            self.start()?;
        }
        self.writer
            .as_mut()
            .ok_or_else(|| DirectoryError::Rejected("writer not open".to_string()))
    }
}

impl BlockingDirectory for FileDirectory {
    fn remove_all_blocking_entries(&mut self) -> Result<(), DirectoryError> {
        self.start()?;
        log::debug!("Truncated directory file {}", self.path.display());
        Ok(())
    }

    fn add_blocking_entry(&mut self, number: u64) -> Result<(), DirectoryError> {
        let result = writeln!(self.writer()?, "{number}");
        result.map_err(|e| self.io_err(e))
    }

    fn complete(&mut self) -> Result<(), DirectoryError> {
        // an export with no entries still leaves an empty file behind
        let result = self.writer()?.flush();
        result.map_err(|e| self.io_err(e))?;
        self.writer = None;
        Ok(())
    }
}
