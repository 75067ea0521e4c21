use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::TransactionRecord;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Could not access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not write record to {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Malformed record in {}{}: {reason}", path.display(), at_line(line))]
    Corrupt {
        path: PathBuf,
        /// Unknown when the reader could not report a position
        line: Option<u64>,
        reason: String,
    },
}

fn at_line(line: &Option<u64>) -> String {
    line.map(|l| format!(" at line {}", l)).unwrap_or_default()
}

/// Append-only CSV file holding every recorded action.
///
/// The file is opened for the duration of a single read, append or copy and
/// closed again; no handle is kept between calls.
#[derive(Debug, Clone)]
pub struct TransactionLog {
    path: PathBuf,
}

impl TransactionLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every record in file order. A missing file is an empty log.
    ///
    /// The first line is taken as the header. Any row that cannot be decoded
    /// fails the whole read.
    pub fn read_all(&self) -> Result<Vec<TransactionRecord>, StorageError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no transaction log yet");
                return Ok(Vec::new());
            }
            Err(e) => return Err(self.io_error(e)),
        };

        let mut reader = csv::Reader::from_reader(file);
        let mut records = Vec::new();
        for result in reader.deserialize::<TransactionRecord>() {
            let record = result.map_err(|e| StorageError::Corrupt {
                path: self.path.clone(),
                line: e.position().map(|p| p.line()),
                reason: e.to_string(),
            })?;
            records.push(record);
        }

        tracing::debug!(
            path = %self.path.display(),
            count = records.len(),
            "read transaction log"
        );
        Ok(records)
    }

    /// Append one record, writing the header first when the file is empty.
    pub fn append(&self, record: &TransactionRecord) -> Result<(), StorageError> {
        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.io_error(e))?;

        let len = file.metadata().map_err(|e| self.io_error(e))?.len();
        let write_header = len == 0;

        // A hand-edited file may lack the final newline
        if !write_header && !ends_with_newline(&mut file, len).map_err(|e| self.io_error(e))? {
            file.write_all(b"\n").map_err(|e| self.io_error(e))?;
        }

        let mut writer = csv::WriterBuilder::new()
            .has_headers(write_header)
            .from_writer(file);
        writer.serialize(record).map_err(|e| StorageError::Write {
            path: self.path.clone(),
            source: e,
        })?;
        writer.flush().map_err(|e| self.io_error(e))?;

        tracing::debug!(
            path = %self.path.display(),
            kind = %record.kind,
            header = write_header,
            "appended record"
        );
        Ok(())
    }

    /// Copy the log byte-for-byte to `destination`, replacing any existing
    /// file there. Returns the number of bytes copied.
    pub fn copy_to(&self, destination: &Path) -> io::Result<u64> {
        if self.is_same_file(destination) {
            return fs::metadata(&self.path).map(|m| m.len());
        }
        fs::copy(&self.path, destination)
    }

    fn is_same_file(&self, other: &Path) -> bool {
        match (fs::canonicalize(&self.path), fs::canonicalize(other)) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }

    fn io_error(&self, source: io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

fn ends_with_newline(file: &mut File, len: u64) -> io::Result<bool> {
    let mut last = [0u8; 1];
    file.seek(SeekFrom::Start(len - 1))?;
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}
