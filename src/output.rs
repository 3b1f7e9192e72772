//! Scoped writer for the destination audio file.
//!
//! Bytes are written to a uniquely named sibling of the destination and only
//! moved over it on [`PartialFile::commit`]. Dropping an uncommitted
//! `PartialFile` removes the temporary file, so a failed run never leaves a
//! truncated MP3 at the destination.

use crate::{Error, Result};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

pub struct PartialFile {
    destination: PathBuf,
    temp: NamedTempFile,
    written: u64,
}

impl PartialFile {
    /// Open a temporary file next to `destination`.
    pub fn create(destination: impl AsRef<Path>) -> Result<Self> {
        let destination = destination.as_ref().to_path_buf();
        let file_name = destination.file_name().ok_or_else(|| {
            Error::io(
                &destination,
                io::Error::new(io::ErrorKind::InvalidInput, "destination has no file name"),
            )
        })?;
        let dir = destination
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let temp = tempfile::Builder::new()
            .prefix(&format!(".{}.", file_name.to_string_lossy()))
            .suffix(".part")
            .tempfile_in(dir)
            .map_err(|e| Error::io(&destination, e))?;
        debug!(temp = %temp.path().display(), "Opened partial output file");

        Ok(Self {
            destination,
            temp,
            written: 0,
        })
    }

    pub fn temp_path(&self) -> &Path {
        self.temp.path()
    }

    pub fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        self.temp
            .as_file_mut()
            .write_all(bytes)
            .map_err(|e| Error::io(&self.destination, e))?;
        self.written += bytes.len() as u64;
        Ok(())
    }

    /// Flush and move the file into place. Returns the bytes written.
    pub fn commit(self) -> Result<u64> {
        let Self {
            destination,
            temp,
            written,
        } = self;
        temp.as_file()
            .sync_all()
            .map_err(|e| Error::io(&destination, e))?;
        temp.persist(&destination)
            .map_err(|e| Error::io(&destination, e.error))?;
        Ok(written)
    }
}
