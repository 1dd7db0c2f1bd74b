//! Scratch files for round-tripping a document through an external editor.
//!
//! A [`ScratchFile`] lives for exactly one editor invocation. Dropping it
//! removes the file, so `?` early returns never leave it behind; calling
//! [`ScratchFile::release`] does the same but reports a failed removal.

use crate::error::{FlagshError, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::{Builder, TempPath};

pub const SCRATCH_PREFIX: &str = "flagsh-";
const SCRATCH_SUFFIX: &str = ".json";

#[derive(Debug)]
pub struct ScratchFile {
    path: TempPath,
}

impl ScratchFile {
    /// Creates a private scratch file in the system temp directory seeded with `content`.
    pub fn create(content: &[u8]) -> Result<Self> {
        Self::create_in(std::env::temp_dir(), content)
    }

    pub fn create_in<P: AsRef<Path>>(dir: P, content: &[u8]) -> Result<Self> {
        // tempfile creates the file with owner-only permissions on unix.
        let mut file = Builder::new()
            .prefix(SCRATCH_PREFIX)
            .suffix(SCRATCH_SUFFIX)
            .tempfile_in(dir)?;
        file.write_all(content)?;
        file.flush()?;

        Ok(Self {
            path: file.into_temp_path(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads back whatever the editor left in the file.
    pub fn load(&self) -> Result<Vec<u8>> {
        fs::read(&self.path).map_err(FlagshError::Read)
    }

    pub fn release(self) -> Result<()> {
        let path: PathBuf = self.path.to_path_buf();
        self.path
            .close()
            .map_err(|source| FlagshError::Cleanup { path, source })
    }
}
