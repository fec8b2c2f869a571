//! Fixed-name data file the tool searches.

use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;

use crate::ExecutorError;

/// The single on-disk buffer shared by every iteration.
///
/// Each [`write`](Self::write) truncates and replaces the previous contents.
/// Only one case is live at a time, so no locking is needed.
#[derive(Debug, Clone)]
pub struct DataFile {
    path: PathBuf,
    name: String,
}

impl DataFile {
    /// Wrap `path`. The path string is what the tool echoes back in its
    /// output, so it must be valid UTF-8.
    ///
    /// # Errors
    /// Returns [`ExecutorError::NonUtf8Path`] if `path` is not UTF-8.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, ExecutorError> {
        let path = path.into();
        let name = path
            .to_str()
            .ok_or_else(|| ExecutorError::NonUtf8Path { path: path.clone() })?
            .to_owned();
        Ok(Self { path, name })
    }

    /// Filesystem path of the data file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The path exactly as passed to, and printed by, the tool.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Replace the file contents with `data`.
    ///
    /// Returns only after the bytes are flushed, synced to disk, and the
    /// handle is closed, so a subsequently spawned process sees the whole
    /// buffer.
    ///
    /// # Errors
    /// Returns [`ExecutorError::Io`] if any step fails.
    pub async fn write(&self, data: &[u8]) -> Result<(), ExecutorError> {
        let mut file = tokio::fs::File::create(&self.path).await?;
        file.write_all(data).await?;
        file.flush().await?;
        file.sync_all().await?;
        drop(file);
        Ok(())
    }
}
