use std::path::{Component, Path, PathBuf};

use crate::content::{Encoding, FetchedContent};

/// Errors that can occur while writing a downloaded file.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("refusing to write outside the destination: {0}")]
    UnsafePath(String),
}

/// Persists fetched files under a destination root.
#[derive(Debug, Clone)]
pub struct DownloadWriter {
    root: PathBuf,
}

impl DownloadWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Where `relative` lands under the root.
    pub fn target_path(&self, relative: &str) -> Result<PathBuf, WriteError> {
        let relative_path = Path::new(relative);
        let safe = relative_path
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        if relative.is_empty() || !safe {
            return Err(WriteError::UnsafePath(relative.to_owned()));
        }
        Ok(self.root.join(relative_path))
    }

    /// Write `item` to `root/item.path`, creating directories as needed and
    /// overwriting any existing file. Returns the path written.
    pub fn write(&self, item: &FetchedContent) -> Result<PathBuf, WriteError> {
        let path = self.target_path(&item.path)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        match (item.encoding, item.text()) {
            (Encoding::Text, Some(text)) => std::fs::write(&path, text)?,
            _ => std::fs::write(&path, &item.bytes)?,
        }
        Ok(path)
    }
}
