//! Filesystem adapter for botline.
//!
//! Implements the `FileSystem` trait from `botline-core` for real filesystem I/O.

use std::path::{Path, PathBuf};

use botline_core::service::fs::FileSystem;

/// Local filesystem implementation of the `FileSystem` trait.
///
/// All operations go through `tokio::fs` for async I/O. Relative paths are
/// resolved against `root` when one is set.
#[derive(Debug, Clone, Default)]
pub struct LocalFileSystem {
    root: Option<PathBuf>,
}

impl LocalFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative paths against `root` (typically the config file's directory).
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        match &self.root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl FileSystem for LocalFileSystem {
    async fn exists(&self, path: &Path) -> bool {
        tokio::fs::try_exists(self.resolve(path))
            .await
            .unwrap_or(false)
    }

    async fn read_bytes(&self, path: &Path) -> Result<Vec<u8>, std::io::Error> {
        tokio::fs::read(self.resolve(path)).await
    }
}
