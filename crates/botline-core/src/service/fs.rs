//! FileSystem trait for abstracting file I/O.
//!
//! Defined in botline-core so the conversation handler can look up
//! attachments without depending on any specific filesystem implementation.
//! The `LocalFileSystem` adapter lives in botline-infra.

use std::path::Path;

/// Abstraction over the filesystem operations used for attachments.
pub trait FileSystem: Send + Sync {
    /// Check whether a path exists.
    fn exists(&self, path: &Path) -> impl std::future::Future<Output = bool> + Send;

    /// Read a file's content as raw bytes.
    fn read_bytes(
        &self,
        path: &Path,
    ) -> impl std::future::Future<Output = Result<Vec<u8>, std::io::Error>> + Send;
}
