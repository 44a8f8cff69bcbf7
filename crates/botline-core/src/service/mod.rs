//! Service-level ports shared by the handlers.

pub mod fs;

pub use fs::FileSystem;
