//! Secret resolution.
//!
//! API keys and tokens are read from the process environment and held as
//! [`secrecy::SecretString`] so they never show up in `Debug` output or logs.

pub mod env;

pub use env::EnvSecrets;
