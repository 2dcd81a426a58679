//! Error types.
//!
//! A failed syntax check is **not** an error: it is reported as
//! [`SyntaxVerdict::Invalid`](crate::syntax::SyntaxVerdict::Invalid). The
//! variants below cover the faults that the caller has to deal with.

use std::path::PathBuf;

/// Errors produced while loading configuration or assembling a report.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Config file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("Failed to read config {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The shell interpreter could not be started at all.
    #[error("Failed to run {} -n {}: {source}", shell.display(), script.display())]
    Spawn {
        shell: PathBuf,
        script: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
