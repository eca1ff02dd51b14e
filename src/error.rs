//! Knowledge Hooks error types
//!
//! Every component returns [`Result`]. Nothing here ever reaches the host
//! session: the hook runner absorbs errors at the outer boundary.

use thiserror::Error;

/// Knowledge Hooks error type
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pattern table failed to compile
    #[error("Pattern error: {0}")]
    Pattern(String),

    /// Inbound event payload could not be read
    #[error("Payload error: {0}")]
    Payload(String),

    /// Memory store marker file is absent
    #[error("Memory store not initialized: {0}")]
    Uninitialized(String),

    /// External store executable could not be resolved
    #[error("Executable not found: {0}")]
    ExecutableNotFound(String),

    /// External store exited with a non-zero status
    #[error("Request rejected by memory store (exit code {code:?})")]
    Rejected { code: Option<i32> },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Whether this error is an expected short-circuit rather than a fault.
    ///
    /// A project without a memory store, or a machine without the store
    /// executable, is the normal case for most sessions.
    pub fn is_advisory_skip(&self) -> bool {
        matches!(self, Error::Uninitialized(_) | Error::ExecutableNotFound(_))
    }
}

/// Result type alias for Knowledge Hooks operations
pub type Result<T> = std::result::Result<T, Error>;
