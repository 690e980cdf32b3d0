//! Error types for the runner filter

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for filter operations
pub type Result<T> = std::result::Result<T, FilterError>;

/// Errors that can occur while resolving machines from runner status
#[derive(Debug, Error)]
pub enum FilterError {
    /// A required invocation argument was not supplied
    #[error("Missing required argument: {0}")]
    MissingArgument(&'static str),

    /// The runners document is not valid JSON or has the wrong shape
    #[error("Invalid runners document: {0}")]
    InvalidDocument(#[from] serde_json::Error),

    /// The runners document lacks a required top-level key
    #[error("Runners document is missing field `{field}`")]
    MissingField {
        /// Name of the missing key
        field: &'static str,
    },

    /// A runner entry lacks a field needed to evaluate it
    #[error("Runner at index {index} is missing field `{field}`")]
    MissingRunnerField {
        /// Position of the runner in the `runners` array
        index: usize,
        /// Name of the missing key
        field: &'static str,
    },

    /// The machine table file could not be read
    #[error("Failed to read machine table {}: {source}", .path.display())]
    MachineTableIo {
        /// Configured table location
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// The machine table content is malformed
    #[error("Invalid machine table: {0}")]
    InvalidMachineTable(String),
}
