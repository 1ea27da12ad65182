//! Error types for the runtime adapters.
//!
//! Only setup can fail loudly. Once a harness exists, a program that does
//! not compile or run is an ordinary negative answer.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while setting up a toolchain harness.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// No compiler command was configured.
    #[error("No C compiler configured")]
    EmptyCompiler,

    /// The configured compiler could not be found.
    #[error("C compiler '{cc}' not found: {reason}")]
    CompilerNotFound { cc: String, reason: String },

    /// The configured work directory is unusable.
    #[error("{0} exists but is not a directory")]
    NotADirectory(PathBuf),

    /// Creating the scratch directory failed.
    #[error("Failed to create work directory: {0}")]
    WorkDir(#[from] std::io::Error),
}
