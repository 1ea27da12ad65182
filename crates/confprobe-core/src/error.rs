//! Probe error types.
//!
//! Expected negative results (a header that does not exist, a keyword the
//! compiler rejects) are not errors; they are ordinary findings. Only
//! invariant violations and sink misuse end up here.

use thiserror::Error;

use crate::ports::SinkError;

/// Errors that abort a probe run.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// A discovered command name is too long to splice into macro text.
    #[error("Command too long: '{command}' ({len} chars, limit {limit})")]
    CommandTooLong {
        command: String,
        len: usize,
        limit: usize,
    },

    /// The configuration sink rejected a scope operation.
    #[error("Configuration sink error: {0}")]
    Sink(#[from] SinkError),
}

