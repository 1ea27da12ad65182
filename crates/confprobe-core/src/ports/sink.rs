//! Configuration sink port.
//!
//! The sink accumulates symbols grouped by module scope. Exactly one scope is
//! open at a time and a closed scope is never reopened.

use thiserror::Error;

/// Errors raised when the scope protocol is misused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SinkError {
    /// `start_module` was called while another module was still open.
    #[error("Module {open} is still open; cannot start {requested}")]
    ScopeAlreadyOpen { open: String, requested: String },

    /// `add_define` or `end_module` was called with no open module.
    #[error("No module scope is open")]
    NoOpenScope,

    /// The module was already written and closed.
    #[error("Module {0} was already closed and cannot be reopened")]
    ModuleClosed(String),
}

/// Port receiving configuration symbols.
pub trait ConfSink {
    /// Open a named scope.
    fn start_module(&mut self, name: &str) -> Result<(), SinkError>;

    /// Append a symbol to the open scope. `None` writes a bare flag.
    fn add_define(&mut self, name: &str, expansion: Option<&str>) -> Result<(), SinkError>;

    /// Close the open scope.
    fn end_module(&mut self) -> Result<(), SinkError>;
}
