//! Fatal diagnostics port.

/// Terminates the whole run with a diagnostic.
///
/// Reserved for invariant violations; expected negative probe results never
/// reach this port.
pub trait FatalReporter {
    /// Report `message` and end the process. Never returns.
    fn fatal(&self, message: &str) -> !;
}
