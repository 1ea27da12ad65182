//! Process-terminating fatal reporter.

use confprobe_core::FatalReporter;
use tracing::error;

/// Logs the diagnostic, prints it to stderr and exits with status 1.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExitFatal;

impl FatalReporter for ExitFatal {
    fn fatal(&self, message: &str) -> ! {
        error!("{message}");
        eprintln!("{message}");
        std::process::exit(1)
    }
}
