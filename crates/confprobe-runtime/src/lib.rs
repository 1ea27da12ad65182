//! Runtime adapters for confprobe.
//!
//! Implements the core ports against the build machine: a C compiler
//! driven through `std::process::Command`, a header oracle layered on top
//! of it, a filesystem fixture, and a fatal reporter that exits the
//! process.

#![deny(unused_crate_dependencies)]

pub mod config;
pub mod error;
pub mod fatal;
pub mod fixture;
pub mod harness;
pub mod headers;
pub mod toolchain;

pub use config::HarnessConfig;
pub use error::HarnessError;
pub use fatal::ExitFatal;
pub use fixture::OsDirFixture;
pub use harness::CcHarness;
pub use headers::HeaderChecker;
pub use toolchain::LocalToolchain;

#[cfg(test)]
use tracing_subscriber as _;
