//! Port definitions (trait abstractions) for external collaborators.
//!
//! Ports define the interfaces that probe modules expect from the toolchain
//! and the host. They contain no implementation details and use only domain
//! types.
//!
//! # Design Rules
//!
//! - No compiler command lines or temp-file handling in any signature
//! - Negative answers are values (`false`, `None`), never errors
//! - Only the sink can refuse an operation, and only for scope misuse

pub mod fatal;
pub mod fixture;
pub mod headers;
pub mod sink;
pub mod toolchain;

pub use fatal::FatalReporter;
pub use fixture::DirFixture;
pub use headers::HeaderOracle;
pub use sink::{ConfSink, SinkError};
pub use toolchain::ToolchainHarness;

#[cfg(test)]
pub use fixture::MockDirFixture;
#[cfg(test)]
pub use headers::MockHeaderOracle;
#[cfg(test)]
pub use toolchain::MockToolchainHarness;
