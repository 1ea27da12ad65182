//! Build-time feature probing.
//!
//! `confprobe-core` holds the probe-and-record protocol: probe modules render
//! small C programs, ask a [`ToolchainHarness`] to compile or run them,
//! interpret the answers, and produce normalized configuration symbols.
//! Concrete harnesses and fixtures live in adapter crates.

#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod error;
pub mod ports;
pub mod probes;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{ConfSymbol, ModuleReport, ProbeResult, TestProgram};
pub use error::ProbeError;
pub use ports::{ConfSink, DirFixture, FatalReporter, HeaderOracle, SinkError, ToolchainHarness};
pub use probes::{
    DirManipFindings, DirManipProbe, DirSep, FuncMacroFindings, FuncMacroProbe,
    FuncMacroSpelling, MAX_COMMAND_LEN, MkdirArity, MkdirBinding, MkdirCandidate, MkdirStyle,
    ProbeContext, ProbeModule,
};
pub use services::{MemorySink, ProbeRunner};
