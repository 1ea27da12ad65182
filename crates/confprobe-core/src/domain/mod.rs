//! Core domain types for confprobe.
//!
//! These are pure data types with no infrastructure dependencies. Probe
//! modules build them, ports carry them, sinks store them.

mod program;
mod result;
mod symbol;

pub use program::TestProgram;
pub use result::ProbeResult;
pub use symbol::{ConfSymbol, ModuleReport};
