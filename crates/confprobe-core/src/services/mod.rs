//! Services that sequence probe modules into a configuration sink.

mod memory_sink;
mod runner;

pub use memory_sink::MemorySink;
pub use runner::ProbeRunner;
