//! Toolchain harness port.
//!
//! The harness owns every detail of invoking the compiler: command lines,
//! temporary files, executing the result. From a probe's point of view it is
//! a stateless oracle over source text.

/// Port for compiling and running synthesized test programs.
///
/// # Example
///
/// ```ignore
/// use confprobe_core::ports::ToolchainHarness;
///
/// fn has_stdio(harness: &dyn ToolchainHarness) -> bool {
///     harness.compile_test("#include <stdio.h>\nint main(void) { return 0; }\n")
/// }
/// ```
#[cfg_attr(test, mockall::automock)]
pub trait ToolchainHarness: Send + Sync {
    /// True iff `source` compiles without error.
    fn compile_test(&self, source: &str) -> bool;

    /// Compile, link and execute `source`, returning its standard output.
    ///
    /// Returns `None` when any stage fails.
    fn compile_run_capture(&self, source: &str) -> Option<String>;
}
