//! Outcome of a single compile or compile-and-run trial.

/// What the toolchain harness reported for one rendered program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeResult {
    /// The program compiled (compile-only trial).
    CompileOk,
    /// The program did not compile (compile-only trial).
    CompileFailed,
    /// The program compiled, ran, and printed this text.
    RunOutput(String),
    /// Compilation, linking or execution failed.
    RunFailed,
}

impl ProbeResult {
    /// Build a compile-only result from the harness verdict.
    pub const fn from_compile(ok: bool) -> Self {
        if ok { Self::CompileOk } else { Self::CompileFailed }
    }

    /// Build a compile-and-run result from captured output.
    pub fn from_run(output: Option<String>) -> Self {
        output.map_or(Self::RunFailed, Self::RunOutput)
    }

    /// True for `CompileOk` and any `RunOutput`.
    pub const fn succeeded(&self) -> bool {
        matches!(self, Self::CompileOk | Self::RunOutput(_))
    }

    /// Captured standard output, if the program ran.
    pub fn output(&self) -> Option<&str> {
        match self {
            Self::RunOutput(text) => Some(text),
            _ => None,
        }
    }

    /// True when the program ran and its output begins with `sentinel`.
    ///
    /// Only the first `sentinel.len()` bytes are compared; trailing output is
    /// ignored.
    pub fn output_starts_with(&self, sentinel: &str) -> bool {
        self.output().is_some_and(|text| text.starts_with(sentinel))
    }
}
