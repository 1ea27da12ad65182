//! Probe modules and the plumbing they share.
//!
//! Every probe follows the same cycle: render a test program, hand it to the
//! toolchain harness, interpret the result under a check-specific policy,
//! and record normalized symbols in a [`ModuleReport`].

mod chain;
pub mod dir_manip;
pub mod func_macro;

pub use chain::first_success;
pub use dir_manip::{
    DirManipFindings, DirManipProbe, DirSep, MAX_COMMAND_LEN, MkdirArity, MkdirBinding,
    MkdirCandidate, MkdirStyle,
};
pub use func_macro::{FuncMacroFindings, FuncMacroProbe, FuncMacroSpelling, INLINE_SPELLINGS};

use tracing::debug;

use crate::domain::{ModuleReport, ProbeResult};
use crate::error::ProbeError;
use crate::ports::{DirFixture, HeaderOracle, ToolchainHarness};

/// Borrowed collaborators handed to a probe for one run.
#[derive(Clone, Copy)]
pub struct ProbeContext<'a> {
    pub harness: &'a dyn ToolchainHarness,
    pub headers: &'a dyn HeaderOracle,
    pub fixture: &'a dyn DirFixture,
}

impl<'a> ProbeContext<'a> {
    pub fn new(
        harness: &'a dyn ToolchainHarness,
        headers: &'a dyn HeaderOracle,
        fixture: &'a dyn DirFixture,
    ) -> Self {
        Self {
            harness,
            headers,
            fixture,
        }
    }

    /// Compile-only trial.
    pub fn compile(&self, label: &str, source: &str) -> ProbeResult {
        let result = ProbeResult::from_compile(self.harness.compile_test(source));
        debug!(trial = label, ?result, "compile trial");
        result
    }

    /// Compile, run and capture stdout.
    pub fn run(&self, label: &str, source: &str) -> ProbeResult {
        let result = ProbeResult::from_run(self.harness.compile_run_capture(source));
        debug!(trial = label, ?result, "run trial");
        result
    }

    pub fn header_exists(&self, name: &str) -> bool {
        let exists = self.headers.header_exists(name);
        debug!(header = name, exists, "header check");
        exists
    }

    pub fn struct_has_member(&self, type_name: &str, member: &str, includes: &str) -> bool {
        let present = self.headers.struct_has_member(type_name, member, includes);
        debug!(type_name, member, present, "member check");
        present
    }
}

/// A self-contained feature-detection procedure scoped under one module name.
pub trait ProbeModule {
    /// Module scope name written to the sink.
    fn name(&self) -> &'static str;

    /// Run every check and return the symbols to emit.
    ///
    /// Nothing is written anywhere by this call; the runner appends the
    /// returned report to the sink only when the whole module succeeded.
    fn run(&self, ctx: &ProbeContext<'_>) -> Result<ModuleReport, ProbeError>;
}
