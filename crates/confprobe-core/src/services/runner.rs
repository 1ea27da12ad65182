//! Sequential probe runner.
//!
//! Runs one probe module at a time against a shared [`ProbeContext`] and
//! appends each finished report to the sink inside its own scope. A module
//! that fails writes nothing.

use tracing::{error, info};

use crate::domain::ModuleReport;
use crate::error::ProbeError;
use crate::ports::{ConfSink, FatalReporter, SinkError};
use crate::probes::{ProbeContext, ProbeModule};

pub struct ProbeRunner<'a, S: ConfSink> {
    ctx: ProbeContext<'a>,
    sink: S,
}

impl<'a, S: ConfSink> ProbeRunner<'a, S> {
    pub const fn new(ctx: ProbeContext<'a>, sink: S) -> Self {
        Self { ctx, sink }
    }

    pub const fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Run one module and, if it succeeds, write its symbols.
    pub fn run_module(&mut self, module: &dyn ProbeModule) -> Result<ModuleReport, ProbeError> {
        info!(module = module.name(), "running probe module");
        let report = module.run(&self.ctx)?;
        self.emit(&report)?;
        info!(module = module.name(), symbols = report.len(), "probe module done");
        Ok(report)
    }

    /// Run modules in order, stopping at the first failure.
    pub fn run_all(
        &mut self,
        modules: &[&dyn ProbeModule],
    ) -> Result<Vec<ModuleReport>, ProbeError> {
        modules
            .iter()
            .map(|module| self.run_module(*module))
            .collect()
    }

    /// Run one module; any error terminates the process via `fatal`.
    pub fn run_or_die(
        &mut self,
        module: &dyn ProbeModule,
        fatal: &dyn FatalReporter,
    ) -> ModuleReport {
        match self.run_module(module) {
            Ok(report) => report,
            Err(err) => {
                error!(module = module.name(), error = %err, "probe module failed");
                fatal.fatal(&err.to_string())
            }
        }
    }

    fn emit(&mut self, report: &ModuleReport) -> Result<(), SinkError> {
        self.sink.start_module(report.module())?;
        for symbol in report.symbols() {
            self.sink.add_define(&symbol.name, symbol.expansion())?;
        }
        self.sink.end_module()
    }
}
