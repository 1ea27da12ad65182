//! In-memory configuration sink.

use serde::Serialize;

use crate::domain::{ConfSymbol, ModuleReport};
use crate::ports::{ConfSink, SinkError};

/// Accumulates module scopes in memory, in the order they were closed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MemorySink {
    modules: Vec<ModuleReport>,
    #[serde(skip)]
    open: Option<ModuleReport>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Closed modules in closing order.
    pub fn modules(&self) -> &[ModuleReport] {
        &self.modules
    }

    pub fn module(&self, name: &str) -> Option<&ModuleReport> {
        self.modules.iter().find(|report| report.module() == name)
    }

    /// Name of the currently open module, if any.
    pub fn open_module(&self) -> Option<&str> {
        self.open.as_ref().map(ModuleReport::module)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.modules)
    }
}

impl ConfSink for MemorySink {
    fn start_module(&mut self, name: &str) -> Result<(), SinkError> {
        if let Some(open) = &self.open {
            return Err(SinkError::ScopeAlreadyOpen {
                open: open.module().to_string(),
                requested: name.to_string(),
            });
        }
        if self.module(name).is_some() {
            return Err(SinkError::ModuleClosed(name.to_string()));
        }
        self.open = Some(ModuleReport::new(name));
        Ok(())
    }

    fn add_define(&mut self, name: &str, expansion: Option<&str>) -> Result<(), SinkError> {
        let open = self.open.as_mut().ok_or(SinkError::NoOpenScope)?;
        open.push(ConfSymbol {
            name: name.to_string(),
            expansion: expansion.map(str::to_string),
        });
        Ok(())
    }

    fn end_module(&mut self) -> Result<(), SinkError> {
        let closed = self.open.take().ok_or(SinkError::NoOpenScope)?;
        self.modules.push(closed);
        Ok(())
    }
}
