//! Configuration symbols and per-module reports.

use serde::{Deserialize, Serialize};

/// A single configuration symbol.
///
/// A symbol without expansion text is a presence flag. The name may itself
/// be a function-like macro signature such as `makedir(_dir, _mode)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfSymbol {
    /// Symbol name, matched case-sensitively.
    pub name: String,
    /// Expansion text, `None` for a bare flag.
    pub expansion: Option<String>,
}

impl ConfSymbol {
    /// A presence flag with no expansion text.
    pub fn flag(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            expansion: None,
        }
    }

    /// A symbol carrying expansion text.
    pub fn define(name: impl Into<String>, expansion: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            expansion: Some(expansion.into()),
        }
    }

    pub const fn is_flag(&self) -> bool {
        self.expansion.is_none()
    }

    /// True when the name carries a parameter list.
    pub fn is_function_like(&self) -> bool {
        self.name.contains('(')
    }

    pub fn expansion(&self) -> Option<&str> {
        self.expansion.as_deref()
    }
}

/// Ordered symbols produced by one run of one probe module.
///
/// Order is kept exactly as the probe pushed it so that identical probe
/// outcomes always produce identical reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleReport {
    module: String,
    symbols: Vec<ConfSymbol>,
}

impl ModuleReport {
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            symbols: Vec::new(),
        }
    }

    /// Name of the module scope these symbols belong to.
    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn symbols(&self) -> &[ConfSymbol] {
        &self.symbols
    }

    pub fn push(&mut self, symbol: ConfSymbol) {
        self.symbols.push(symbol);
    }

    pub fn push_flag(&mut self, name: impl Into<String>) {
        self.push(ConfSymbol::flag(name));
    }

    pub fn push_define(&mut self, name: impl Into<String>, expansion: impl Into<String>) {
        self.push(ConfSymbol::define(name, expansion));
    }

    /// Look up a symbol by exact name.
    pub fn get(&self, name: &str) -> Option<&ConfSymbol> {
        self.symbols.iter().find(|symbol| symbol.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Names in emission order.
    pub fn names(&self) -> Vec<&str> {
        self.symbols.iter().map(|symbol| symbol.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
