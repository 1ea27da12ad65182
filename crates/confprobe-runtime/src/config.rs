//! Harness configuration.
//!
//! Sources, lowest precedence first: built-in defaults, a JSON file, then
//! environment variables. Environment lookup goes through a function so
//! tests never touch the real process environment.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::HarnessError;

/// Default compiler driver.
pub const DEFAULT_CC: &str = "cc";

/// Compiler driver override.
pub const CC_ENV: &str = "CC";
/// Extra flags, whitespace separated.
pub const CFLAGS_ENV: &str = "CFLAGS";
/// Parent directory for the per-run scratch directory.
pub const WORK_DIR_ENV: &str = "CONFPROBE_WORK_DIR";
/// Keep rendered programs and binaries after the run (`1`/`true`).
pub const KEEP_ARTIFACTS_ENV: &str = "CONFPROBE_KEEP_ARTIFACTS";

/// How the harness invokes the target toolchain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Compiler driver, looked up on `PATH` unless it is a path.
    pub cc: String,
    /// Flags passed before every source file.
    pub cflags: Vec<String>,
    /// Parent for the scratch directory; system temp dir when `None`.
    pub work_dir: Option<PathBuf>,
    /// Leave the scratch directory in place for inspection.
    pub keep_artifacts: bool,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            cc: DEFAULT_CC.to_string(),
            cflags: Vec::new(),
            work_dir: None,
            keep_artifacts: false,
        }
    }
}

impl HarnessConfig {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Self {
        Self::default().with_env_lookup(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`; unset or blank values are ignored.
    #[must_use]
    pub fn with_env_lookup(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let mut cc_flags = Vec::new();
        if let Some(cc) = get(CC_ENV) {
            let mut words = cc.split_whitespace().map(str::to_string);
            if let Some(program) = words.next() {
                self.cc = program;
            }
            cc_flags.extend(words);
        }
        if let Some(flags) = get(CFLAGS_ENV) {
            self.cflags = flags.split_whitespace().map(str::to_string).collect();
        }
        if !cc_flags.is_empty() {
            cc_flags.append(&mut self.cflags);
            self.cflags = cc_flags;
        }
        if let Some(dir) = get(WORK_DIR_ENV) {
            self.work_dir = Some(PathBuf::from(dir));
        }
        if let Some(keep) = get(KEEP_ARTIFACTS_ENV) {
            self.keep_artifacts = matches!(keep.trim(), "1" | "true" | "yes");
        }
        self
    }

    /// Load configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).context("Failed to read harness config")?;
        let config = serde_json::from_str(&json).context("Failed to parse harness config")?;
        Ok(config)
    }

    /// Save configuration as pretty JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, json).context("Failed to write harness config")?;
        Ok(())
    }

    /// Split `cc` into the program to resolve and the words that follow it.
    ///
    /// Words after the program come first in the returned flags, ahead of
    /// `cflags`, so `"ccache cc"` or `"gcc -m32"` work as compiler values.
    pub fn driver(&self) -> Option<(&str, Vec<String>)> {
        let mut words = self.cc.split_whitespace();
        let program = words.next()?;
        let flags = words
            .map(str::to_string)
            .chain(self.cflags.iter().cloned())
            .collect();
        Some((program, flags))
    }

    pub fn validate(&self) -> Result<(), HarnessError> {
        if self.cc.trim().is_empty() {
            return Err(HarnessError::EmptyCompiler);
        }
        if let Some(dir) = &self.work_dir
            && dir.exists()
            && !dir.is_dir()
        {
            return Err(HarnessError::NotADirectory(dir.clone()));
        }
        Ok(())
    }
}
