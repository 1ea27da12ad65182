//! Wiring of the local adapters into a probe context.

use std::sync::Arc;

use confprobe_core::{ProbeContext, ToolchainHarness};

use crate::config::HarnessConfig;
use crate::error::HarnessError;
use crate::fixture::OsDirFixture;
use crate::harness::CcHarness;
use crate::headers::HeaderChecker;

/// Harness, header oracle and directory fixture for the build machine.
///
/// The fixture shares the harness scratch directory so that probe
/// side effects never touch the caller's working directory.
pub struct LocalToolchain {
    harness: Arc<CcHarness>,
    headers: HeaderChecker,
    fixture: OsDirFixture,
}

impl LocalToolchain {
    pub fn new(config: &HarnessConfig) -> Result<Self, HarnessError> {
        let harness = Arc::new(CcHarness::new(config)?);
        let fixture = OsDirFixture::new(harness.work_dir());
        let headers = HeaderChecker::new(Arc::clone(&harness) as Arc<dyn ToolchainHarness>);
        Ok(Self {
            harness,
            headers,
            fixture,
        })
    }

    /// Convenience for [`HarnessConfig::from_env`].
    pub fn from_env() -> Result<Self, HarnessError> {
        Self::new(&HarnessConfig::from_env())
    }

    pub fn harness(&self) -> &CcHarness {
        &self.harness
    }

    pub fn headers(&self) -> &HeaderChecker {
        &self.headers
    }

    pub fn context(&self) -> ProbeContext<'_> {
        ProbeContext::new(self.harness.as_ref(), &self.headers, &self.fixture)
    }
}
