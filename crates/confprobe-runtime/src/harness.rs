//! C compiler harness.
//!
//! Every trial writes `try_N.c` into a private scratch directory and invokes
//! the compiler driver there. Compile-only trials produce an object file;
//! run trials link an executable, run it, and capture its standard output.
//! A failing compiler or program is a negative answer, not an error.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::atomic::{AtomicUsize, Ordering};

use confprobe_core::ToolchainHarness;
use tempfile::TempDir;
use tracing::{debug, trace, warn};

use crate::config::HarnessConfig;
use crate::error::HarnessError;

enum WorkDir {
    Temp(TempDir),
    Kept(PathBuf),
}

impl WorkDir {
    fn path(&self) -> &Path {
        match self {
            Self::Temp(dir) => dir.path(),
            Self::Kept(path) => path,
        }
    }
}

struct Trial {
    source: PathBuf,
    object: PathBuf,
    binary: PathBuf,
}

/// [`ToolchainHarness`] backed by a Unix-style C compiler driver.
pub struct CcHarness {
    compiler: PathBuf,
    cflags: Vec<String>,
    work_dir: WorkDir,
    keep_artifacts: bool,
    trials: AtomicUsize,
}

impl CcHarness {
    /// Resolve the compiler and create the scratch directory.
    pub fn new(config: &HarnessConfig) -> Result<Self, HarnessError> {
        config.validate()?;
        let (program, cflags) = config.driver().ok_or(HarnessError::EmptyCompiler)?;

        let compiler = which::which(program).map_err(|e| HarnessError::CompilerNotFound {
            cc: program.to_string(),
            reason: e.to_string(),
        })?;

        let mut builder = tempfile::Builder::new();
        builder.prefix("confprobe-");
        let temp = match &config.work_dir {
            Some(parent) => {
                fs::create_dir_all(parent)?;
                builder.tempdir_in(parent)?
            }
            None => builder.tempdir()?,
        };
        let work_dir = if config.keep_artifacts {
            WorkDir::Kept(temp.keep())
        } else {
            WorkDir::Temp(temp)
        };

        debug!(
            compiler = %compiler.display(),
            work_dir = %work_dir.path().display(),
            "toolchain harness ready"
        );

        Ok(Self {
            compiler,
            cflags,
            work_dir,
            keep_artifacts: config.keep_artifacts,
            trials: AtomicUsize::new(0),
        })
    }

    pub fn compiler(&self) -> &Path {
        &self.compiler
    }

    /// Scratch directory holding rendered programs and build products.
    pub fn work_dir(&self) -> &Path {
        self.work_dir.path()
    }

    /// Number of programs handed to the compiler so far.
    pub fn trial_count(&self) -> usize {
        self.trials.load(Ordering::Relaxed)
    }

    fn next_trial(&self, source: &str) -> Option<Trial> {
        let n = self.trials.fetch_add(1, Ordering::Relaxed);
        let dir = self.work_dir();
        let trial = Trial {
            source: dir.join(format!("try_{n}.c")),
            object: dir.join(format!("try_{n}.o")),
            binary: dir.join(format!("try_{n}{}", std::env::consts::EXE_SUFFIX)),
        };
        match fs::write(&trial.source, source) {
            Ok(()) => Some(trial),
            Err(e) => {
                warn!(path = %trial.source.display(), error = %e, "failed to write test program");
                None
            }
        }
    }

    fn invoke_cc<I, S>(&self, args: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let output = Command::new(&self.compiler)
            .args(&self.cflags)
            .args(args)
            .current_dir(self.work_dir())
            .output();

        match output {
            Ok(output) if output.status.success() => true,
            Ok(output) => {
                trace!(
                    status = ?output.status.code(),
                    stderr = %String::from_utf8_lossy(&output.stderr),
                    "compiler rejected program"
                );
                false
            }
            Err(e) => {
                warn!(compiler = %self.compiler.display(), error = %e, "failed to spawn compiler");
                false
            }
        }
    }

    fn cleanup(&self, trial: &Trial) {
        if self.keep_artifacts {
            return;
        }
        for path in [&trial.source, &trial.object, &trial.binary] {
            let _ = fs::remove_file(path);
        }
    }
}

impl ToolchainHarness for CcHarness {
    fn compile_test(&self, source: &str) -> bool {
        let Some(trial) = self.next_trial(source) else {
            return false;
        };
        let ok = self.invoke_cc([
            OsStr::new("-c"),
            trial.source.as_os_str(),
            OsStr::new("-o"),
            trial.object.as_os_str(),
        ]);
        self.cleanup(&trial);
        ok
    }

    fn compile_run_capture(&self, source: &str) -> Option<String> {
        let trial = self.next_trial(source)?;
        let built = self.invoke_cc([
            trial.source.as_os_str(),
            OsStr::new("-o"),
            trial.binary.as_os_str(),
        ]);

        let output = if built {
            match Command::new(&trial.binary)
                .current_dir(self.work_dir())
                .output()
            {
                Ok(out) if out.status.success() => {
                    Some(String::from_utf8_lossy(&out.stdout).into_owned())
                }
                Ok(out) => {
                    trace!(status = ?out.status.code(), "test program exited with failure");
                    None
                }
                Err(e) => {
                    warn!(binary = %trial.binary.display(), error = %e, "failed to run test program");
                    None
                }
            }
        } else {
            None
        };

        self.cleanup(&trial);
        output
    }
}
