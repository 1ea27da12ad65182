//! Directory-manipulation probe.
//!
//! Determines how the target creates and removes directories, which
//! directory-listing headers and `struct dirent` members exist, the path
//! separator, and whether the generic remove primitive also deletes empty
//! directories.
//!
//! Checks run in a fixed order and each step returns a plain value that the
//! later steps take as input. The probe writes nothing until every check has
//! finished; the finished [`DirManipFindings`] record is then turned into a
//! [`ModuleReport`].

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use super::{ProbeContext, ProbeModule, first_success};
use crate::domain::{ModuleReport, TestProgram};
use crate::error::ProbeError;

/// Longest command name that may be spliced into the `makedir` expansion.
pub const MAX_COMMAND_LEN: usize = 30;

/// Scratch directory used by the remove-zaps-dirs check.
pub const DEFAULT_SCRATCH_DIR: &str = "_confprobe_remove_me";

const MODULE_NAME: &str = "DirManip";

/// Function-like macro signature for the creation wrapper.
pub const MAKEDIR_SIGNATURE: &str = "makedir(_dir, _mode)";

const DIRENT_INCLUDES: &str = "#include <sys/types.h>\n#include <dirent.h>";

const ONE_ARG_MKDIR: TestProgram = TestProgram::new(
    "mkdir-one-arg",
    r#"#include <@HEADER@>
int main(int argc, char **argv) {
    if (argc != 2) { return 1; }
    if (@COMMAND@(argv[1]) != 0) { return 2; }
    return 0;
}
"#,
);

const POSIX_MKDIR: TestProgram = TestProgram::new(
    "mkdir-posix",
    r#"#include <@HEADER@>
int main(int argc, char **argv) {
    if (argc != 2) { return 1; }
    if (@COMMAND@(argv[1], 0777) != 0) { return 2; }
    return 0;
}
"#,
);

const RMDIR: TestProgram = TestProgram::new(
    "rmdir",
    r#"#include <@HEADER@>
int main(int argc, char **argv) {
    if (argc != 2) { return 1; }
    if (rmdir(argv[1]) != 0) { return 2; }
    return 0;
}
"#,
);

const CYGWIN_MARKER: TestProgram = TestProgram::new(
    "cygwin-marker",
    r#"#ifndef __CYGWIN__
  #error "Not Cygwin"
#endif
int main() { return 0; }
"#,
);

const RMDIR_HEADERS: [&str; 3] = ["unistd.h", "dirent.h", "direct.h"];

/// Number of arguments the bound creation command takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MkdirArity {
    One,
    Two,
}

impl MkdirArity {
    pub const fn count(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
        }
    }

    /// Value of `MAKEDIR_MODE_IGNORED` for this arity.
    pub const fn mode_ignored(self) -> &'static str {
        match self {
            Self::One => "1",
            Self::Two => "0",
        }
    }
}

/// Which template a creation candidate is compiled with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MkdirStyle {
    /// `command(path)`, always bound with one argument.
    OneArg,
    /// `command(path, mode)`, bound with two arguments except under
    /// `direct.h`, whose POSIX-named call ignores the mode.
    Posix,
}

/// One entry in the directory-creation fallback chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MkdirCandidate {
    pub command: String,
    pub header: String,
    pub style: MkdirStyle,
    /// Only tried when `windows.h` exists.
    pub windows_only: bool,
}

impl MkdirCandidate {
    pub fn new(
        command: impl Into<String>,
        header: impl Into<String>,
        style: MkdirStyle,
        windows_only: bool,
    ) -> Self {
        Self {
            command: command.into(),
            header: header.into(),
            style,
            windows_only,
        }
    }

    /// The standard chain: Windows `_mkdir`, then `mkdir` under `direct.h`
    /// (both Windows only), then POSIX `mkdir` under `sys/stat.h`.
    pub fn default_chain() -> Vec<Self> {
        vec![
            Self::new("_mkdir", "direct.h", MkdirStyle::OneArg, true),
            Self::new("mkdir", "direct.h", MkdirStyle::Posix, true),
            Self::new("mkdir", "sys/stat.h", MkdirStyle::Posix, false),
        ]
    }

    fn render(&self) -> String {
        let program = match self.style {
            MkdirStyle::OneArg => ONE_ARG_MKDIR,
            MkdirStyle::Posix => POSIX_MKDIR,
        };
        program.render(&[
            ("HEADER", self.header.as_str()),
            ("COMMAND", self.command.as_str()),
        ])
    }

    fn arity(&self) -> MkdirArity {
        match self.style {
            MkdirStyle::OneArg => MkdirArity::One,
            MkdirStyle::Posix if self.header == "direct.h" => MkdirArity::One,
            MkdirStyle::Posix => MkdirArity::Two,
        }
    }
}

/// The creation command discovered for this target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MkdirBinding {
    pub command: String,
    pub arity: MkdirArity,
}

impl MkdirBinding {
    /// Check the command fits the macro-assembly bound.
    pub fn validate(&self) -> Result<(), ProbeError> {
        let len = self.command.chars().count();
        if len > MAX_COMMAND_LEN {
            return Err(ProbeError::CommandTooLong {
                command: self.command.clone(),
                len,
                limit: MAX_COMMAND_LEN,
            });
        }
        Ok(())
    }

    /// Expansion text for `makedir(_dir, _mode)`.
    pub fn expansion(&self) -> String {
        match self.arity {
            MkdirArity::One => format!("{}(_dir)", self.command),
            MkdirArity::Two => format!("{}(_dir, _mode)", self.command),
        }
    }
}

/// Canonical path separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DirSep {
    Slash,
    Backslash,
}

impl DirSep {
    pub const fn as_char(self) -> char {
        match self {
            Self::Slash => '/',
            Self::Backslash => '\\',
        }
    }

    /// Quoted C string literal for `DIR_SEP`; the backslash is escaped.
    pub const fn literal(self) -> &'static str {
        match self {
            Self::Slash => r#""/""#,
            Self::Backslash => r#""\\""#,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct HeaderPresence {
    windows_h: bool,
    dirent_h: bool,
    direct_h: bool,
}

/// Everything the probe learned, in one immutable record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirManipFindings {
    pub has_windows_h: bool,
    pub has_dirent_h: bool,
    pub has_direct_h: bool,
    pub mkdir: Option<MkdirBinding>,
    /// Header under which `rmdir` compiled, if any.
    pub rmdir_header: Option<String>,
    pub has_d_namlen: bool,
    pub has_d_type: bool,
    pub dir_sep: DirSep,
    pub remove_zaps_dirs: bool,
}

impl DirManipFindings {
    pub const fn rmdir_available(&self) -> bool {
        self.rmdir_header.is_some()
    }

    /// Render the findings as symbols in emission order.
    pub fn to_report(&self) -> Result<ModuleReport, ProbeError> {
        let mut report = ModuleReport::new(MODULE_NAME);

        if self.has_dirent_h {
            report.push_flag("HAS_DIRENT_H");
        }
        if self.has_direct_h {
            report.push_flag("HAS_DIRECT_H");
        }
        if self.has_d_namlen {
            report.push_flag("HAS_DIRENT_D_NAMLEN");
        }
        if self.has_d_type {
            report.push_flag("HAS_DIRENT_D_TYPE");
        }

        if let Some(binding) = &self.mkdir {
            binding.validate()?;
            report.push_define(MAKEDIR_SIGNATURE, binding.expansion());
            report.push_define("MAKEDIR_MODE_IGNORED", binding.arity.mode_ignored());
        }

        report.push_define("DIR_SEP", self.dir_sep.literal());

        if self.remove_zaps_dirs {
            report.push_flag("REMOVE_ZAPS_DIRS");
        }

        Ok(report)
    }
}

/// Probe for directory-manipulation primitives.
#[derive(Debug, Clone)]
pub struct DirManipProbe {
    mkdir_chain: Vec<MkdirCandidate>,
    scratch_dir: PathBuf,
}

impl Default for DirManipProbe {
    fn default() -> Self {
        Self {
            mkdir_chain: MkdirCandidate::default_chain(),
            scratch_dir: PathBuf::from(DEFAULT_SCRATCH_DIR),
        }
    }
}

impl DirManipProbe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the directory-creation fallback chain.
    #[must_use]
    pub fn with_mkdir_chain(mut self, chain: Vec<MkdirCandidate>) -> Self {
        self.mkdir_chain = chain;
        self
    }

    /// Use a different scratch directory for the remove check.
    #[must_use]
    pub fn with_scratch_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.scratch_dir = path.into();
        self
    }

    pub fn scratch_dir(&self) -> &Path {
        &self.scratch_dir
    }

    /// Run every check and return the findings without building symbols.
    ///
    /// Fails only when the discovered creation command is longer than
    /// [`MAX_COMMAND_LEN`]; in that case no later check runs.
    pub fn inspect(&self, ctx: &ProbeContext<'_>) -> Result<DirManipFindings, ProbeError> {
        let headers = detect_headers(ctx);

        let mkdir = self.find_mkdir(ctx, headers);
        if let Some(binding) = &mkdir {
            binding.validate()?;
            info!(command = %binding.command, args = binding.arity.count(), "bound mkdir");
        }

        let rmdir_header = find_rmdir(ctx);
        let (has_d_namlen, has_d_type) = probe_dirent_members(ctx, headers);
        let dir_sep = detect_dir_sep(ctx, headers);
        let remove_zaps_dirs = check_remove_zaps_dirs(ctx, &self.scratch_dir);

        Ok(DirManipFindings {
            has_windows_h: headers.windows_h,
            has_dirent_h: headers.dirent_h,
            has_direct_h: headers.direct_h,
            mkdir,
            rmdir_header,
            has_d_namlen,
            has_d_type,
            dir_sep,
            remove_zaps_dirs,
        })
    }

    fn find_mkdir(&self, ctx: &ProbeContext<'_>, headers: HeaderPresence) -> Option<MkdirBinding> {
        let eligible = self
            .mkdir_chain
            .iter()
            .filter(|candidate| headers.windows_h || !candidate.windows_only);

        first_success("mkdir", eligible, |candidate: &MkdirCandidate| {
            let label = format!("{} <{}>", candidate.command, candidate.header);
            ctx.compile(&label, &candidate.render())
                .succeeded()
                .then(|| MkdirBinding {
                    command: candidate.command.clone(),
                    arity: candidate.arity(),
                })
        })
    }
}

impl ProbeModule for DirManipProbe {
    fn name(&self) -> &'static str {
        MODULE_NAME
    }

    fn run(&self, ctx: &ProbeContext<'_>) -> Result<ModuleReport, ProbeError> {
        self.inspect(ctx)?.to_report()
    }
}

fn detect_headers(ctx: &ProbeContext<'_>) -> HeaderPresence {
    HeaderPresence {
        windows_h: ctx.header_exists("windows.h"),
        dirent_h: ctx.header_exists("dirent.h"),
        direct_h: ctx.header_exists("direct.h"),
    }
}

fn find_rmdir(ctx: &ProbeContext<'_>) -> Option<String> {
    let found = first_success("rmdir", &RMDIR_HEADERS, |header: &&str| {
        let source = RMDIR.render(&[("HEADER", *header)]);
        ctx.compile(RMDIR.name(), &source)
            .succeeded()
            .then(|| (*header).to_string())
    });
    if found.is_none() {
        debug!("rmdir unavailable");
    }
    found
}

fn probe_dirent_members(ctx: &ProbeContext<'_>, headers: HeaderPresence) -> (bool, bool) {
    if !headers.dirent_h {
        return (false, false);
    }
    let d_namlen = ctx.struct_has_member("struct dirent", "d_namlen", DIRENT_INCLUDES);
    let d_type = ctx.struct_has_member("struct dirent", "d_type", DIRENT_INCLUDES);
    (d_namlen, d_type)
}

fn detect_dir_sep(ctx: &ProbeContext<'_>, headers: HeaderPresence) -> DirSep {
    if ctx
        .compile(CYGWIN_MARKER.name(), &CYGWIN_MARKER.source())
        .succeeded()
    {
        DirSep::Slash
    } else if headers.windows_h {
        DirSep::Backslash
    } else {
        DirSep::Slash
    }
}

/// Create a scratch directory, try the generic remove on it, then always
/// clean up with the dedicated directory removal.
fn check_remove_zaps_dirs(ctx: &ProbeContext<'_>, scratch: &Path) -> bool {
    ctx.fixture.create_dir(scratch);
    let zapped = ctx.fixture.remove(scratch);
    ctx.fixture.remove_dir(scratch);
    debug!(path = %scratch.display(), zapped, "remove on directory");
    zapped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{MockDirFixture, MockHeaderOracle, MockToolchainHarness};
    use mockall::Sequence;
    use mockall::predicate::eq;

    fn headers_only(present: &'static [&'static str]) -> MockHeaderOracle {
        let mut oracle = MockHeaderOracle::new();
        oracle
            .expect_header_exists()
            .returning(move |name| present.iter().any(|header| *header == name));
        oracle.expect_struct_has_member().returning(|_, _, _| false);
        oracle
    }

    fn quiet_fixture() -> MockDirFixture {
        let mut fixture = MockDirFixture::new();
        fixture.expect_create_dir().return_const(());
        fixture.expect_remove().return_const(false);
        fixture.expect_remove_dir().return_const(());
        fixture
    }

    /// Harness accepting exactly the sources for which `accept` is true.
    fn harness_where(accept: fn(&str) -> bool) -> MockToolchainHarness {
        let mut harness = MockToolchainHarness::new();
        harness.expect_compile_test().returning(move |src| accept(src));
        harness.expect_compile_run_capture().returning(|_| None);
        harness
    }

    #[test]
    fn test_default_chain_order() {
        let chain = MkdirCandidate::default_chain();
        let labels: Vec<_> = chain
            .iter()
            .map(|c| (c.command.as_str(), c.header.as_str(), c.windows_only))
            .collect();
        assert_eq!(
            labels,
            vec![
                ("_mkdir", "direct.h", true),
                ("mkdir", "direct.h", true),
                ("mkdir", "sys/stat.h", false),
            ]
        );
    }

    #[test]
    fn test_direct_h_posix_candidate_binds_one_arg() {
        let candidate = MkdirCandidate::new("mkdir", "direct.h", MkdirStyle::Posix, true);
        assert_eq!(candidate.arity(), MkdirArity::One);
        // The template still renders the two-argument call.
        assert!(candidate.render().contains("mkdir(argv[1], 0777)"));
    }

    #[test]
    fn test_windows_first_binds_underscore_mkdir() {
        let harness = harness_where(|src| src.contains("_mkdir(argv[1])"));
        let oracle = headers_only(&["windows.h"]);
        let fixture = quiet_fixture();
        let ctx = ProbeContext::new(&harness, &oracle, &fixture);

        let findings = DirManipProbe::new().inspect(&ctx).unwrap();
        assert_eq!(
            findings.mkdir,
            Some(MkdirBinding {
                command: "_mkdir".to_string(),
                arity: MkdirArity::One,
            })
        );
        assert_eq!(findings.dir_sep, DirSep::Backslash);
    }

    #[test]
    fn test_posix_without_windows_skips_windows_candidates() {
        let mut harness = MockToolchainHarness::new();
        harness.expect_compile_test().returning(|src| {
            assert!(!src.contains("direct.h"), "windows-only candidate tried");
            src.contains("<sys/stat.h>") || src.contains("<unistd.h>")
        });
        let oracle = headers_only(&["dirent.h"]);
        let fixture = quiet_fixture();
        let ctx = ProbeContext::new(&harness, &oracle, &fixture);

        let findings = DirManipProbe::new().inspect(&ctx).unwrap();
        let binding = findings.mkdir.unwrap();
        assert_eq!(binding.command, "mkdir");
        assert_eq!(binding.arity, MkdirArity::Two);
        assert_eq!(findings.rmdir_header.as_deref(), Some("unistd.h"));
        assert_eq!(findings.dir_sep, DirSep::Slash);
    }

    #[test]
    fn test_rmdir_chain_order() {
        let mut seq = Sequence::new();
        let mut harness = MockToolchainHarness::new();
        for header in ["unistd.h", "dirent.h"] {
            let needle = format!("#include <{header}>");
            let accept = header == "dirent.h";
            harness
                .expect_compile_test()
                .withf(move |src: &str| src.starts_with(&needle) && src.contains("rmdir("))
                .times(1)
                .in_sequence(&mut seq)
                .return_const(accept);
        }
        let oracle = headers_only(&[]);
        let fixture = quiet_fixture();
        let ctx = ProbeContext::new(&harness, &oracle, &fixture);

        assert_eq!(find_rmdir(&ctx).as_deref(), Some("dirent.h"));
    }

    #[test]
    fn test_dirent_members_require_dirent_h() {
        let mut oracle = MockHeaderOracle::new();
        oracle.expect_struct_has_member().never();
        let harness = harness_where(|_| false);
        let fixture = quiet_fixture();
        let ctx = ProbeContext::new(&harness, &oracle, &fixture);

        assert_eq!(
            probe_dirent_members(&ctx, HeaderPresence::default()),
            (false, false)
        );
    }

    #[test]
    fn test_dirent_members_use_dirent_preamble() {
        let mut oracle = MockHeaderOracle::new();
        oracle
            .expect_struct_has_member()
            .with(eq("struct dirent"), eq("d_namlen"), eq(DIRENT_INCLUDES))
            .times(1)
            .return_const(false);
        oracle
            .expect_struct_has_member()
            .with(eq("struct dirent"), eq("d_type"), eq(DIRENT_INCLUDES))
            .times(1)
            .return_const(true);
        let harness = harness_where(|_| false);
        let fixture = quiet_fixture();
        let ctx = ProbeContext::new(&harness, &oracle, &fixture);

        let presence = HeaderPresence {
            dirent_h: true,
            ..HeaderPresence::default()
        };
        assert_eq!(probe_dirent_members(&ctx, presence), (false, true));
    }

    #[test]
    fn test_cygwin_marker_wins_over_windows_h() {
        let harness = harness_where(|src| src.contains("__CYGWIN__"));
        let oracle = headers_only(&["windows.h"]);
        let fixture = quiet_fixture();
        let ctx = ProbeContext::new(&harness, &oracle, &fixture);

        let presence = HeaderPresence {
            windows_h: true,
            ..HeaderPresence::default()
        };
        assert_eq!(detect_dir_sep(&ctx, presence), DirSep::Slash);
    }

    #[test]
    fn test_dir_sep_literals() {
        assert_eq!(DirSep::Slash.literal(), "\"/\"");
        assert_eq!(DirSep::Backslash.literal(), "\"\\\\\"");
        assert_eq!(DirSep::Backslash.literal().len(), 4);
        assert_eq!(DirSep::Backslash.as_char(), '\\');
    }

    #[test]
    fn test_remove_check_always_cleans_up() {
        let mut seq = Sequence::new();
        let mut fixture = MockDirFixture::new();
        let scratch = PathBuf::from("scratch");
        fixture
            .expect_create_dir()
            .with(eq(scratch.clone()))
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        fixture
            .expect_remove()
            .times(1)
            .in_sequence(&mut seq)
            .return_const(true);
        fixture
            .expect_remove_dir()
            .with(eq(scratch.clone()))
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        let harness = harness_where(|_| false);
        let oracle = headers_only(&[]);
        let ctx = ProbeContext::new(&harness, &oracle, &fixture);

        assert!(check_remove_zaps_dirs(&ctx, &scratch));
    }

    #[test]
    fn test_command_length_bound() {
        let at_limit = MkdirBinding {
            command: "m".repeat(MAX_COMMAND_LEN),
            arity: MkdirArity::Two,
        };
        assert!(at_limit.validate().is_ok());

        let over = MkdirBinding {
            command: "m".repeat(MAX_COMMAND_LEN + 1),
            arity: MkdirArity::Two,
        };
        let err = over.validate().unwrap_err();
        assert!(matches!(
            err,
            ProbeError::CommandTooLong { len: 31, limit: 30, .. }
        ));
        assert!(err.to_string().contains(&over.command));
    }

    #[test]
    fn test_makedir_expansions() {
        let two = MkdirBinding {
            command: "mkdir".to_string(),
            arity: MkdirArity::Two,
        };
        assert_eq!(two.expansion(), "mkdir(_dir, _mode)");
        assert_eq!(two.arity.mode_ignored(), "0");

        let one = MkdirBinding {
            command: "_mkdir".to_string(),
            arity: MkdirArity::One,
        };
        assert_eq!(one.expansion(), "_mkdir(_dir)");
        assert_eq!(one.arity.mode_ignored(), "1");
    }
}
