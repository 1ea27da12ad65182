//! Function-name macro and inline keyword probe.
//!
//! Checks which current-function-name token the compiler understands
//! (`__func__`, `__FUNCTION__`, or both) and which inline keyword spelling
//! it accepts, then normalizes both into `FUNC_MACRO` and `INLINE`.

use serde::Serialize;
use tracing::info;

use super::{ProbeContext, ProbeModule, first_success};
use crate::domain::{ModuleReport, TestProgram};
use crate::error::ProbeError;

const MODULE_NAME: &str = "FuncMacro";

/// Inline spellings in trial order.
pub const INLINE_SPELLINGS: [&str; 3] = ["__inline", "__inline__", "inline"];

/// Text the function-name programs must print, from inside `main`.
const FUNC_SENTINEL: &str = "main";

const FUNC_NAME: TestProgram = TestProgram::new(
    "func-name",
    r#"#include <stdio.h>
int main() {
    printf("%s", @TOKEN@);
    return 0;
}
"#,
);

const INLINE_FUNC: TestProgram = TestProgram::new(
    "inline-keyword",
    r#"#include <stdio.h>
static @KEYWORD@ int foo() { return 1; }
int main() {
    printf("%d", foo());
    return 0;
}
"#,
);

/// The two current-function-name tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FuncMacroSpelling {
    /// C99 `__func__`.
    Iso,
    /// GNU `__FUNCTION__`.
    Gnu,
}

impl FuncMacroSpelling {
    pub const fn token(self) -> &'static str {
        match self {
            Self::Iso => "__func__",
            Self::Gnu => "__FUNCTION__",
        }
    }
}

/// Results of the function-macro checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FuncMacroFindings {
    pub iso: bool,
    pub gnuc: bool,
    /// First inline spelling whose program ran.
    pub inline_keyword: Option<&'static str>,
}

impl FuncMacroFindings {
    /// Spelling bound to `FUNC_MACRO`; ISO wins when both work.
    pub const fn preferred(&self) -> Option<FuncMacroSpelling> {
        if self.iso {
            Some(FuncMacroSpelling::Iso)
        } else if self.gnuc {
            Some(FuncMacroSpelling::Gnu)
        } else {
            None
        }
    }

    pub fn to_report(&self) -> ModuleReport {
        let mut report = ModuleReport::new(MODULE_NAME);

        if let Some(spelling) = self.preferred() {
            report.push_flag("HAS_FUNC_MACRO");
            report.push_define("FUNC_MACRO", spelling.token());
        }
        if self.iso {
            report.push_flag("HAS_ISO_FUNC_MACRO");
        }
        if self.gnuc {
            report.push_flag("HAS_GNUC_FUNC_MACRO");
        }

        // INLINE is always written; without a usable keyword it expands to
        // nothing.
        match self.inline_keyword {
            Some(keyword) => report.push_define("INLINE", keyword),
            None => report.push_flag("INLINE"),
        }

        report
    }
}

/// Probe for function-name macros and the inline keyword.
#[derive(Debug, Clone, Copy, Default)]
pub struct FuncMacroProbe;

impl FuncMacroProbe {
    pub const fn new() -> Self {
        Self
    }

    pub fn inspect(&self, ctx: &ProbeContext<'_>) -> FuncMacroFindings {
        let iso = prints_main(ctx, FuncMacroSpelling::Iso);
        let gnuc = prints_main(ctx, FuncMacroSpelling::Gnu);
        let inline_keyword = find_inline(ctx);
        info!(iso, gnuc, inline = ?inline_keyword, "function macro findings");

        FuncMacroFindings {
            iso,
            gnuc,
            inline_keyword,
        }
    }
}

impl ProbeModule for FuncMacroProbe {
    fn name(&self) -> &'static str {
        MODULE_NAME
    }

    fn run(&self, ctx: &ProbeContext<'_>) -> Result<ModuleReport, ProbeError> {
        Ok(self.inspect(ctx).to_report())
    }
}

fn prints_main(ctx: &ProbeContext<'_>, spelling: FuncMacroSpelling) -> bool {
    let source = FUNC_NAME.render(&[("TOKEN", spelling.token())]);
    ctx.run(spelling.token(), &source)
        .output_starts_with(FUNC_SENTINEL)
}

fn find_inline(ctx: &ProbeContext<'_>) -> Option<&'static str> {
    first_success("inline", &INLINE_SPELLINGS, |keyword: &&'static str| {
        let source = INLINE_FUNC.render(&[("KEYWORD", *keyword)]);
        ctx.run(INLINE_FUNC.name(), &source)
            .succeeded()
            .then_some(*keyword)
    })
}
