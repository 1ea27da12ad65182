//! Header and struct-member oracle built on a toolchain harness.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use confprobe_core::{HeaderOracle, TestProgram, ToolchainHarness};
use tracing::debug;

const HEADER_CHECK: TestProgram = TestProgram::new(
    "header",
    "#include <@HEADER@>\nint main(void) { return 0; }\n",
);

const MEMBER_CHECK: TestProgram = TestProgram::new(
    "member",
    r#"@INCLUDES@
int main(void) {
    @TYPE@ probe_aggregate;
    (void)sizeof(probe_aggregate.@MEMBER@);
    return 0;
}
"#,
);

/// Answers header and member questions by compiling tiny programs.
///
/// Answers are cached for the lifetime of the checker; the same header is
/// never compiled twice.
pub struct HeaderChecker {
    harness: Arc<dyn ToolchainHarness>,
    headers: Mutex<HashMap<String, bool>>,
    members: Mutex<HashMap<(String, String, String), bool>>,
}

impl HeaderChecker {
    pub fn new(harness: Arc<dyn ToolchainHarness>) -> Self {
        Self {
            harness,
            headers: Mutex::new(HashMap::new()),
            members: Mutex::new(HashMap::new()),
        }
    }

    /// Number of distinct headers checked so far.
    pub fn cached_headers(&self) -> usize {
        self.headers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl HeaderOracle for HeaderChecker {
    fn header_exists(&self, name: &str) -> bool {
        let mut cache = self.headers.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(&known) = cache.get(name) {
            return known;
        }
        let exists = self
            .harness
            .compile_test(&HEADER_CHECK.render(&[("HEADER", name)]));
        debug!(header = name, exists, "checked header");
        cache.insert(name.to_string(), exists);
        exists
    }

    fn struct_has_member(&self, type_name: &str, member: &str, includes: &str) -> bool {
        let key = (
            type_name.to_string(),
            member.to_string(),
            includes.to_string(),
        );
        let mut cache = self.members.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(&known) = cache.get(&key) {
            return known;
        }
        let source = MEMBER_CHECK.render(&[
            ("INCLUDES", includes),
            ("TYPE", type_name),
            ("MEMBER", member),
        ]);
        let present = self.harness.compile_test(&source);
        debug!(type_name, member, present, "checked struct member");
        cache.insert(key, present);
        present
    }
}
