//! Header and aggregate-member introspection port.

/// Port answering "does this header exist" and "does this type have that
/// member" for the target toolchain.
#[cfg_attr(test, mockall::automock)]
pub trait HeaderOracle: Send + Sync {
    /// True if `#include <name>` works on the target.
    fn header_exists(&self, name: &str) -> bool;

    /// True if `type_name` exposes `member` once `includes` has been
    /// processed.
    ///
    /// `includes` is literal preprocessor text, e.g.
    /// `"#include <sys/types.h>\n#include <dirent.h>"`.
    fn struct_has_member(&self, type_name: &str, member: &str, includes: &str) -> bool;
}
