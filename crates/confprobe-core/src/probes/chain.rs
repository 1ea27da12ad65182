//! Ordered fallback chains.

use std::fmt;

use tracing::debug;

/// Evaluate `candidates` in order and return the first successful attempt.
///
/// Each candidate is tried at most once and nothing after the winner is
/// attempted. `step` names the chain in log output.
pub fn first_success<'c, C, T, I, F>(step: &str, candidates: I, mut attempt: F) -> Option<T>
where
    C: fmt::Debug + 'c + ?Sized,
    I: IntoIterator<Item = &'c C>,
    F: FnMut(&C) -> Option<T>,
{
    for candidate in candidates {
        if let Some(found) = attempt(candidate) {
            debug!(step, ?candidate, "candidate accepted");
            return Some(found);
        }
        debug!(step, ?candidate, "candidate rejected");
    }
    debug!(step, "no candidate accepted");
    None
}
