//! The non-returning error path for authoring and linkage bugs.

use std::fmt;

/// Report a contract violation and terminate the current session.
///
/// Logs the diagnostic at `error` level and then panics with the same text,
/// so an embedding game loop sees the failure at the offending call site.
pub fn abort_with(error: impl fmt::Display) -> ! {
    tracing::error!(%error, "fatal thinker contract violation");
    panic!("{error}");
}
