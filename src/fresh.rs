// src/fresh.rs

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::trace;

/// Prefix of every generated binder name. User identifiers must start with a
/// lowercase letter, so `Var<n>` can never clash with a name from source text.
pub const FRESH_PREFIX: &str = "Var";

// Process-wide and never reset, so names stay unique across normalizations.
static COUNTER: AtomicU64 = AtomicU64::new(0);

/// Returns a binder name that has never been handed out before in this process.
pub fn fresh() -> String {
    let n = COUNTER.fetch_add(1, Ordering::Relaxed) + 1;
    let name = format!("{}{}", FRESH_PREFIX, n);
    trace!(name = %name, "generated fresh name");
    name
}

/// True for names produced by [`fresh`].
pub fn is_fresh_name(name: &str) -> bool {
    name.strip_prefix(FRESH_PREFIX)
        .map_or(false, |digits| !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()))
}
