//! Diagnostics with colored terminal output.
//!
//! Provides deduplication to avoid spamming the same warning multiple times.
//! Used by the tokenizer and the tree builder to report tolerated oddities,
//! such as a start tag carrying the same attribute name twice.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use owo_colors::OwoColorize;

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Lock the warning set, recovering it if a previous holder panicked.
fn warned() -> MutexGuard<'static, Option<HashSet<String>>> {
    WARNED.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Warn about a tolerated input oddity (prints once per unique message).
///
/// Returns `true` if the message was printed, `false` if it had already been
/// reported since the last [`clear_warnings`].
///
/// # Example
/// ```ignore
/// warn_once("XML Tokenizer", "duplicate attribute 'id' on <item>");
/// ```
pub fn warn_once(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    let should_print = warned().get_or_insert_with(HashSet::new).insert(key);

    if should_print {
        eprintln!("{}", format!("[twig {component}] warning: {message}").yellow());
    }
    should_print
}

/// Clear all recorded warnings (call before parsing an unrelated document)
pub fn clear_warnings() {
    let mut warned = warned();
    if let Some(set) = warned.as_mut() {
        set.clear();
    }
}
