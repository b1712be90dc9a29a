//! Utility helpers — install-dir resolution and string manipulation.

use std::path::PathBuf;

/// Directory the node is installed in: the directory holding the running
/// executable, or `.` if it cannot be determined.
pub fn get_install_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.canonicalize().ok())
        .and_then(|exe| exe.parent().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// The first `max_chars` characters of `s`. Unicode-safe.
pub fn take_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
