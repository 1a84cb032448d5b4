//! Log file location, ANSI stripping, and timestamps.
use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;

const ESC: char = '\x1b';

/// Remove terminal escape sequences from `s`.
///
/// CSI sequences (`ESC [` … final byte in `@`..=`~`) are dropped whole; for
/// any other escape only `ESC` and the byte after it are dropped.
pub(super) fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some((before, after)) = rest.split_once(ESC) {
        out.push_str(before);
        let mut tail = after.chars();
        if tail.next() == Some('[') {
            while tail.next().is_some_and(|c| !('@'..='~').contains(&c)) {}
        }
        rest = tail.as_str();
    }
    out.push_str(rest);
    out
}

/// Directory holding run logs: `$XDG_CACHE_HOME/provision`, falling back
/// to `$HOME/.cache/provision`. Created on first use.
fn log_dir() -> Option<PathBuf> {
    let non_empty = |key: &str| std::env::var_os(key).filter(|v: &OsString| !v.is_empty());
    let base = non_empty("XDG_CACHE_HOME")
        .map(PathBuf::from)
        .or_else(|| non_empty("HOME").map(|home| PathBuf::from(home).join(".cache")))?;
    let dir = base.join("provision");
    fs::create_dir_all(&dir).ok()?;
    Some(dir)
}

/// Path of the log written by `command`.
pub(super) fn log_file_path(command: &str) -> Option<PathBuf> {
    log_dir().map(|dir| dir.join(command).with_extension("log"))
}

/// Current UTC time rendered with a `strftime` pattern.
pub(super) fn utc_now(pattern: &str) -> String {
    chrono::Utc::now().format(pattern).to_string()
}
