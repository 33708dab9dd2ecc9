//! Drive detection for path strings
//!
//! Pure functions, no I/O.

use std::sync::LazyLock;

use regex::Regex;

static DRIVE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z]:)[/\\]").unwrap());

/// Split a path string into its drive (`"c:"`) and the remainder.
///
/// The remainder keeps its leading separator. Strings without a drive
/// anchor return an empty drive.
pub fn split_drive(path: &str) -> (&str, &str) {
    match DRIVE_RE.captures(path).and_then(|caps| caps.get(1)) {
        Some(drive) => (&path[..drive.end()], &path[drive.end()..]),
        None => ("", path),
    }
}

/// A path string is a Windows path if it starts with a drive anchor.
///
/// Relative paths and `file://` URLs never match.
pub fn is_windows_path(path: &str) -> bool {
    !split_drive(path).0.is_empty()
}

/// Lower-case drive key as used in `dosdevices` (`"C:"` -> `"c:"`).
pub fn drive_key(drive: &str) -> String {
    drive.to_ascii_lowercase()
}

/// Path components past the drive anchor, both separator kinds accepted.
pub fn windows_parts(rest: &str) -> Vec<&str> {
    rest.split(['/', '\\'])
        .filter(|part| !part.is_empty() && *part != ".")
        .collect()
}

/// Render a drive and components the way Windows prints them (`C:\a\b`).
pub fn render_windows(drive: &str, parts: &[&str]) -> String {
    let mut out = drive.to_ascii_uppercase();
    out.push('\\');
    out.push_str(&parts.join("\\"));
    out
}
