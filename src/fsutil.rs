//! Small filesystem helpers shared by the locators and the drive mapping.

use std::ffi::CString;
use std::os::unix::ffi::OsStrExt;
use std::path::{Component, Path, PathBuf};

/// Extensions the Windows shell treats as directly executable.
pub const WIN32_EXEC_EXTENSIONS: [&str; 11] = [
    "COM", "EXE", "BAT", "CMD", "VBS", "VBE", "JS", "JSE", "WSF", "WSH", "MSC",
];

/// Check that `path` resolves to a regular file the current user may execute.
pub fn is_flagexec(path: &Path) -> bool {
    let Ok(resolved) = path.canonicalize() else {
        return false;
    };
    if !resolved.is_file() {
        return false;
    }
    let Ok(c_path) = CString::new(resolved.as_os_str().as_bytes()) else {
        return false;
    };
    // SAFETY: c_path is a valid NUL-terminated string for the duration of the call.
    unsafe { libc::access(c_path.as_ptr(), libc::X_OK) == 0 }
}

/// Check that `path` resolves to a file with a Windows executable extension.
pub fn is_win32exec(path: &Path) -> bool {
    let Ok(resolved) = path.canonicalize() else {
        return false;
    };
    if !resolved.is_file() {
        return false;
    }
    resolved
        .extension()
        .map(|ext| ext.to_string_lossy().to_uppercase())
        .is_some_and(|ext| WIN32_EXEC_EXTENSIONS.contains(&ext.as_str()))
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_user(path: &Path) -> PathBuf {
    let mut components = path.components();
    match components.next() {
        Some(Component::Normal(first)) if first == "~" => match home::home_dir() {
            Some(home) => home.join(components.as_path()),
            None => path.to_path_buf(),
        },
        _ => path.to_path_buf(),
    }
}

/// Expand `~` and make the path absolute against the current directory.
///
/// `.` and `..` components are folded lexically; symlinks are left alone.
pub fn absolute(path: &Path) -> PathBuf {
    let expanded = expand_user(path);
    let joined = if expanded.is_absolute() {
        expanded
    } else {
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(expanded),
            Err(_) => Path::new("/").join(expanded),
        }
    };
    normalize(&joined)
}

/// Lexically fold `.` and `..` components.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if out.file_name().is_some() {
                    out.pop();
                } else if !out.has_root() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}
