//! Distribution layout checks

use std::path::Path;

use tracing::debug;

use crate::dist::{REQUIRED_BINS, REQUIRED_DIRS};
use crate::fsutil::{absolute, is_flagexec};

/// Check a plain wine layout: required directories and executable binaries.
///
/// Never fails; any missing piece yields `false`.
pub fn validate(path: &Path) -> bool {
    let path = absolute(path);

    if let Some(missing) = REQUIRED_DIRS.iter().find(|d| !path.join(d).is_dir()) {
        debug!("{} is missing {}/", path.display(), missing);
        return false;
    }
    if let Some(missing) = REQUIRED_BINS
        .iter()
        .find(|b| !is_flagexec(&path.join("bin").join(b)))
    {
        debug!("{} has no executable bin/{}", path.display(), missing);
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::make_dist;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    #[test]
    fn test_validate_complete_layout() {
        let dir = tempfile::tempdir().unwrap();
        make_dist(dir.path());
        assert!(validate(dir.path()));
    }

    #[test]
    fn test_validate_flips_on_each_missing_dir() {
        for missing in REQUIRED_DIRS {
            let dir = tempfile::tempdir().unwrap();
            make_dist(dir.path());
            if missing == "bin" {
                fs::remove_dir_all(dir.path().join(missing)).unwrap();
            } else {
                fs::remove_dir(dir.path().join(missing)).unwrap();
            }
            assert!(!validate(dir.path()), "without {}", missing);
        }
    }

    #[test]
    fn test_validate_flips_on_each_missing_bin() {
        for missing in REQUIRED_BINS {
            let dir = tempfile::tempdir().unwrap();
            make_dist(dir.path());
            fs::remove_file(dir.path().join("bin").join(missing)).unwrap();
            assert!(!validate(dir.path()), "without {}", missing);
        }
    }

    #[test]
    fn test_validate_requires_exec_bit() {
        let dir = tempfile::tempdir().unwrap();
        make_dist(dir.path());
        let server = dir.path().join("bin/wineserver");
        fs::set_permissions(&server, fs::Permissions::from_mode(0o644)).unwrap();
        assert!(!validate(dir.path()));
    }
}
