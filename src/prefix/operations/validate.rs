//! Prefix layout checks

use std::path::Path;

use tracing::debug;

use crate::fsutil::absolute;
use crate::prefix::{REQUIRED_FILES, REQUIRED_SUBDIRS};

/// Check the required subdirectories and state files. Never fails.
pub fn validate(path: &Path) -> bool {
    let path = absolute(path);

    if let Some(missing) = REQUIRED_SUBDIRS.iter().find(|d| !path.join(d).is_dir()) {
        debug!("{} is missing {}/", path.display(), missing);
        return false;
    }
    if let Some(missing) = REQUIRED_FILES.iter().find(|f| !path.join(f).is_file()) {
        debug!("{} is missing {}", path.display(), missing);
        return false;
    }
    true
}
