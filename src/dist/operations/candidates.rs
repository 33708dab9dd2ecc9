//! Candidate distribution roots

use std::fs;
use std::path::PathBuf;

use crate::discovery::SearchPaths;
use crate::dist::PROTON_SHIM;
use crate::fsutil::is_flagexec;

/// Roots worth trying, in search order.
///
/// A `wine` binary in a bin directory names its grand-parent; a depot child
/// counts when it carries an executable `proton` shim.
pub fn distribution_candidates(paths: &SearchPaths) -> Vec<PathBuf> {
    let mut found = Vec::new();

    for dir in paths.bin_dirs() {
        let wine = dir.join("wine");
        if !is_flagexec(&wine) {
            continue;
        }
        if let Ok(resolved) = wine.canonicalize()
            && let Some(root) = resolved.parent().and_then(|bin| bin.parent())
        {
            found.push(root.to_path_buf());
        }
    }

    for depot in paths.depot_dirs() {
        let Ok(entries) = fs::read_dir(&depot) else {
            continue;
        };
        let mut children: Vec<PathBuf> = entries
            .flatten()
            .map(|e| e.path())
            .filter(|p| p.is_dir() && is_flagexec(&p.join(PROTON_SHIM)))
            .collect();
        children.sort();
        found.extend(children);
    }

    found
}
