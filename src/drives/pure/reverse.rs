//! Mount point -> drive cross-referencing

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::drives::types::MountEntry;

/// Pair every host mount point with the drive that targets it, if any.
///
/// Drives are visited in letter order, so when two drives target the same
/// mount point the later letter wins.
pub fn reverse_map(
    drives: &BTreeMap<String, PathBuf>,
    mounts: &[MountEntry],
) -> BTreeMap<PathBuf, Option<String>> {
    let mut reverse: BTreeMap<PathBuf, Option<String>> = mounts
        .iter()
        .map(|m| (m.mount_point.clone(), None))
        .collect();
    for (drive, target) in drives {
        if let Some(slot) = reverse.get_mut(target) {
            *slot = Some(drive.clone());
        }
    }
    reverse
}

/// First drive whose target is exactly `target`.
pub fn drive_targeting<'a>(drives: &'a BTreeMap<String, PathBuf>, target: &Path) -> Option<&'a str> {
    drives
        .iter()
        .find(|(_, t)| t.as_path() == target)
        .map(|(d, _)| d.as_str())
}
