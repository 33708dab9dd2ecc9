//! Reading the prefix's `dosdevices` symlinks

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};
use crate::fsutil::normalize;
use crate::winpath::drive_key;

/// Read every `x:` symlink in `dosdevices` into a drive -> target map.
///
/// Relative targets (`../drive_c`) are resolved against the `dosdevices`
/// directory; targets are not required to exist.
pub fn read_drive_links(dosdevices: &Path) -> Result<BTreeMap<String, PathBuf>> {
    if !dosdevices.is_dir() {
        return Err(Error::MissingDosDevices(dosdevices.to_path_buf()));
    }

    let mut drives = BTreeMap::new();
    for entry in fs::read_dir(dosdevices)?.flatten() {
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if name.chars().count() != 2 || !name.ends_with(':') {
            continue;
        }
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        if !file_type.is_symlink() {
            continue;
        }
        let target = fs::read_link(entry.path())?;
        let target = if target.is_absolute() {
            normalize(&target)
        } else {
            normalize(&dosdevices.join(target))
        };
        debug!("drive {} -> {}", name, target.display());
        drives.insert(drive_key(&name), target);
    }
    Ok(drives)
}
