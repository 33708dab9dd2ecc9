//! Drive mapping between host mount points and prefix drive letters
//!
//! A prefix exposes host directories to the guest through `x:` symlinks in
//! its `dosdevices` directory. This module reads those links, cross-checks
//! them against the host mount table and converts paths in both directions.
//!
//! ## Module Structure
//! - `types.rs`: MountEntry, UnknownDrivePolicy
//! - `pure/`: Reverse map construction
//! - `operations/`: dosdevices reading, mount sources (live and static)

mod operations;
mod pure;
mod types;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::fsutil;
use crate::winpath::{UPath, is_windows_path, render_windows};

pub use operations::{MountSource, StaticMounts, SystemMounts, read_drive_links};
pub use pure::{drive_targeting, reverse_map};
pub use types::{MountEntry, UnknownDrivePolicy};

/// Bidirectional drive table for one prefix.
///
/// The table is a snapshot: call [`DriveMapping::refresh`] after the
/// prefix's `dosdevices` links or the host mounts change.
#[derive(Clone, Debug)]
pub struct DriveMapping {
    dosdevices: PathBuf,
    drives: BTreeMap<String, PathBuf>,
    mounts: BTreeMap<PathBuf, Option<String>>,
    source: Arc<dyn MountSource>,
    policy: UnknownDrivePolicy,
}

impl DriveMapping {
    /// Build the mapping for the prefix directory `pfx` (the one holding
    /// `dosdevices/`).
    pub fn new(pfx: &Path, source: Arc<dyn MountSource>) -> Result<Self> {
        let mut mapping = Self {
            dosdevices: pfx.join("dosdevices"),
            drives: BTreeMap::new(),
            mounts: BTreeMap::new(),
            source,
            policy: UnknownDrivePolicy::default(),
        };
        mapping.refresh()?;
        Ok(mapping)
    }

    pub fn with_policy(mut self, policy: UnknownDrivePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn set_policy(&mut self, policy: UnknownDrivePolicy) {
        self.policy = policy;
    }

    pub fn policy(&self) -> UnknownDrivePolicy {
        self.policy
    }

    /// Re-read the drive links and the host mount table.
    pub fn refresh(&mut self) -> Result<()> {
        let drives = read_drive_links(&self.dosdevices)?;
        let mounts = reverse_map(&drives, &self.source.mounts());
        debug!(
            "drive mapping refreshed: {} drives, {} mount points",
            drives.len(),
            mounts.len()
        );
        self.drives = drives;
        self.mounts = mounts;
        Ok(())
    }

    /// Drive letter -> POSIX target.
    pub fn drives(&self) -> &BTreeMap<String, PathBuf> {
        &self.drives
    }

    /// Host mount point -> drive letter, `None` for unmapped mounts.
    pub fn mount_points(&self) -> &BTreeMap<PathBuf, Option<String>> {
        &self.mounts
    }

    pub fn drive_target(&self, drive: &str) -> Option<&Path> {
        self.drives
            .get(&drive.to_ascii_lowercase())
            .map(PathBuf::as_path)
    }

    /// Nearest ancestor of `path` that is a mount boundary.
    pub fn mount_point(&self, path: &Path) -> Result<PathBuf> {
        let raw = path.to_string_lossy();
        if is_windows_path(&raw) {
            return Err(Error::NotAPosixPath(raw.into_owned()));
        }
        let mut current = fsutil::absolute(path);
        loop {
            if self.source.is_mount(&current) {
                return Ok(current);
            }
            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => return Ok(current),
            }
        }
    }

    fn root_drive(&self) -> Option<&str> {
        match self.mounts.get(Path::new("/")) {
            Some(Some(drive)) => Some(drive.as_str()),
            _ => drive_targeting(&self.drives, Path::new("/")),
        }
    }

    /// Express a host path as a guest path.
    ///
    /// Paths under a mapped mount point become `drive:\rest`; anything else
    /// goes through the drive of `/` with its full absolute path. Windows
    /// paths pass through unchanged.
    pub fn to_windows_path(&self, path: &Path) -> Result<UPath> {
        let raw = path.to_string_lossy();
        if is_windows_path(&raw) {
            return Ok(UPath::new(raw.into_owned()));
        }

        let absolute = fsutil::absolute(path);
        let mount = self.mount_point(&absolute)?;

        let (drive, rest) = match self.mounts.get(&mount) {
            Some(Some(drive)) => (
                drive.as_str(),
                absolute.strip_prefix(&mount).unwrap_or(&absolute),
            ),
            _ => {
                let drive = self
                    .root_drive()
                    .ok_or_else(|| Error::UnmappedPath(absolute.clone()))?;
                (drive, absolute.strip_prefix("/").unwrap_or(&absolute))
            }
        };

        let rest = rest.to_string_lossy();
        let parts: Vec<&str> = rest.split('/').filter(|p| !p.is_empty()).collect();
        Ok(UPath::new(render_windows(drive, &parts)))
    }

    /// Express a guest path as a host path. POSIX paths pass through.
    pub fn to_native_path(&self, path: &UPath) -> Result<PathBuf> {
        let Some(drive) = path.drive() else {
            return Ok(PathBuf::from(path.as_str()));
        };

        let target = match self.drives.get(&drive) {
            Some(target) => target.clone(),
            None => match self.policy {
                UnknownDrivePolicy::Fallback => {
                    warn!("drive {} is not mapped, resolving {} against /", drive, path);
                    PathBuf::from("/")
                }
                UnknownDrivePolicy::Error => return Err(Error::UnknownDrive(drive)),
            },
        };

        let mut native = target;
        for part in path.parts() {
            native.push(part);
        }
        Ok(fsutil::normalize(&native))
    }
}

impl PartialEq for DriveMapping {
    fn eq(&self, other: &Self) -> bool {
        self.dosdevices == other.dosdevices
            && self.drives == other.drives
            && self.mounts == other.mounts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{add_drive, make_prefix};
    use std::fs;

    fn setup() -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let pfx = make_prefix(&dir.path().canonicalize().unwrap());
        (dir, pfx)
    }

    #[test]
    fn test_forward_and_reverse_maps() {
        let (_dir, pfx) = setup();
        add_drive(&pfx, "d:", Path::new("/mnt/games"));
        let mounts = StaticMounts::new(["/mnt/games", "/boot"]);
        let mapping = DriveMapping::new(&pfx, Arc::new(mounts)).unwrap();

        assert_eq!(mapping.drive_target("D:"), Some(Path::new("/mnt/games")));
        assert_eq!(mapping.drive_target("c:"), Some(pfx.join("drive_c").as_path()));
        let reverse = mapping.mount_points();
        assert_eq!(reverse[Path::new("/mnt/games")].as_deref(), Some("d:"));
        assert_eq!(reverse[Path::new("/")].as_deref(), Some("z:"));
        assert_eq!(reverse[Path::new("/boot")], None);
    }

    #[test]
    fn test_to_windows_path_uses_nearest_mount() {
        let (_dir, pfx) = setup();
        add_drive(&pfx, "d:", Path::new("/mnt/games"));
        let mapping =
            DriveMapping::new(&pfx, Arc::new(StaticMounts::new(["/mnt/games", "/boot"]))).unwrap();

        let win = mapping
            .to_windows_path(Path::new("/mnt/games/Skyrim/SkyrimSE.exe"))
            .unwrap();
        assert_eq!(win.as_str(), "D:\\Skyrim\\SkyrimSE.exe");

        // unmapped mount falls back to the root drive with the full path
        let win = mapping.to_windows_path(Path::new("/boot/efi")).unwrap();
        assert_eq!(win.as_str(), "Z:\\boot\\efi");

        let win = mapping.to_windows_path(Path::new("/home/user/test")).unwrap();
        assert_eq!(win.as_str(), "Z:\\home\\user\\test");

        let win = mapping.to_windows_path(Path::new("/mnt/games")).unwrap();
        assert_eq!(win.as_str(), "D:\\");
    }

    #[test]
    fn test_to_windows_path_passes_windows_through() {
        let (_dir, pfx) = setup();
        let mapping = DriveMapping::new(&pfx, Arc::new(StaticMounts::root_only())).unwrap();
        let win = mapping.to_windows_path(Path::new("c:/windows")).unwrap();
        assert_eq!(win.as_str(), "C:\\windows");
    }

    #[test]
    fn test_to_native_path() {
        let (_dir, pfx) = setup();
        add_drive(&pfx, "d:", Path::new("/mnt/games"));
        let mapping = DriveMapping::new(&pfx, Arc::new(StaticMounts::root_only())).unwrap();

        let native = mapping
            .to_native_path(&UPath::new("C:\\windows\\system32"))
            .unwrap();
        assert_eq!(native, pfx.join("drive_c/windows/system32"));
        let native = mapping.to_native_path(&UPath::new("d:/Skyrim")).unwrap();
        assert_eq!(native, PathBuf::from("/mnt/games/Skyrim"));
        let native = mapping.to_native_path(&UPath::new("/already/native")).unwrap();
        assert_eq!(native, PathBuf::from("/already/native"));
    }

    #[test]
    fn test_unknown_drive_policy() {
        let (_dir, pfx) = setup();
        let mapping = DriveMapping::new(&pfx, Arc::new(StaticMounts::root_only())).unwrap();
        let path = UPath::new("Q:\\data\\file.txt");

        assert_eq!(
            mapping.to_native_path(&path).unwrap(),
            PathBuf::from("/data/file.txt")
        );

        let strict = mapping.with_policy(UnknownDrivePolicy::Error);
        assert!(matches!(
            strict.to_native_path(&path),
            Err(Error::UnknownDrive(d)) if d == "q:"
        ));
    }

    #[test]
    fn test_round_trip() {
        let (_dir, pfx) = setup();
        add_drive(&pfx, "d:", Path::new("/mnt/games"));
        let mapping =
            DriveMapping::new(&pfx, Arc::new(StaticMounts::new(["/mnt/games"]))).unwrap();

        for posix in [
            "/mnt/games/a/b.exe",
            "/mnt/games",
            "/usr/share/fonts",
            "/",
        ] {
            let win = mapping.to_windows_path(Path::new(posix)).unwrap();
            let back = mapping.to_native_path(&win).unwrap();
            assert_eq!(back, PathBuf::from(posix), "via {}", win);
        }

        let inside_c = pfx.join("drive_c/users/steamuser");
        let win = mapping.to_windows_path(&inside_c).unwrap();
        assert_eq!(mapping.to_native_path(&win).unwrap(), inside_c);
    }

    #[test]
    fn test_refresh_is_idempotent_and_tracks_changes() {
        let (_dir, pfx) = setup();
        let mut mapping =
            DriveMapping::new(&pfx, Arc::new(StaticMounts::new(["/mnt/usb"]))).unwrap();
        let snapshot = mapping.clone();
        mapping.refresh().unwrap();
        assert_eq!(mapping, snapshot);

        add_drive(&pfx, "e:", Path::new("/mnt/usb"));
        assert_eq!(mapping.drive_target("e:"), None);
        mapping.refresh().unwrap();
        assert_eq!(mapping.drive_target("e:"), Some(Path::new("/mnt/usb")));
        assert_eq!(mapping.mount_points()[Path::new("/mnt/usb")].as_deref(), Some("e:"));
    }

    #[test]
    fn test_no_root_drive_is_an_error() {
        let (_dir, pfx) = setup();
        fs::remove_file(pfx.join("dosdevices/z:")).unwrap();
        let mapping = DriveMapping::new(&pfx, Arc::new(StaticMounts::root_only())).unwrap();
        assert!(matches!(
            mapping.to_windows_path(Path::new("/etc/hosts")),
            Err(Error::UnmappedPath(_))
        ));
    }

    #[test]
    fn test_mount_point_rejects_windows_paths() {
        let (_dir, pfx) = setup();
        let mapping = DriveMapping::new(&pfx, Arc::new(StaticMounts::new(["/mnt"]))).unwrap();
        assert_eq!(
            mapping.mount_point(Path::new("/mnt/x/y")).unwrap(),
            PathBuf::from("/mnt")
        );
        assert!(matches!(
            mapping.mount_point(Path::new("C:\\x")),
            Err(Error::NotAPosixPath(_))
        ));
    }

    #[test]
    fn test_missing_dosdevices_fails_construction() {
        let dir = tempfile::tempdir().unwrap();
        let err = DriveMapping::new(dir.path(), Arc::new(StaticMounts::root_only())).unwrap_err();
        assert!(matches!(err, Error::MissingDosDevices(_)));
    }
}
