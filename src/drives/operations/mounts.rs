//! Host mount table sources

use std::fmt;
use std::os::unix::fs::MetadataExt;
use std::path::{Path, PathBuf};

use sysinfo::Disks;

use crate::drives::types::MountEntry;

/// Where the drive mapping learns about mounted filesystems.
pub trait MountSource: Send + Sync + fmt::Debug {
    /// Currently mounted filesystems.
    fn mounts(&self) -> Vec<MountEntry>;

    /// Whether `path` is a mount boundary.
    fn is_mount(&self, path: &Path) -> bool;
}

/// Live host state: sysinfo's disk list and device-id boundaries.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemMounts;

impl MountSource for SystemMounts {
    fn mounts(&self) -> Vec<MountEntry> {
        let disks = Disks::new_with_refreshed_list();
        disks
            .list()
            .iter()
            .map(|disk| MountEntry {
                mount_point: disk.mount_point().to_path_buf(),
                device: disk.name().to_string_lossy().into_owned(),
            })
            .collect()
    }

    fn is_mount(&self, path: &Path) -> bool {
        let Ok(meta) = path.symlink_metadata() else {
            return false;
        };
        if meta.file_type().is_symlink() {
            return false;
        }
        let parent = path.parent().unwrap_or(path);
        let Ok(parent_meta) = parent.symlink_metadata() else {
            return false;
        };
        meta.dev() != parent_meta.dev() || meta.ino() == parent_meta.ino()
    }
}

/// A fixed mount table. `/` is always part of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticMounts {
    entries: Vec<MountEntry>,
}

impl StaticMounts {
    pub fn new<I, P>(mount_points: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut entries: Vec<MountEntry> = mount_points
            .into_iter()
            .map(|mp| MountEntry {
                mount_point: mp.into(),
                device: String::new(),
            })
            .collect();
        if !entries.iter().any(|e| e.mount_point == Path::new("/")) {
            entries.insert(
                0,
                MountEntry {
                    mount_point: PathBuf::from("/"),
                    device: String::new(),
                },
            );
        }
        Self { entries }
    }

    pub fn root_only() -> Self {
        Self::new(Vec::<PathBuf>::new())
    }
}

impl MountSource for StaticMounts {
    fn mounts(&self) -> Vec<MountEntry> {
        self.entries.clone()
    }

    fn is_mount(&self, path: &Path) -> bool {
        self.entries.iter().any(|e| e.mount_point == path)
    }
}
