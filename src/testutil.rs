// Fixture builders for unit tests

use std::fs;
use std::os::unix::fs::{PermissionsExt, symlink};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::context::Context;
use crate::dist::{Distribution, REQUIRED_BINS, REQUIRED_DIRS};
use crate::drives::StaticMounts;
use crate::prefix::{Prefix, REQUIRED_FILES, REQUIRED_SUBDIRS};

pub fn make_exec(path: &Path) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, "#!/bin/sh\n").unwrap();
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}

/// Plain wine layout: bin/ lib/ lib64/ share/ plus the required binaries.
pub fn make_dist(root: &Path) -> PathBuf {
    for dir in REQUIRED_DIRS {
        fs::create_dir_all(root.join(dir)).unwrap();
    }
    for bin in REQUIRED_BINS {
        make_exec(&root.join("bin").join(bin));
    }
    root.to_path_buf()
}

/// Proton-style layout: an executable `proton` shim and the payload in `payload`.
pub fn make_proton(root: &Path, payload: &str) -> PathBuf {
    make_exec(&root.join("proton"));
    make_dist(&root.join(payload));
    root.to_path_buf()
}

/// Minimal prefix with `c:` pointing at `../drive_c` and `z:` at `/`.
pub fn make_prefix(root: &Path) -> PathBuf {
    for dir in REQUIRED_SUBDIRS {
        fs::create_dir_all(root.join(dir)).unwrap();
    }
    for file in REQUIRED_FILES {
        fs::write(root.join(file), "").unwrap();
    }
    symlink("../drive_c", root.join("dosdevices/c:")).unwrap();
    symlink("/", root.join("dosdevices/z:")).unwrap();
    root.to_path_buf()
}

pub fn add_drive(prefix: &Path, drive: &str, target: &Path) {
    symlink(target, prefix.join("dosdevices").join(drive)).unwrap();
}

/// Context over `root/wine` (or `root/Proton 9.0`) and `root/pfx`, with only
/// `/` mounted.
pub fn context_in(root: &Path, proton: bool) -> Context {
    let dist = if proton {
        make_proton(&root.join("Proton 9.0"), "files")
    } else {
        make_dist(&root.join("wine"))
    };
    let pfx = make_prefix(&root.join("pfx"));
    Context::with_mounts(
        Arc::new(Distribution::new(dist).unwrap()),
        Arc::new(Prefix::new(pfx).unwrap()),
        Arc::new(StaticMounts::root_only()),
    )
    .unwrap()
}
