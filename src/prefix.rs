//! Wine prefixes
//!
//! A prefix is the per-application Windows filesystem and registry. Proton
//! compat-data directories keep the real prefix one level down in `pfx/`.
//!
//! ## Module Structure
//! - `types.rs`: PrefixMetadata, WinVersion
//! - `pure/`: Registry hive reader
//! - `operations/`: Layout validation, candidate scanning, metadata loading

mod operations;
mod pure;
mod types;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;

use crate::drives::{DriveMapping, MountSource};
use crate::error::{Error, Result};
use crate::fsutil::expand_user;

pub use operations::{prefix_candidates, read_dll_overrides, read_metadata, validate};
pub use pure::{RegSection, parse_arch, parse_sections};
pub use types::{PrefixMetadata, WinVersion};

pub const REQUIRED_SUBDIRS: [&str; 2] = ["dosdevices", "drive_c"];
pub const REQUIRED_FILES: [&str; 4] = ["system.reg", "user.reg", "userdef.reg", ".update-timestamp"];

/// Nested prefix directory of compat-data layouts.
pub const NESTED_PFX: &str = "pfx";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prefix {
    root: PathBuf,
    pfx: PathBuf,
    metadata: PrefixMetadata,
}

impl Prefix {
    /// Open the prefix at `root`, or at `root/pfx`.
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let expanded = expand_user(root.as_ref());
        let root = expanded
            .canonicalize()
            .map_err(|_| Error::NotADirectory(expanded.clone()))?;
        if !root.is_dir() {
            return Err(Error::NotADirectory(root));
        }

        let pfx = [root.clone(), root.join(NESTED_PFX)]
            .into_iter()
            .find(|p| validate(p))
            .ok_or_else(|| Error::InvalidPrefix(root.clone()))?;

        let metadata = read_metadata(&pfx);
        info!(
            "wine prefix at {} (arch {})",
            pfx.display(),
            metadata.arch.as_deref().unwrap_or("unknown")
        );
        Ok(Self {
            root,
            pfx,
            metadata,
        })
    }

    pub fn validate(path: impl AsRef<Path>) -> bool {
        validate(path.as_ref())
    }

    /// Directory the prefix was opened from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding `dosdevices/` and `drive_c/`.
    pub fn pfx(&self) -> &Path {
        &self.pfx
    }

    pub fn dosdevices(&self) -> PathBuf {
        self.pfx.join("dosdevices")
    }

    pub fn drive_c(&self) -> PathBuf {
        self.pfx.join("drive_c")
    }

    pub fn arch(&self) -> Option<&str> {
        self.metadata.arch.as_deref()
    }

    pub fn win_version(&self) -> Option<&WinVersion> {
        self.metadata.win_version.as_ref()
    }

    pub fn dll_overrides(&self) -> &BTreeMap<String, String> {
        &self.metadata.dll_overrides
    }

    pub fn metadata(&self) -> &PrefixMetadata {
        &self.metadata
    }

    /// Fresh drive table for this prefix.
    pub fn drive_mapping(&self, source: Arc<dyn MountSource>) -> Result<DriveMapping> {
        DriveMapping::new(&self.pfx, source)
    }
}
