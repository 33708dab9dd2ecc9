//! Drive mapping type definitions

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One mounted filesystem as reported by the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MountEntry {
    pub mount_point: PathBuf,
    pub device: String,
}

/// What to do with a drive letter the prefix doesn't know about.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownDrivePolicy {
    /// Resolve against `/` and log a warning
    #[default]
    Fallback,
    /// Report `Error::UnknownDrive`
    Error,
}
