//! Tagged path type

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::pure::{drive_key, is_windows_path, render_windows, split_drive, windows_parts};
use crate::error::{Error, Result};

/// Which namespace a path string belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Flavour {
    Posix,
    Windows,
}

/// A path tagged with its namespace.
///
/// Built through [`UPath::new`], which classifies the string; Windows paths
/// are stored in their rendered form (`C:\users\steamuser`).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct UPath {
    flavour: Flavour,
    raw: String,
}

impl UPath {
    pub fn new(path: impl Into<String>) -> Self {
        let raw = path.into();
        if is_windows_path(&raw) {
            Self::render(&raw)
        } else {
            Self {
                flavour: Flavour::Posix,
                raw,
            }
        }
    }

    pub fn posix(path: impl AsRef<Path>) -> Self {
        Self {
            flavour: Flavour::Posix,
            raw: path.as_ref().to_string_lossy().into_owned(),
        }
    }

    /// Build a Windows path, refusing strings without a drive anchor.
    pub fn windows(path: &str) -> Result<Self> {
        if !is_windows_path(path) {
            return Err(Error::NotAWindowsPath(path.to_string()));
        }
        Ok(Self::render(path))
    }

    fn render(path: &str) -> Self {
        let (drive, rest) = split_drive(path);
        Self {
            flavour: Flavour::Windows,
            raw: render_windows(drive, &windows_parts(rest)),
        }
    }

    pub fn flavour(&self) -> Flavour {
        self.flavour
    }

    pub fn is_windows(&self) -> bool {
        self.flavour == Flavour::Windows
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Drive key (`"c:"`) of a Windows path.
    pub fn drive(&self) -> Option<String> {
        match self.flavour {
            Flavour::Windows => Some(drive_key(split_drive(&self.raw).0)),
            Flavour::Posix => None,
        }
    }

    /// Components past the anchor.
    pub fn parts(&self) -> Vec<&str> {
        match self.flavour {
            Flavour::Windows => windows_parts(split_drive(&self.raw).1),
            Flavour::Posix => self
                .raw
                .split('/')
                .filter(|part| !part.is_empty() && *part != ".")
                .collect(),
        }
    }

    /// The POSIX path, when this is one.
    pub fn to_path_buf(&self) -> Option<PathBuf> {
        match self.flavour {
            Flavour::Posix => Some(PathBuf::from(&self.raw)),
            Flavour::Windows => None,
        }
    }
}

impl fmt::Display for UPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<&str> for UPath {
    fn from(value: &str) -> Self {
        UPath::new(value)
    }
}

impl From<String> for UPath {
    fn from(value: String) -> Self {
        UPath::new(value)
    }
}

impl From<&Path> for UPath {
    fn from(value: &Path) -> Self {
        UPath::new(value.to_string_lossy().into_owned())
    }
}

impl From<PathBuf> for UPath {
    fn from(value: PathBuf) -> Self {
        UPath::from(value.as_path())
    }
}
