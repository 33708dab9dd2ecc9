//! Path classification and Windows-flavoured paths
//!
//! Distinguishes POSIX paths from drive-letter paths and gives Windows paths
//! a real filesystem twin through a prefix's drive mapping.
//!
//! ## Module Structure
//! - `types.rs`: Flavour, UPath
//! - `pure/`: Drive splitting and rendering (no I/O)

mod pure;
mod types;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::drives::DriveMapping;
use crate::error::Result;

pub use pure::{drive_key, is_windows_path, render_windows, split_drive, windows_parts};
pub use types::{Flavour, UPath};

/// A Windows path bound to the POSIX file it designates.
///
/// Filesystem queries go to the POSIX twin; the Windows form is what gets
/// handed to guest programs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WinePath {
    windows: UPath,
    native: PathBuf,
}

impl WinePath {
    /// Bind `path` through `mapping`, translating POSIX input first.
    pub fn new(path: &UPath, mapping: &DriveMapping) -> Result<Self> {
        let windows = match path.flavour() {
            Flavour::Windows => path.clone(),
            Flavour::Posix => mapping.to_windows_path(Path::new(path.as_str()))?,
        };
        let native = mapping.to_native_path(&windows)?;
        Ok(Self { windows, native })
    }

    /// The user's home directory seen from the guest.
    pub fn home(mapping: &DriveMapping) -> Result<Self> {
        let home = home::home_dir().unwrap_or_else(|| PathBuf::from("/"));
        Self::new(&UPath::posix(home), mapping)
    }

    pub fn join(&self, part: &str, mapping: &DriveMapping) -> Result<Self> {
        let joined = format!("{}\\{}", self.windows.as_str().trim_end_matches('\\'), part);
        Self::new(&UPath::new(joined), mapping)
    }

    pub fn windows(&self) -> &UPath {
        &self.windows
    }

    pub fn native(&self) -> &Path {
        &self.native
    }

    pub fn exists(&self) -> bool {
        self.native.exists()
    }

    pub fn is_file(&self) -> bool {
        self.native.is_file()
    }

    pub fn is_dir(&self) -> bool {
        self.native.is_dir()
    }

    pub fn metadata(&self) -> io::Result<fs::Metadata> {
        fs::metadata(&self.native)
    }

    pub fn read_dir(&self) -> io::Result<fs::ReadDir> {
        fs::read_dir(&self.native)
    }
}
