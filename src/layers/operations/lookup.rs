//! Library, data and manifest lookups under an install tree

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::{Error, Result};

pub fn require_dir(path: &Path) -> Result<()> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(Error::NotADirectory(path.to_path_buf()))
    }
}

pub fn require_file(path: &Path) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(Error::FileNotFound(path.to_path_buf()))
    }
}

fn walk_files(root: &Path) -> impl Iterator<Item = walkdir::DirEntry> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
}

/// Directories under `root` holding a `*<name>*.so`, in walk order.
pub fn find_library_dirs(root: &Path, name: &str) -> Result<Vec<PathBuf>> {
    require_dir(root)?;
    let mut dirs: Vec<PathBuf> = Vec::new();
    for entry in walk_files(root) {
        let Some(filename) = entry.file_name().to_str() else {
            continue;
        };
        if filename.ends_with(".so")
            && filename.contains(name)
            && let Some(dir) = entry.path().parent()
            && !dirs.iter().any(|d| d == dir)
        {
            dirs.push(dir.to_path_buf());
        }
    }
    debug!("{} library dirs under {}: {:?}", name, root.display(), dirs);
    if dirs.is_empty() {
        return Err(Error::LibraryNotFound {
            name: name.to_string(),
            root: root.to_path_buf(),
        });
    }
    Ok(dirs)
}

/// `share/` of the first ancestor of `lib_dir` that has one.
pub fn data_dir(lib_dir: &Path) -> Result<PathBuf> {
    lib_dir
        .ancestors()
        .take_while(|dir| *dir != Path::new("/"))
        .map(|dir| dir.join("share"))
        .find(|share| share.is_dir())
        .ok_or_else(|| Error::DataDirNotFound(lib_dir.to_path_buf()))
}

/// Vulkan ICD manifests named `<driver>_icd.*.json`.
pub fn find_icd_files(root: &Path, driver: &str) -> Result<Vec<PathBuf>> {
    let prefix = format!("{}_icd.", driver);
    let found: Vec<PathBuf> = walk_files(root)
        .filter(|e| {
            e.file_name()
                .to_str()
                .is_some_and(|f| f.starts_with(&prefix) && f.ends_with(".json"))
        })
        .map(|e| e.into_path())
        .collect();
    if found.is_empty() {
        return Err(Error::IcdNotFound(driver.to_string()));
    }
    Ok(found)
}

/// Directories called `name` anywhere under `root`.
pub fn find_named_dirs(root: &Path, name: &str) -> Vec<PathBuf> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_dir() && e.file_name() == name)
        .map(|e| e.into_path())
        .collect()
}
