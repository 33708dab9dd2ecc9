//! Wine runtime distributions
//!
//! A distribution is either a plain wine tree (`bin/ lib/ lib64/ share/`) or
//! a Proton-style bundle: an executable `proton` shim next to a `dist/` or
//! `files/` payload holding the wine tree.
//!
//! ## Module Structure
//! - `operations/`: layout validation, candidate scanning

mod operations;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::fsutil::{expand_user, is_flagexec, is_win32exec};
use crate::winpath::is_windows_path;

pub use operations::{distribution_candidates, validate};

pub const REQUIRED_DIRS: [&str; 4] = ["bin", "lib", "lib64", "share"];
pub const REQUIRED_BINS: [&str; 5] = [
    "wine",
    "wine64",
    "wineserver",
    "wine-preloader",
    "wine64-preloader",
];
pub const PROTON_SHIM: &str = "proton";

/// Payload directories of bundle-style installs, old layout first.
pub const PAYLOAD_DIRS: [&str; 2] = ["dist", "files"];

/// Programs the runtime ships, accepted by name.
pub const BUILTIN_COMMANDS: [&str; 10] = [
    "winecfg",
    "uninstaller",
    "regedit",
    "winetricks",
    "wineconsole",
    "notepad",
    "winefile",
    "taskmgr",
    "control",
    "msiexec",
];

/// Something the runtime can be asked to execute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Executable {
    Builtin(String),
    File(PathBuf),
}

/// Details only bundle-style distributions have.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProtonInfo {
    pub shim: PathBuf,
    /// Second field of the bundle's `version` file (`1700000000 proton-8.0-5`)
    pub version: Option<String>,
}

#[derive(Debug)]
pub struct Distribution {
    root: PathBuf,
    winedist: PathBuf,
    is_proton: bool,
    proton_info: OnceLock<Option<ProtonInfo>>,
}

impl Distribution {
    /// Open the distribution rooted at `root`.
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let expanded = expand_user(root.as_ref());
        let root = expanded
            .canonicalize()
            .map_err(|_| Error::NotADirectory(expanded.clone()))?;
        if !root.is_dir() {
            return Err(Error::NotADirectory(root));
        }

        let is_proton = is_flagexec(&root.join(PROTON_SHIM));
        let winedist = if is_proton {
            PAYLOAD_DIRS
                .iter()
                .map(|d| root.join(d))
                .find(|p| validate(p))
                .ok_or_else(|| Error::InvalidDistribution(root.clone()))?
        } else if validate(&root) {
            root.clone()
        } else {
            return Err(Error::InvalidDistribution(root));
        };

        info!(
            "wine distribution at {} ({})",
            winedist.display(),
            if is_proton { "proton" } else { "plain" }
        );
        Ok(Self {
            root,
            winedist,
            is_proton,
            proton_info: OnceLock::new(),
        })
    }

    /// Check a plain wine layout without constructing anything.
    pub fn validate(path: impl AsRef<Path>) -> bool {
        validate(path.as_ref())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding `bin/`, `lib/`, ...
    pub fn winedist(&self) -> &Path {
        &self.winedist
    }

    pub fn is_proton(&self) -> bool {
        self.is_proton
    }

    /// The `proton` shim, for bundle-style distributions.
    pub fn proton(&self) -> Option<PathBuf> {
        self.is_proton.then(|| self.root.join(PROTON_SHIM))
    }

    pub fn server(&self) -> PathBuf {
        self.winedist.join("bin").join("wineserver")
    }

    pub fn loader(&self) -> PathBuf {
        self.winedist.join("bin").join("wine64")
    }

    /// Bundle details, read on first use.
    pub fn proton_info(&self) -> Option<&ProtonInfo> {
        self.proton_info
            .get_or_init(|| {
                let shim = self.proton()?;
                let version = fs::read_to_string(self.root.join("version"))
                    .ok()
                    .and_then(|v| v.split_whitespace().nth(1).map(str::to_string));
                debug!("proton bundle {} version {:?}", self.root.display(), version);
                Some(ProtonInfo { shim, version })
            })
            .as_ref()
    }

    /// Decide whether `path` is something the runtime can execute.
    ///
    /// Built-in command names are accepted as is; other paths must resolve
    /// to a file with a Windows executable extension.
    pub fn check_executable(path: impl AsRef<Path>) -> Result<Option<Executable>> {
        let path = path.as_ref();
        let raw = path.to_string_lossy();
        if is_windows_path(&raw) {
            return Err(Error::NotAPosixPath(raw.into_owned()));
        }
        if let Some(name) = path.file_name().and_then(|n| n.to_str())
            && BUILTIN_COMMANDS.contains(&name)
        {
            return Ok(Some(Executable::Builtin(name.to_string())));
        }
        match path.canonicalize() {
            Ok(resolved) if is_win32exec(&resolved) => Ok(Some(Executable::File(resolved))),
            _ => Ok(None),
        }
    }
}

impl PartialEq for Distribution {
    fn eq(&self, other: &Self) -> bool {
        self.root == other.root && self.winedist == other.winedist
    }
}

impl Eq for Distribution {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{make_dist, make_exec, make_proton};

    #[test]
    fn test_plain_distribution() {
        let dir = tempfile::tempdir().unwrap();
        let root = make_dist(&dir.path().canonicalize().unwrap());
        let dist = Distribution::new(&root).unwrap();

        assert!(!dist.is_proton());
        assert_eq!(dist.winedist(), root);
        assert_eq!(dist.loader(), root.join("bin/wine64"));
        assert_eq!(dist.server(), root.join("bin/wineserver"));
        assert_eq!(dist.proton(), None);
        assert_eq!(dist.proton_info(), None);
    }

    #[test]
    fn test_proton_files_layout() {
        let dir = tempfile::tempdir().unwrap();
        let root = make_proton(&dir.path().canonicalize().unwrap(), "files");
        std::fs::write(root.join("version"), "1700000000 proton-8.0-5\n").unwrap();
        let dist = Distribution::new(&root).unwrap();

        assert!(dist.is_proton());
        assert_eq!(dist.winedist(), root.join("files"));
        assert_eq!(dist.loader(), root.join("files/bin/wine64"));
        assert_eq!(dist.proton(), Some(root.join("proton")));
        let info = dist.proton_info().unwrap();
        assert_eq!(info.version.as_deref(), Some("proton-8.0-5"));
    }

    #[test]
    fn test_proton_old_dist_layout_wins() {
        let dir = tempfile::tempdir().unwrap();
        let root = make_proton(&dir.path().canonicalize().unwrap(), "dist");
        make_dist(&root.join("files"));
        let dist = Distribution::new(&root).unwrap();
        assert_eq!(dist.winedist(), root.join("dist"));
    }

    #[test]
    fn test_proton_without_payload_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        make_exec(&dir.path().join("proton"));
        make_dist(dir.path());
        // a valid tree at the root doesn't count once the shim is there
        assert!(matches!(
            Distribution::new(dir.path()),
            Err(Error::InvalidDistribution(_))
        ));
    }

    #[test]
    fn test_not_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("wine");
        std::fs::write(&file, "").unwrap();
        assert!(matches!(
            Distribution::new(&file),
            Err(Error::NotADirectory(_))
        ));
        assert!(matches!(
            Distribution::new(dir.path().join("missing")),
            Err(Error::NotADirectory(_))
        ));
        assert!(matches!(
            Distribution::new(dir.path()),
            Err(Error::InvalidDistribution(_))
        ));
    }

    #[test]
    fn test_check_executable() {
        let dir = tempfile::tempdir().unwrap();
        let exe = dir.path().join("setup.exe");
        std::fs::write(&exe, "MZ").unwrap();
        let so = dir.path().join("libfoo.so");
        std::fs::write(&so, "").unwrap();

        assert_eq!(
            Distribution::check_executable("winecfg").unwrap(),
            Some(Executable::Builtin("winecfg".into()))
        );
        assert_eq!(
            Distribution::check_executable("/somewhere/regedit").unwrap(),
            Some(Executable::Builtin("regedit".into()))
        );
        assert_eq!(
            Distribution::check_executable(&exe).unwrap(),
            Some(Executable::File(exe.canonicalize().unwrap()))
        );
        assert_eq!(Distribution::check_executable(&so).unwrap(), None);
        assert!(matches!(
            Distribution::check_executable("C:\\setup.exe"),
            Err(Error::NotAPosixPath(_))
        ));
    }
}
