//! Well-known places where runtimes and prefixes live

use std::env;
use std::path::PathBuf;

use tracing::debug;

/// Directories searched for a `wine` binary besides `$PATH`.
pub const SYSTEM_BIN_DIRS: [&str; 3] = ["/usr/bin", "/usr/local/bin", "/opt/bin"];

/// Inputs for auto-discovery.
///
/// [`SearchPaths::from_env`] reads the live environment; the builder methods
/// exist so callers can point discovery somewhere else.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchPaths {
    pub home: Option<PathBuf>,
    pub path_env: Vec<PathBuf>,
    pub system_bins: Vec<PathBuf>,
    pub wineprefix: Option<PathBuf>,
    pub steam_libraries: Vec<PathBuf>,
}

impl SearchPaths {
    pub fn from_env() -> Self {
        let path_env = env::var_os("PATH")
            .map(|v| env::split_paths(&v).collect())
            .unwrap_or_default();
        let wineprefix = env::var_os("WINEPREFIX")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        Self {
            home: home::home_dir(),
            path_env,
            system_bins: SYSTEM_BIN_DIRS.iter().map(PathBuf::from).collect(),
            wineprefix,
            steam_libraries: steam_libraries(),
        }
    }

    pub fn with_home(mut self, home: impl Into<PathBuf>) -> Self {
        self.home = Some(home.into());
        self
    }

    pub fn with_path_entry(mut self, dir: impl Into<PathBuf>) -> Self {
        self.path_env.push(dir.into());
        self
    }

    pub fn with_wineprefix(mut self, prefix: impl Into<PathBuf>) -> Self {
        self.wineprefix = Some(prefix.into());
        self
    }

    pub fn with_steam_library(mut self, library: impl Into<PathBuf>) -> Self {
        self.steam_libraries.push(library.into());
        self
    }

    /// Directories that may hold a `wine` binary, first occurrence kept.
    pub fn bin_dirs(&self) -> Vec<PathBuf> {
        let mut dirs = Vec::new();
        let local_bin = self.home.as_ref().map(|h| h.join(".local/bin"));
        for dir in self
            .path_env
            .iter()
            .chain(self.system_bins.iter())
            .chain(local_bin.iter())
        {
            if !dir.as_os_str().is_empty() && !dirs.contains(dir) {
                dirs.push(dir.clone());
            }
        }
        dirs
    }

    /// Directories whose children may be Proton-style distributions.
    pub fn depot_dirs(&self) -> Vec<PathBuf> {
        let mut dirs = Vec::new();
        if let Some(home) = &self.home {
            dirs.push(home.join(".steam/steam/compatibilitytools.d"));
            dirs.push(home.join(".local/share/Steam/compatibilitytools.d"));
        }
        for library in &self.steam_libraries {
            let common = library.join("steamapps/common");
            if !dirs.contains(&common) {
                dirs.push(common);
            }
        }
        dirs
    }

    /// Candidate prefix roots: `$WINEPREFIX`, `~/.wine`, `~/.wine64`.
    pub fn prefix_dirs(&self) -> Vec<PathBuf> {
        let mut dirs = Vec::new();
        if let Some(pfx) = &self.wineprefix {
            dirs.push(pfx.clone());
        }
        if let Some(home) = &self.home {
            dirs.push(home.join(".wine"));
            dirs.push(home.join(".wine64"));
        }
        dirs
    }
}

/// Every Steam library folder steamlocate can find.
fn steam_libraries() -> Vec<PathBuf> {
    let mut folders = Vec::new();
    if let Ok(steam_dir) = steamlocate::SteamDir::locate() {
        folders.push(steam_dir.path().to_path_buf());
        if let Ok(libraries) = steam_dir.libraries() {
            for library in libraries.flatten() {
                let path = library.path().to_path_buf();
                if !folders.contains(&path) {
                    folders.push(path);
                }
            }
        }
    }
    debug!("steam libraries: {:?}", folders);
    folders
}
