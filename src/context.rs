//! Launch contexts
//!
//! A [`Context`] ties one distribution and one prefix together with the
//! environment they need. The identity variables (`WINEDIST`, `WINELOADER`,
//! `WINEPREFIX`, `WINESERVER`, `WINEARCH`) are seeded once and locked; the
//! remaining defaults stay mutable and further layers merge on top.
//!
//! ## Module Structure
//! - `types.rs`: LaunchMode, ProtonRunMode, LaunchOptions
//! - `toggles.rs`: Default toggle expansion rules
//! - `registry.rs`: ContextRegistry (registered contexts, default pointer)

mod registry;
mod toggles;
mod types;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use tracing::{debug, info, warn};

use crate::dist::Distribution;
use crate::drives::{DriveMapping, MountSource, SystemMounts, UnknownDrivePolicy};
use crate::env::{EnvHook, EnvLayer, EnvValue, ToggleHook, ToggleRule};
use crate::error::Result;
use crate::layers::LayerSource;
use crate::prefix::Prefix;
use crate::winpath::{UPath, WinePath};

pub use registry::ContextRegistry;
pub use toggles::default_toggle_rules;
pub use types::{LaunchMode, LaunchOptions, ProtonRunMode};

pub const PROTECTED_KEYS: [&str; 5] = [
    "WINEDIST",
    "WINELOADER",
    "WINEPREFIX",
    "WINESERVER",
    "WINEARCH",
];

/// Guest path of the Steam client inside a prefix.
pub const GUEST_STEAM_EXE: &str = "c:\\windows\\system32\\steam.exe";

#[derive(Debug)]
pub struct Context {
    dist: Arc<Distribution>,
    prefix: Arc<Prefix>,
    layer: EnvLayer,
    drives: RwLock<DriveMapping>,
}

impl Context {
    /// Context over the live host mount table.
    pub fn new(dist: Arc<Distribution>, prefix: Arc<Prefix>) -> Result<Self> {
        Self::with_mounts(dist, prefix, Arc::new(SystemMounts))
    }

    /// Open both roots and build a context over the live mount table.
    pub fn open(dist_root: impl AsRef<Path>, prefix_root: impl AsRef<Path>) -> Result<Self> {
        let dist = Arc::new(Distribution::new(dist_root)?);
        let prefix = Arc::new(Prefix::new(prefix_root)?);
        Self::new(dist, prefix)
    }

    pub fn with_mounts(
        dist: Arc<Distribution>,
        prefix: Arc<Prefix>,
        mounts: Arc<dyn MountSource>,
    ) -> Result<Self> {
        let drives = prefix.drive_mapping(mounts)?;
        let winedist = dist.winedist().to_path_buf();

        let mut layer = EnvLayer::with_protected(PROTECTED_KEYS);
        layer.add_list_separator("WINEDLLOVERRIDES", ';');
        layer.add_hook(Arc::new(ToggleHook::new(
            default_toggle_rules(),
            dist.is_proton(),
        )));

        layer.set("WINEDIST", winedist.as_path())?;
        layer.set("WINELOADER", dist.loader())?;
        layer.set("WINEPREFIX", prefix.pfx())?;
        layer.set("WINESERVER", dist.server())?;
        layer.set("WINEARCH", prefix.arch().unwrap_or_default())?;
        layer.lock();

        layer.set("WINEPATH", "")?;
        layer.set(
            "WINEDLLPATH",
            vec![winedist.join("lib64/wine"), winedist.join("lib/wine")],
        )?;
        layer.set("WINEDLLOVERRIDES", Vec::<String>::new())?;
        layer.set(
            "PATH",
            vec![
                winedist.join("bin"),
                PathBuf::from("/usr/bin"),
                PathBuf::from("/bin"),
            ],
        )?;
        layer.set(
            "LD_LIBRARY_PATH",
            vec![winedist.join("lib64"), winedist.join("lib")],
        )?;
        layer.set("TERM", "xterm")?;
        layer.set("WINEDEBUG", "-all,-fixme,-server")?;

        info!(
            "context: {} on {}",
            dist.root().display(),
            prefix.root().display()
        );
        Ok(Self {
            dist,
            prefix,
            layer,
            drives: RwLock::new(drives),
        })
    }

    pub fn dist(&self) -> &Arc<Distribution> {
        &self.dist
    }

    pub fn prefix(&self) -> &Arc<Prefix> {
        &self.prefix
    }

    pub fn is_proton(&self) -> bool {
        self.dist.is_proton()
    }

    // Environment

    pub fn layer(&self) -> &EnvLayer {
        &self.layer
    }

    pub fn get(&self, key: &str) -> Option<&EnvValue> {
        self.layer.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<EnvValue>) -> Result<()> {
        self.layer.set(key, value)
    }

    pub fn unset(&mut self, key: &str) -> Result<Option<EnvValue>> {
        self.layer.unset(key)
    }

    /// Merge plain overrides; see [`EnvLayer::update`].
    pub fn update<I, K, V>(&mut self, other: I, clear: &[&str])
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<EnvValue>,
    {
        self.layer.update(other, clear);
    }

    pub fn merge_layer(&mut self, other: &EnvLayer, clear: &[&str]) {
        self.layer.update_layer(other, clear);
    }

    /// Build `source` and merge it on top.
    pub fn add_layer(&mut self, source: &dyn LayerSource) -> Result<()> {
        let layer = source.build()?;
        debug!("merging {} layer ({} variables)", source.name(), layer.len());
        self.layer.update_layer(&layer, &[]);
        Ok(())
    }

    /// Extra toggle expansion on top of the defaults.
    pub fn add_toggle_rule(&mut self, rule: ToggleRule) {
        let hook = ToggleHook::new(vec![rule], self.is_proton());
        self.layer.add_hook(Arc::new(hook));
    }

    pub fn add_hook(&mut self, hook: Arc<dyn EnvHook>) {
        self.layer.add_hook(hook);
    }

    /// Exported environment.
    pub fn env(&self) -> BTreeMap<String, String> {
        self.layer.env()
    }

    /// Whether `launch` really goes through the `proton` shim.
    pub fn uses_proton(&self, launch: &LaunchOptions) -> bool {
        match launch.mode {
            LaunchMode::Loader => false,
            LaunchMode::Proton if self.is_proton() => true,
            LaunchMode::Proton => {
                warn!(
                    "{} is not a proton build, launching through the loader",
                    self.dist.root().display()
                );
                false
            }
        }
    }

    /// Exported environment adjusted for `launch`.
    ///
    /// The `proton` shim wants the compat-data root and a loader named plain
    /// `wine` (it appends `64` itself).
    pub fn launch_env(&self, launch: &LaunchOptions) -> BTreeMap<String, String> {
        let mut env = self.env();
        if self.uses_proton(launch) {
            env.insert(
                "STEAM_COMPAT_DATA_PATH".to_string(),
                self.prefix.root().to_string_lossy().into_owned(),
            );
            env.insert(
                "WINELOADER".to_string(),
                self.dist
                    .winedist()
                    .join("bin/wine")
                    .to_string_lossy()
                    .into_owned(),
            );
        }
        env
    }

    /// `[wrapper..] loader [steam.exe]` or `[wrapper..] proton <run mode>`.
    pub fn command_prefix(&self, launch: &LaunchOptions) -> Vec<String> {
        let mut cmd = launch.wrapper.clone();
        match self.dist.proton() {
            Some(shim) if self.uses_proton(launch) => {
                cmd.push(shim.to_string_lossy().into_owned());
                cmd.push(launch.run_mode.as_str().to_string());
            }
            _ => {
                cmd.push(self.dist.loader().to_string_lossy().into_owned());
                if launch.use_steam {
                    cmd.push(GUEST_STEAM_EXE.to_string());
                }
            }
        }
        cmd
    }

    // Drives

    /// Snapshot of the current drive table.
    pub fn drive_mapping(&self) -> DriveMapping {
        self.drives.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Re-read `dosdevices` and the mount table.
    pub fn refresh_drives(&self) -> Result<()> {
        self.drives
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .refresh()
    }

    pub fn set_unknown_drive_policy(&self, policy: UnknownDrivePolicy) {
        self.drives
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .set_policy(policy);
    }

    pub fn to_windows_path(&self, path: &Path) -> Result<UPath> {
        self.drives
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .to_windows_path(path)
    }

    pub fn to_native_path(&self, path: &UPath) -> Result<PathBuf> {
        self.drives
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .to_native_path(path)
    }

    /// Path usable from both sides of the prefix.
    pub fn wine_path(&self, path: impl Into<UPath>) -> Result<WinePath> {
        let drives = self.drives.read().unwrap_or_else(|e| e.into_inner());
        WinePath::new(&path.into(), &drives)
    }
}
