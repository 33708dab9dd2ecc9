use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::context::{LaunchMode, LaunchOptions, ProtonRunMode};
use crate::drives::UnknownDrivePolicy;
use crate::env::{EnvValue, ToggleRule};
use crate::layers::{DxvkLayer, SystemLayer};

/// `config.yaml`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WinebridgeConfig {
    /// Distribution root; discovered when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dist: Option<PathBuf>,
    /// Prefix root; discovered when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<PathBuf>,
    pub launch: LaunchMode,
    pub proton_run_mode: ProtonRunMode,
    pub use_steam: bool,
    pub wrapper: Vec<String>,
    pub unknown_drive: UnknownDrivePolicy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<SystemLayer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dxvk: Option<DxvkLayer>,
    /// Toggle expansions on top of ESYNC/FSYNC/LARGE_ADDRESS_AWARE
    pub toggles: Vec<ToggleRule>,
    /// Variables merged last
    pub env: BTreeMap<String, EnvValue>,
    /// Keys of `env` whose lists replace instead of append
    pub clear: Vec<String>,
}

impl WinebridgeConfig {
    pub fn launch_options(&self) -> LaunchOptions {
        LaunchOptions {
            mode: self.launch,
            run_mode: self.proton_run_mode,
            use_steam: self.use_steam,
            wrapper: self.wrapper.clone(),
        }
    }
}
