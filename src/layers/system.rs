//! Host toggles and session variables

use std::env;

use serde::{Deserialize, Serialize};

use crate::env::EnvLayer;
use crate::error::Result;
use crate::layers::LayerSource;

/// Generic sync and address-space toggles plus the host session variables
/// a guest needs (`XDG_*`, `HOME`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SystemLayer {
    pub esync: bool,
    pub fsync: bool,
    pub large_address_aware: bool,
    pub term: String,
}

impl Default for SystemLayer {
    fn default() -> Self {
        Self {
            esync: true,
            fsync: false,
            large_address_aware: true,
            term: "xterm".to_string(),
        }
    }
}

impl SystemLayer {
    /// Build against an arbitrary host environment.
    pub fn build_with(&self, host: impl Fn(&str) -> Option<String>) -> Result<EnvLayer> {
        let mut layer = EnvLayer::new();
        layer.set("ESYNC", self.esync)?;
        layer.set("FSYNC", self.fsync)?;
        layer.set("LARGE_ADDRESS_AWARE", self.large_address_aware)?;
        layer.set("TERM", self.term.as_str())?;

        if let Some(dirs) = host("XDG_DATA_DIRS") {
            let dirs: Vec<&str> = dirs.split(':').filter(|d| !d.is_empty()).collect();
            layer.set("XDG_DATA_DIRS", dirs)?;
        }
        for key in ["XDG_RUNTIME_DIR", "HOME"] {
            if let Some(value) = host(key) {
                layer.set(key, value)?;
            }
        }
        Ok(layer)
    }
}

impl LayerSource for SystemLayer {
    fn name(&self) -> &'static str {
        "system"
    }

    fn build(&self) -> Result<EnvLayer> {
        self.build_with(|key| env::var(key).ok())
    }
}
