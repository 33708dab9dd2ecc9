//! DXVK tuning variables

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::dist::Distribution;
use crate::env::EnvLayer;
use crate::error::{Error, Result};
use crate::layers::LayerSource;

/// `DXVK_*` settings; unset fields are left to DXVK's defaults.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DxvkLayer {
    /// `disable` or `reset`
    pub state_cache: Option<String>,
    pub state_cache_path: Option<PathBuf>,
    #[serde(rename = "async")]
    pub async_pipelines: Option<bool>,
    pub hud: Option<String>,
    pub config_file: Option<PathBuf>,
    pub log_path: Option<PathBuf>,
    pub log_level: Option<String>,
}

impl LayerSource for DxvkLayer {
    fn name(&self) -> &'static str {
        "dxvk"
    }

    fn build(&self) -> Result<EnvLayer> {
        let mut layer = EnvLayer::new();
        if let Some(v) = &self.state_cache {
            layer.set("DXVK_STATE_CACHE", v.as_str())?;
        }
        if let Some(v) = &self.state_cache_path {
            layer.set("DXVK_STATE_CACHE_PATH", v.as_path())?;
        }
        if let Some(v) = self.async_pipelines {
            layer.set("DXVK_ASYNC", v)?;
        }
        if let Some(v) = &self.hud {
            layer.set("DXVK_HUD", v.as_str())?;
        }
        if let Some(v) = &self.config_file {
            layer.set("DXVK_CONFIG_FILE", v.as_path())?;
        }
        if let Some(v) = &self.log_path {
            layer.set("DXVK_LOG_PATH", v.as_path())?;
        }
        if let Some(v) = &self.log_level {
            layer.set("DXVK_LOG_LEVEL", v.as_str())?;
        }
        Ok(layer)
    }
}

/// DXVK version bundled with a distribution, from `lib64/wine/dxvk/version`.
///
/// The file holds a line like `<hash> dxvk (v2.3-25-g1a2b3c4)`.
pub fn dxvk_version(dist: &Distribution) -> Result<String> {
    let file = dist.winedist().join("lib64/wine/dxvk/version");
    let text = fs::read_to_string(&file).map_err(|_| Error::FileNotFound(file.clone()))?;
    text.lines()
        .next()
        .and_then(|line| line.split_once("dxvk"))
        .map(|(_, rest)| rest.trim())
        .map(|rest| rest.trim_start_matches('(').trim_start_matches('v').trim_end_matches(')'))
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| Error::Config(format!("unrecognised dxvk version file {}", file.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::make_proton;

    #[test]
    fn test_dxvk_layer() {
        let layer = DxvkLayer {
            async_pipelines: Some(true),
            hud: Some("fps,version".into()),
            log_level: Some("none".into()),
            ..Default::default()
        }
        .build()
        .unwrap();
        let env = layer.env();
        assert_eq!(env.len(), 3);
        assert_eq!(env["DXVK_ASYNC"], "1");
        assert_eq!(env["DXVK_HUD"], "fps,version");
        assert_eq!(env["DXVK_LOG_LEVEL"], "none");
    }

    #[test]
    fn test_dxvk_version() {
        let dir = tempfile::tempdir().unwrap();
        let root = make_proton(dir.path(), "files");
        let dist = Distribution::new(&root).unwrap();
        assert!(matches!(dxvk_version(&dist), Err(Error::FileNotFound(_))));

        let dxvk = root.join("files/lib64/wine/dxvk");
        fs::create_dir_all(&dxvk).unwrap();
        fs::write(dxvk.join("version"), "3f1b2c4 dxvk (v2.3-25-g1a2b3c4)\n").unwrap();
        assert_eq!(dxvk_version(&dist).unwrap(), "2.3-25-g1a2b3c4");
    }
}
