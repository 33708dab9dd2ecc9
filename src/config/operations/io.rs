use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::types::WinebridgeConfig;
use crate::error::{Error, Result};

/// `$XDG_CONFIG_HOME/winebridge/config.yaml`, falling back to `~/.config`.
pub fn default_config_path() -> Option<PathBuf> {
    let base = env::var_os("XDG_CONFIG_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| home::home_dir().map(|h| h.join(".config")))?;
    Some(base.join("winebridge").join("config.yaml"))
}

/// Read the configuration at `path`. A missing or empty file gives the
/// defaults; anything unparsable is an error.
pub fn load_cfg(path: &Path) -> Result<WinebridgeConfig> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("no config at {}, using defaults", path.display());
            return Ok(WinebridgeConfig::default());
        }
        Err(e) => return Err(e.into()),
    };
    if text.trim().is_empty() {
        return Ok(WinebridgeConfig::default());
    }
    serde_yaml::from_str(&text).map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
}

pub fn save_cfg(path: &Path, config: &WinebridgeConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_yaml::to_string(config)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{LaunchMode, ProtonRunMode};
    use crate::drives::UnknownDrivePolicy;
    use crate::env::EnvValue;

    #[test]
    fn test_missing_and_empty_files_give_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        assert_eq!(load_cfg(&path).unwrap(), WinebridgeConfig::default());
        fs::write(&path, "\n").unwrap();
        assert_eq!(load_cfg(&path).unwrap(), WinebridgeConfig::default());
    }

    #[test]
    fn test_load_full_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(
            &path,
            r#"
dist: ~/.steam/steam/compatibilitytools.d/GE-Proton9-20
prefix: /games/pfx
launch: proton
proton_run_mode: waitforexitandrun
unknown_drive: error
system:
  esync: false
  fsync: true
dxvk:
  hud: fps
  async: true
toggles:
  - toggle: NTSYNC
    target: WINENTSYNC
    companion: PROTON_USE_NTSYNC
env:
  DXVK_LOG_LEVEL: none
  WINEDLLOVERRIDES: ["d3d11=n", "dxgi=n"]
  PROTON_LOG: 1
  MANGOHUD: true
clear: [WINEDLLOVERRIDES]
"#,
        )
        .unwrap();

        let cfg = load_cfg(&path).unwrap();
        assert_eq!(cfg.prefix, Some(PathBuf::from("/games/pfx")));
        assert_eq!(cfg.launch, LaunchMode::Proton);
        assert_eq!(cfg.proton_run_mode, ProtonRunMode::WaitForExitAndRun);
        assert_eq!(cfg.unknown_drive, UnknownDrivePolicy::Error);
        let system = cfg.system.as_ref().unwrap();
        assert!(!system.esync && system.fsync && system.large_address_aware);
        assert_eq!(system.term, "xterm");
        assert_eq!(cfg.dxvk.as_ref().unwrap().async_pipelines, Some(true));
        assert_eq!(cfg.toggles[0].companion.as_deref(), Some("PROTON_USE_NTSYNC"));
        assert!(!cfg.toggles[0].invert_companion);
        assert_eq!(cfg.env["PROTON_LOG"], EnvValue::Int(1));
        assert_eq!(cfg.env["MANGOHUD"], EnvValue::Bool(true));
        assert_eq!(cfg.env["WINEDLLOVERRIDES"], EnvValue::from(vec!["d3d11=n", "dxgi=n"]));
        assert_eq!(cfg.clear, vec!["WINEDLLOVERRIDES"]);
    }

    #[test]
    fn test_malformed_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "launch: sideways\n").unwrap();
        assert!(matches!(load_cfg(&path), Err(Error::Config(_))));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/config.yaml");
        let cfg = WinebridgeConfig {
            use_steam: true,
            wrapper: vec!["gamemoderun".into()],
            ..Default::default()
        };
        save_cfg(&path, &cfg).unwrap();
        assert_eq!(load_cfg(&path).unwrap(), cfg);
    }
}
