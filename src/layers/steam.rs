//! Variables a game expects when Steam launches it through Proton

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::env::EnvLayer;
use crate::error::Result;
use crate::layers::LayerSource;
use crate::layers::operations::{find_named_dirs, require_dir};

/// Pressure-vessel library overrides of the Steam runtime.
pub const PRESSURE_VESSEL_LIBS: [&str; 4] = [
    "/usr/lib/pressure-vessel/overrides/lib/x86_64-linux-gnu",
    "/usr/lib/pressure-vessel/overrides/lib/x86_64-linux-gnu/aliases",
    "/usr/lib/pressure-vessel/overrides/lib/i386-linux-gnu",
    "/usr/lib/pressure-vessel/overrides/lib/i386-linux-gnu/aliases",
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SteamLayer {
    /// Steam install root (the directory holding `steamapps/`)
    pub steam_root: PathBuf,
    pub app_id: u32,
    /// Wine tree of the Proton build in use
    pub winedist: PathBuf,
    /// Home used for the Vulkan implicit layer lookup
    pub home: Option<PathBuf>,
}

impl SteamLayer {
    pub fn new(steam_root: impl Into<PathBuf>, app_id: u32, winedist: impl Into<PathBuf>) -> Self {
        Self {
            steam_root: steam_root.into(),
            app_id,
            winedist: winedist.into(),
            home: home::home_dir(),
        }
    }

    pub fn compat_data(&self) -> PathBuf {
        self.steam_root
            .join("steamapps/compatdata")
            .join(self.app_id.to_string())
    }

    fn shader_cache(&self) -> PathBuf {
        self.steam_root
            .join("steamapps/shadercache")
            .join(self.app_id.to_string())
    }
}

fn path_str(p: &Path) -> String {
    p.to_string_lossy().into_owned()
}

impl LayerSource for SteamLayer {
    fn name(&self) -> &'static str {
        "steam"
    }

    fn build(&self) -> Result<EnvLayer> {
        let compat_data = self.compat_data();
        require_dir(&self.steam_root)?;
        require_dir(&compat_data)?;
        require_dir(&self.winedist)?;

        let mut layer = EnvLayer::new();
        layer.set("SteamGameId", self.app_id)?;
        layer.set("SteamAppId", self.app_id)?;
        layer.set("STEAM_COMPAT_CLIENT_INSTALL_PATH", self.steam_root.as_path())?;
        layer.set("STEAM_COMPAT_DATA_PATH", compat_data.as_path())?;

        let cache = self.shader_cache();
        layer.set("MEDIACONV_AUDIO_DUMP_FILE", cache.join("fozmediav1/audiov2.foz"))?;
        layer.set("MEDIACONV_AUDIO_TRANSCODED_FILE", cache.join("transcoded_audio.foz"))?;
        layer.set("MEDIACONV_VIDEO_DUMP_FILE", cache.join("fozmediav1/video.foz"))?;
        layer.set("MEDIACONV_VIDEO_TRANSCODED_FILE", cache.join("transcoded_video.foz"))?;

        layer.set("LD_LIBRARY_PATH", PRESSURE_VESSEL_LIBS.to_vec())?;
        layer.set("WINEDLLOVERRIDES", vec!["steam.exe=b"])?;
        layer.add_list_separator("WINEDLLOVERRIDES", ';');

        match find_named_dirs(&compat_data, "gstreamer-1.0").first() {
            Some(registry) => layer.set("WINE_GST_REGISTRY_DIR", registry.as_path())?,
            None => debug!("no gstreamer registry under {}", compat_data.display()),
        }
        let plugins: Vec<String> = find_named_dirs(&self.winedist, "gstreamer-1.0")
            .iter()
            .map(|p| path_str(p))
            .collect();
        layer.set("GST_PLUGIN_SYSTEM_PATH_1_0", plugins)?;

        if let Some(home) = &self.home {
            layer.set("XDG_DATA_DIRS", vec![path_str(&home.join(".local/share"))])?;
        }
        Ok(layer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::EnvValue;
    use crate::error::Error;
    use std::fs;

    #[test]
    fn test_steam_layer() {
        let dir = tempfile::tempdir().unwrap();
        let steam = dir.path().join("steam");
        let dist = dir.path().join("Proton/files");
        fs::create_dir_all(steam.join("steamapps/compatdata/489830/pfx/gstreamer-1.0")).unwrap();
        fs::create_dir_all(dist.join("lib64/gstreamer-1.0")).unwrap();

        let mut source = SteamLayer::new(&steam, 489830, &dist);
        source.home = Some(PathBuf::from("/home/gamer"));
        let layer = source.build().unwrap();
        let env = layer.env();

        assert_eq!(env["SteamAppId"], "489830");
        assert_eq!(env["SteamGameId"], "489830");
        assert_eq!(
            env["STEAM_COMPAT_DATA_PATH"],
            path_str(&steam.join("steamapps/compatdata/489830"))
        );
        assert_eq!(
            env["MEDIACONV_VIDEO_DUMP_FILE"],
            path_str(&steam.join("steamapps/shadercache/489830/fozmediav1/video.foz"))
        );
        assert_eq!(env["WINEDLLOVERRIDES"], "steam.exe=b");
        assert_eq!(
            env["WINE_GST_REGISTRY_DIR"],
            path_str(&steam.join("steamapps/compatdata/489830/pfx/gstreamer-1.0"))
        );
        assert_eq!(
            env["GST_PLUGIN_SYSTEM_PATH_1_0"],
            path_str(&dist.join("lib64/gstreamer-1.0"))
        );
        assert_eq!(env["XDG_DATA_DIRS"], "/home/gamer/.local/share");
        assert_eq!(
            layer.get("LD_LIBRARY_PATH").and_then(EnvValue::as_list).map(|l| l.len()),
            Some(4)
        );
    }

    #[test]
    fn test_steam_layer_requires_compat_data() {
        let dir = tempfile::tempdir().unwrap();
        let source = SteamLayer::new(dir.path(), 10, dir.path());
        assert!(matches!(source.build(), Err(Error::NotADirectory(_))));
    }
}
