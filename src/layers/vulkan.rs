//! Vulkan implicit layers shipped outside the system prefix

use std::path::PathBuf;

use crate::env::EnvLayer;
use crate::error::Result;
use crate::layers::LayerSource;
use crate::layers::operations::{data_dir, find_library_dirs, require_file};

/// Library dirs plus the data dir holding the layer manifest.
fn implicit_layer(root: &std::path::Path, library: &str) -> Result<EnvLayer> {
    let libs = find_library_dirs(root, library)?;
    let mut layer = EnvLayer::new();
    if let Some(first) = libs.first() {
        layer.set("XDG_DATA_DIRS", vec![data_dir(first)?])?;
    }
    layer.set("LD_LIBRARY_PATH", libs)?;
    Ok(layer)
}

/// vkBasalt post-processing layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VkBasaltLayer {
    pub root: PathBuf,
    pub config_file: Option<PathBuf>,
}

impl VkBasaltLayer {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            config_file: None,
        }
    }

    pub fn with_config(mut self, config_file: impl Into<PathBuf>) -> Self {
        self.config_file = Some(config_file.into());
        self
    }
}

impl LayerSource for VkBasaltLayer {
    fn name(&self) -> &'static str {
        "vkbasalt"
    }

    fn build(&self) -> Result<EnvLayer> {
        let mut layer = implicit_layer(&self.root, "libvkbasalt")?;
        layer.set("ENABLE_VKBASALT", 1u32)?;
        if let Some(config) = &self.config_file {
            require_file(config)?;
            layer.set("VKBASALT_CONFIG_FILE", config.as_path())?;
        }
        Ok(layer)
    }
}

/// libstrangle frame limiter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LibStrangleLayer {
    pub root: PathBuf,
}

impl LibStrangleLayer {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl LayerSource for LibStrangleLayer {
    fn name(&self) -> &'static str {
        "libstrangle"
    }

    fn build(&self) -> Result<EnvLayer> {
        let mut layer = implicit_layer(&self.root, "libstrangle")?;
        layer.set("ENABLE_VK_LAYER_TORKEL104_libstrangle", 1u32)?;
        Ok(layer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::fs;
    use std::path::Path;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn test_vkbasalt_layer() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("usr/local");
        touch(&root.join("lib/x86_64-linux-gnu/libvkbasalt.so"));
        fs::create_dir_all(root.join("share/vulkan/implicit_layer.d")).unwrap();
        let conf = dir.path().join("vkBasalt.conf");

        let missing = VkBasaltLayer::new(&root).with_config(&conf).build();
        assert!(matches!(missing, Err(Error::FileNotFound(_))));

        fs::write(&conf, "effects = cas\n").unwrap();
        let env = VkBasaltLayer::new(&root).with_config(&conf).build().unwrap().env();
        assert_eq!(env["ENABLE_VKBASALT"], "1");
        assert_eq!(env["VKBASALT_CONFIG_FILE"], conf.display().to_string());
        assert_eq!(
            env["LD_LIBRARY_PATH"],
            root.join("lib/x86_64-linux-gnu").display().to_string()
        );
        assert_eq!(env["XDG_DATA_DIRS"], root.join("share").display().to_string());
    }

    #[test]
    fn test_libstrangle_layer() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("lib64/libstrangle_vk.so"));
        fs::create_dir_all(dir.path().join("share")).unwrap();

        let env = LibStrangleLayer::new(dir.path()).build().unwrap().env();
        assert_eq!(env["ENABLE_VK_LAYER_TORKEL104_libstrangle"], "1");
        assert_eq!(env["LD_LIBRARY_PATH"], dir.path().join("lib64").display().to_string());
    }
}
