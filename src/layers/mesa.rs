//! Out-of-tree Mesa graphics drivers

use std::path::PathBuf;

use tracing::debug;

use crate::env::EnvLayer;
use crate::error::{Error, Result};
use crate::layers::LayerSource;
use crate::layers::operations::{data_dir, find_icd_files, find_library_dirs};

/// Point the loader, EGL/GL and Vulkan at a Mesa build outside the system
/// library path.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MesaLayer {
    /// Mesa install prefix
    pub mesa: Option<PathBuf>,
    /// libdrm install prefix
    pub libdrm: Option<PathBuf>,
    /// Vulkan drivers to expose (`radeon`, `intel`, ...)
    pub vk_drivers: Vec<String>,
}

impl MesaLayer {
    pub fn new(mesa: impl Into<PathBuf>) -> Self {
        Self {
            mesa: Some(mesa.into()),
            ..Self::default()
        }
    }

    pub fn with_libdrm(mut self, libdrm: impl Into<PathBuf>) -> Self {
        self.libdrm = Some(libdrm.into());
        self
    }

    pub fn with_vk_driver(mut self, driver: impl Into<String>) -> Self {
        self.vk_drivers.push(driver.into());
        self
    }
}

impl LayerSource for MesaLayer {
    fn name(&self) -> &'static str {
        "mesa"
    }

    fn build(&self) -> Result<EnvLayer> {
        let mut layer = EnvLayer::new();

        if let Some(mesa) = &self.mesa {
            let libs = find_library_dirs(mesa, "mesa")?;
            let first = libs.first().cloned().ok_or_else(|| Error::LibraryNotFound {
                name: "mesa".to_string(),
                root: mesa.clone(),
            })?;
            layer.set("XDG_DATA_DIRS", vec![data_dir(&first)?])?;
            layer.set("LD_LIBRARY_PATH", libs)?;
            layer.set("EGL_DRIVERS_PATH", first.as_path())?;
            layer.set("LIBGL_DRIVERS_PATH", first)?;
            layer.set("ANV_GPL", "true")?;

            let mut icds = Vec::new();
            for driver in &self.vk_drivers {
                icds.extend(find_icd_files(mesa, driver)?);
            }
            if !icds.is_empty() {
                layer.set("VK_ICD_FILENAMES", icds)?;
            }
        } else if !self.vk_drivers.is_empty() {
            debug!("vulkan drivers {:?} ignored without a mesa prefix", self.vk_drivers);
        }

        if let Some(libdrm) = &self.libdrm {
            layer.set("LD_LIBRARY_PATH", find_library_dirs(libdrm, "libdrm")?)?;
        }
        Ok(layer)
    }
}
