//! Ready-made environment layers
//!
//! Each source builds an [`EnvLayer`] for one concern; the context merges
//! them in the order they are added.
//!
//! ## Module Structure
//! - `system.rs`: Sync toggles, terminal, host session variables
//! - `steam.rs`: Steam client and media transcoding variables
//! - `mesa.rs`: Mesa drivers and Vulkan ICDs
//! - `vulkan.rs`: vkBasalt and libstrangle implicit layers
//! - `dxvk.rs`: DXVK settings and bundled version
//! - `operations/`: Library, data dir and manifest lookups

mod dxvk;
mod mesa;
mod operations;
mod steam;
mod system;
mod vulkan;

use crate::env::EnvLayer;
use crate::error::Result;

pub use dxvk::{DxvkLayer, dxvk_version};
pub use mesa::MesaLayer;
pub use operations::{data_dir, find_icd_files, find_library_dirs, find_named_dirs};
pub use steam::{PRESSURE_VESSEL_LIBS, SteamLayer};
pub use system::SystemLayer;
pub use vulkan::{LibStrangleLayer, VkBasaltLayer};

/// Something that can produce an environment layer.
pub trait LayerSource {
    /// Short name for logs
    fn name(&self) -> &'static str;

    fn build(&self) -> Result<EnvLayer>;
}
