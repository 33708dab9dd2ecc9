//! Configuration file
//!
//! ## Module Structure
//! - `types.rs`: WinebridgeConfig
//! - `operations/`: Loading and saving YAML

mod operations;
mod types;

use std::sync::Arc;

use tracing::debug;

use crate::context::Context;
use crate::env::ToggleHook;
use crate::error::Result;

pub use operations::{default_config_path, load_cfg, save_cfg};
pub use types::WinebridgeConfig;

impl WinebridgeConfig {
    /// Apply layers, toggles, overrides and the drive policy to `ctx`.
    pub fn apply(&self, ctx: &mut Context) -> Result<()> {
        ctx.set_unknown_drive_policy(self.unknown_drive);
        if let Some(system) = &self.system {
            ctx.add_layer(system)?;
        }
        if let Some(dxvk) = &self.dxvk {
            ctx.add_layer(dxvk)?;
        }
        if !self.toggles.is_empty() {
            let hook = ToggleHook::new(self.toggles.clone(), ctx.is_proton());
            ctx.add_hook(Arc::new(hook));
        }
        let clear: Vec<&str> = self.clear.iter().map(String::as_str).collect();
        ctx.update(self.env.iter(), &clear);
        debug!("config applied: {} overrides", self.env.len());
        Ok(())
    }
}
