//! Prefix metadata read from the registry hives

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::prefix::pure::{parse_arch, parse_sections};
use crate::prefix::types::{PrefixMetadata, WinVersion};

const CURRENT_VERSION_KEY: &str = "Software\\Microsoft\\Windows NT\\CurrentVersion";
const DLL_OVERRIDES_KEY: &str = "Software\\Wine\\DllOverrides";

/// Architecture and Windows version from `system.reg`, overrides from
/// `user.reg`. Unreadable hives leave the fields empty.
pub fn read_metadata(pfx: &Path) -> PrefixMetadata {
    let mut meta = PrefixMetadata::default();

    match fs::read_to_string(pfx.join("system.reg")) {
        Ok(text) => {
            meta.arch = parse_arch(&text);
            meta.win_version = parse_sections(&text)
                .into_iter()
                .find(|s| s.is(CURRENT_VERSION_KEY))
                .and_then(|s| {
                    let current = s.get("CurrentVersion").map(str::to_string);
                    let product = s.get("ProductName").map(str::to_string);
                    (current.is_some() || product.is_some()).then_some(WinVersion {
                        current_version: current,
                        product_name: product,
                    })
                });
        }
        Err(e) => debug!("can't read {}/system.reg: {}", pfx.display(), e),
    }

    meta.dll_overrides = read_dll_overrides(pfx);
    meta
}

/// `[Software\\Wine\\DllOverrides]` of `user.reg`.
pub fn read_dll_overrides(pfx: &Path) -> BTreeMap<String, String> {
    let Ok(text) = fs::read_to_string(pfx.join("user.reg")) else {
        return BTreeMap::new();
    };
    parse_sections(&text)
        .into_iter()
        .filter(|s| s.is(DLL_OVERRIDES_KEY))
        .flat_map(|s| s.values)
        .collect()
}
