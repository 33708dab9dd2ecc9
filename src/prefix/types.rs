use std::collections::BTreeMap;

use serde::Serialize;

/// Version markers from `system.reg`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct WinVersion {
    pub current_version: Option<String>,
    pub product_name: Option<String>,
}

/// What the registry hives say about a prefix.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PrefixMetadata {
    /// `win32` or `win64`
    pub arch: Option<String>,
    pub win_version: Option<WinVersion>,
    pub dll_overrides: BTreeMap<String, String>,
}
