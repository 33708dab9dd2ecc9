//! Generic toggles and the runtime variables they expand into

use crate::env::ToggleRule;

pub fn default_toggle_rules() -> Vec<ToggleRule> {
    vec![
        ToggleRule::new("ESYNC", "WINEESYNC").with_companion("PROTON_NO_ESYNC", true),
        ToggleRule::new("FSYNC", "WINEFSYNC").with_companion("PROTON_NO_FSYNC", true),
        ToggleRule::new("LARGE_ADDRESS_AWARE", "WINE_LARGE_ADDRESS_AWARE")
            .with_companion("PROTON_FORCE_LARGE_ADDRESS_AWARE", false),
    ]
}
