//! Export hooks: rewrite a snapshot of the variables right before flattening

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::env::types::{EnvValue, Vars};

/// Pre-export rewrite of a layer's variables.
///
/// Hooks see a copy; the layer itself is never touched by an export.
pub trait EnvHook: Send + Sync + fmt::Debug {
    fn apply(&self, vars: &mut Vars);
}

/// Expansion of one generic toggle into runtime variables.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleRule {
    /// Generic name set by callers, removed on export (`ESYNC`)
    pub toggle: String,
    /// Runtime variable receiving the value as is (`WINEESYNC`)
    pub target: String,
    /// Extra variable for bundle-style runtimes (`PROTON_NO_ESYNC`)
    #[serde(default)]
    pub companion: Option<String>,
    /// Companion gets the negated truth value
    #[serde(default)]
    pub invert_companion: bool,
}

impl ToggleRule {
    pub fn new(toggle: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            toggle: toggle.into(),
            target: target.into(),
            companion: None,
            invert_companion: false,
        }
    }

    pub fn with_companion(mut self, companion: impl Into<String>, inverted: bool) -> Self {
        self.companion = Some(companion.into());
        self.invert_companion = inverted;
        self
    }
}

/// Applies [`ToggleRule`]s; companions only when `proton` is set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToggleHook {
    pub rules: Vec<ToggleRule>,
    pub proton: bool,
}

impl ToggleHook {
    pub fn new(rules: Vec<ToggleRule>, proton: bool) -> Self {
        Self { rules, proton }
    }
}

impl EnvHook for ToggleHook {
    fn apply(&self, vars: &mut Vars) {
        for rule in &self.rules {
            let Some(value) = vars.remove(&rule.toggle) else {
                continue;
            };
            if self.proton
                && let Some(companion) = &rule.companion
            {
                let companion_value = if rule.invert_companion {
                    EnvValue::Bool(!value.is_truthy())
                } else {
                    value.clone()
                };
                debug!("{} -> {}={}", rule.toggle, companion, companion_value);
                vars.insert(companion.clone(), companion_value);
            }
            debug!("{} -> {}={}", rule.toggle, rule.target, value);
            vars.insert(rule.target.clone(), value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn esync() -> ToggleRule {
        ToggleRule::new("ESYNC", "WINEESYNC").with_companion("PROTON_NO_ESYNC", true)
    }

    #[test]
    fn test_toggle_plain_runtime() {
        let mut vars = Vars::default();
        vars.insert("ESYNC", EnvValue::Bool(true));
        ToggleHook::new(vec![esync()], false).apply(&mut vars);

        assert!(!vars.contains("ESYNC"));
        assert_eq!(vars.get("WINEESYNC"), Some(&EnvValue::Bool(true)));
        assert!(!vars.contains("PROTON_NO_ESYNC"));
    }

    #[test]
    fn test_toggle_proton_inverted_companion() {
        let mut vars = Vars::default();
        vars.insert("ESYNC", EnvValue::Bool(false));
        ToggleHook::new(vec![esync()], true).apply(&mut vars);

        assert_eq!(vars.get("WINEESYNC"), Some(&EnvValue::Bool(false)));
        assert_eq!(vars.get("PROTON_NO_ESYNC"), Some(&EnvValue::Bool(true)));
    }

    #[test]
    fn test_toggle_companion_copies_value() {
        let rule = ToggleRule::new("LARGE_ADDRESS_AWARE", "WINE_LARGE_ADDRESS_AWARE")
            .with_companion("PROTON_FORCE_LARGE_ADDRESS_AWARE", false);
        let mut vars = Vars::default();
        vars.insert("LARGE_ADDRESS_AWARE", EnvValue::from("1"));
        ToggleHook::new(vec![rule], true).apply(&mut vars);

        assert_eq!(vars.get("WINE_LARGE_ADDRESS_AWARE"), Some(&EnvValue::from("1")));
        assert_eq!(
            vars.get("PROTON_FORCE_LARGE_ADDRESS_AWARE"),
            Some(&EnvValue::from("1"))
        );
    }

    #[test]
    fn test_absent_toggle_is_left_alone() {
        let mut vars = Vars::default();
        vars.insert("WINEESYNC", EnvValue::Bool(true));
        ToggleHook::new(vec![esync()], true).apply(&mut vars);
        assert_eq!(vars.len(), 1);
    }
}
