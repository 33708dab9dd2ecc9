//! Environment layers
//!
//! An [`EnvLayer`] is an ordered, typed variable table for one configuration
//! concern. Layers merge into each other and export to a flat
//! `String -> String` map ready for process spawning.
//!
//! Rules:
//! - Protected keys can be set while the layer is unlocked; once locked they
//!   reject `set`/`unset` and are skipped by `update`.
//! - Assigning a list to a list appends, first occurrence wins.
//! - Export runs the layer's hooks on a copy, then flattens: booleans become
//!   `0`/`1`, lists join with the key's separator (`:` by default), empty
//!   results are dropped.
//!
//! ## Module Structure
//! - `types.rs`: EnvValue, Vars
//! - `hook.rs`: EnvHook, ToggleRule, ToggleHook
//! - `pure/`: List accumulation, export flattening

mod hook;
mod pure;
mod types;

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::io::{self, Write};
use std::ops::BitOr;
use std::sync::Arc;

use tracing::debug;

use crate::error::{Error, Result};

pub use hook::{EnvHook, ToggleHook, ToggleRule};
pub use pure::{DEFAULT_SEPARATOR, dedup, dedup_extend, flatten};
pub use types::{EnvValue, Vars};

#[derive(Clone, Default)]
pub struct EnvLayer {
    vars: Vars,
    protected: BTreeSet<String>,
    locked: bool,
    separators: BTreeMap<String, char>,
    hooks: Vec<Arc<dyn EnvHook>>,
}

impl EnvLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unlocked layer guarding `keys` once [`EnvLayer::lock`] is called.
    pub fn with_protected<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Self {
            protected: keys.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn lock(&mut self) {
        self.locked = true;
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn is_protected(&self, key: &str) -> bool {
        self.protected.contains(key)
    }

    fn guard(&self, key: &str) -> Result<()> {
        if self.locked && self.is_protected(key) {
            return Err(Error::ProtectedKey(key.to_string()));
        }
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&EnvValue> {
        self.vars.get(key)
    }

    /// Value of `key`, or `default` when absent.
    pub fn get_or(&self, key: &str, default: impl Into<EnvValue>) -> EnvValue {
        self.vars.get(key).cloned().unwrap_or_else(|| default.into())
    }

    pub fn has(&self, key: &str) -> bool {
        self.vars.contains(key)
    }

    /// Assign `key`. Lists assigned over lists are appended to.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<EnvValue>) -> Result<()> {
        let key = key.into();
        self.guard(&key)?;
        self.assign(key, value.into());
        Ok(())
    }

    fn assign(&mut self, key: String, value: EnvValue) {
        let value = match value {
            EnvValue::List(incoming) => {
                if let Some(EnvValue::List(current)) = self.vars.get_mut(&key) {
                    dedup_extend(current, incoming);
                    return;
                }
                EnvValue::List(dedup(incoming))
            }
            other => other,
        };
        self.vars.insert(key, value);
    }

    pub fn unset(&mut self, key: &str) -> Result<Option<EnvValue>> {
        self.guard(key)?;
        Ok(self.vars.remove(key))
    }

    /// Remove `key` and return its value; same protection as `unset`.
    pub fn pop(&mut self, key: &str) -> Result<Option<EnvValue>> {
        self.unset(key)
    }

    /// Set `key` only if absent; returns the value now held.
    pub fn set_default(&mut self, key: &str, value: impl Into<EnvValue>) -> Result<&EnvValue> {
        if !self.vars.contains(key) {
            self.set(key, value)?;
        }
        self.vars.get(key).ok_or_else(|| Error::ProtectedKey(key.to_string()))
    }

    /// Merge `other` into this layer, skipping protected keys.
    ///
    /// Keys in `clear` holding a list are emptied first, so the incoming
    /// value replaces instead of appending.
    pub fn update<I, K, V>(&mut self, other: I, clear: &[&str])
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<EnvValue>,
    {
        for (key, value) in other {
            let key = key.into();
            if self.is_protected(&key) {
                debug!("update skips protected key {}", key);
                continue;
            }
            if clear.contains(&key.as_str())
                && let Some(EnvValue::List(current)) = self.vars.get_mut(&key)
            {
                current.clear();
            }
            self.assign(key, value.into());
        }
    }

    /// [`EnvLayer::update`] from another layer, carrying its list separators
    /// for keys this layer has none for.
    pub fn update_layer(&mut self, other: &EnvLayer, clear: &[&str]) {
        self.update(other.iter(), clear);
        for (key, sep) in &other.separators {
            self.separators.entry(key.clone()).or_insert(*sep);
        }
    }

    /// New layer holding this one updated with `other`.
    pub fn merged(&self, other: &EnvLayer) -> EnvLayer {
        let mut out = self.clone();
        out.update_layer(other, &[]);
        out
    }

    /// Join `key`'s list with `separator` on export.
    pub fn add_list_separator(&mut self, key: impl Into<String>, separator: char) {
        self.separators.insert(key.into(), separator);
    }

    pub fn separator(&self, key: &str) -> char {
        self.separators
            .get(key)
            .copied()
            .unwrap_or(DEFAULT_SEPARATOR)
    }

    pub fn add_hook(&mut self, hook: Arc<dyn EnvHook>) {
        self.hooks.push(hook);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &EnvValue)> {
        self.vars.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.vars.iter().map(|(k, _)| k)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Remove every key the lock allows removing.
    pub fn clear(&mut self) {
        let locked = self.locked;
        let protected = &self.protected;
        self.vars.retain(|k, _| locked && protected.contains(k));
    }

    /// Hooked and flattened variables, ready for a child process.
    pub fn env(&self) -> BTreeMap<String, String> {
        let mut snapshot = self.vars.clone();
        for hook in &self.hooks {
            hook.apply(&mut snapshot);
        }
        flatten(&snapshot, &self.separators)
    }

    /// Write the exported variables as `KEY=value` lines.
    pub fn dump(&self, out: &mut impl Write) -> io::Result<()> {
        for (key, value) in self.env() {
            writeln!(out, "{}={}", key, value)?;
        }
        Ok(())
    }
}

impl PartialEq for EnvLayer {
    fn eq(&self, other: &Self) -> bool {
        let mine: BTreeMap<&str, &EnvValue> = self.vars.iter().collect();
        let theirs: BTreeMap<&str, &EnvValue> = other.vars.iter().collect();
        mine == theirs
    }
}

impl fmt::Debug for EnvLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvLayer")
            .field("vars", &self.vars)
            .field("protected", &self.protected)
            .field("locked", &self.locked)
            .field("separators", &self.separators)
            .field("hooks", &self.hooks.len())
            .finish()
    }
}

impl BitOr for &EnvLayer {
    type Output = EnvLayer;

    fn bitor(self, rhs: &EnvLayer) -> EnvLayer {
        self.merged(rhs)
    }
}
