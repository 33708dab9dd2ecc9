//! Export transform: typed variables to process environment strings

use std::collections::BTreeMap;

use crate::env::types::Vars;

pub const DEFAULT_SEPARATOR: char = ':';

/// Render every variable, dropping the ones that render empty.
pub fn flatten(vars: &Vars, separators: &BTreeMap<String, char>) -> BTreeMap<String, String> {
    vars.iter()
        .filter_map(|(key, value)| {
            let sep = separators.get(key).copied().unwrap_or(DEFAULT_SEPARATOR);
            let rendered = value.render(sep);
            (!rendered.is_empty()).then(|| (key.to_string(), rendered))
        })
        .collect()
}
