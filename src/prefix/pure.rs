//! Pure functions for prefix state files

mod reg;

pub use reg::{RegSection, parse_arch, parse_sections};
