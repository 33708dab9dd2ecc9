//! I/O operations for prefixes

mod candidates;
mod metadata;
mod validate;

pub use candidates::prefix_candidates;
pub use metadata::{read_dll_overrides, read_metadata};
pub use validate::validate;
