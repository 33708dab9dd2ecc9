//! Pure functions for environment layers

mod flatten;
mod lists;

pub use flatten::{DEFAULT_SEPARATOR, flatten};
pub use lists::{dedup, dedup_extend};
