//! I/O operations for distributions

mod candidates;
mod validate;

pub use candidates::distribution_candidates;
pub use validate::validate;
