//! Pure functions for the drive mapping

mod reverse;

pub use reverse::{drive_targeting, reverse_map};
