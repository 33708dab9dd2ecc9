//! Pure functions for path classification

mod classify;

pub use classify::{drive_key, is_windows_path, render_windows, split_drive, windows_parts};
