//! I/O operations for the drive mapping

mod dosdevices;
mod mounts;

pub use dosdevices::read_drive_links;
pub use mounts::{MountSource, StaticMounts, SystemMounts};
