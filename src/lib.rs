//! Wine/Proton plumbing: find distributions and prefixes, translate paths
//! through a prefix's drive table and build the environment and command line
//! a guest program is started with.
//!
//! ## Module Structure
//! - `winpath`: Path classification, tagged paths, Windows/POSIX twins
//! - `dist`, `prefix`: Validated distributions and prefixes
//! - `drives`: Drive letter mapping
//! - `env`, `layers`: Environment layers and ready-made sources
//! - `context`: One distribution + one prefix, plus the context registry
//! - `discovery`: Search locations and memoized candidates
//! - `program`: Guest command lines
//! - `config`: YAML configuration

pub mod config;
pub mod context;
pub mod discovery;
pub mod dist;
pub mod drives;
pub mod env;
pub mod error;
pub mod fsutil;
pub mod layers;
pub mod prefix;
pub mod program;
pub mod winpath;

#[cfg(test)]
mod testutil;

pub use config::WinebridgeConfig;
pub use context::{Context, ContextRegistry, LaunchMode, LaunchOptions, ProtonRunMode};
pub use discovery::{Discovery, SearchPaths};
pub use dist::{Distribution, Executable};
pub use drives::{DriveMapping, UnknownDrivePolicy};
pub use env::{EnvLayer, EnvValue};
pub use error::{Error, Result};
pub use prefix::Prefix;
pub use program::Program;
pub use winpath::{UPath, WinePath};
