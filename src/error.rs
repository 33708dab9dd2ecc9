use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("invalid wine distribution: {0}")]
    InvalidDistribution(PathBuf),

    #[error("invalid wine prefix: {0}")]
    InvalidPrefix(PathBuf),

    #[error("prefix has no dosdevices directory: {0}")]
    MissingDosDevices(PathBuf),

    #[error("{0} is a protected variable and can't be set by assignment")]
    ProtectedKey(String),

    #[error("path should be a native posix path: {0}")]
    NotAPosixPath(String),

    #[error("path should be a windows path: {0}")]
    NotAWindowsPath(String),

    #[error("not a windows executable or builtin command: {0}")]
    NotExecutable(PathBuf),

    #[error("drive {0} is not mapped in the prefix")]
    UnknownDrive(String),

    #[error("no drive maps {0} and the root filesystem has no drive letter")]
    UnmappedPath(PathBuf),

    #[error("no wine context could be found")]
    NoContext,

    #[error("no {name} library found under {root}")]
    LibraryNotFound { name: String, root: PathBuf },

    #[error("no data dir found for library {0}")]
    DataDirNotFound(PathBuf),

    #[error("no icd file found for driver {0}")]
    IcdNotFound(String),

    #[error("file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
