use std::path::PathBuf;

/// One argument of a guest command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Arg {
    /// Passed through untouched
    Text(String),
    /// Host path, translated to a guest path at render time
    Path(PathBuf),
}

impl From<&str> for Arg {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Arg {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<PathBuf> for Arg {
    fn from(p: PathBuf) -> Self {
        Self::Path(p)
    }
}
