//! Candidate prefix roots

use std::path::PathBuf;

use crate::discovery::SearchPaths;

/// `$WINEPREFIX`, `~/.wine`, `~/.wine64`, keeping only existing directories.
pub fn prefix_candidates(paths: &SearchPaths) -> Vec<PathBuf> {
    paths
        .prefix_dirs()
        .into_iter()
        .filter(|p| p.is_dir())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_candidates_skip_missing() {
        let dir = tempfile::tempdir().unwrap();
        let home = dir.path();
        std::fs::create_dir(home.join(".wine64")).unwrap();
        let paths = SearchPaths::default()
            .with_home(home)
            .with_wineprefix(home.join("nope"));
        assert_eq!(prefix_candidates(&paths), vec![home.join(".wine64")]);
    }
}
