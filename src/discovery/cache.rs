//! Memoized candidate scanning

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::error::Result;

/// State of one candidate root.
#[derive(Debug)]
pub enum Candidate<T> {
    Unvisited,
    Found(Arc<T>),
    /// Tried once and rejected; never retried.
    Failed,
}

/// Ordered candidate roots with their tri-state outcome.
///
/// The scan closure runs at most once per cache lifetime (until
/// [`DiscoveryCache::reset`]); candidates are opened lazily in scan order.
#[derive(Debug)]
pub struct DiscoveryCache<T> {
    places: Vec<(PathBuf, Candidate<T>)>,
    scanned: bool,
    scans: usize,
}

impl<T> Default for DiscoveryCache<T> {
    fn default() -> Self {
        Self {
            places: Vec::new(),
            scanned: false,
            scans: 0,
        }
    }
}

impl<T> DiscoveryCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// First candidate that opens successfully.
    pub fn first_valid<S, O>(&mut self, scan: S, mut open: O) -> Option<Arc<T>>
    where
        S: FnOnce() -> Vec<PathBuf>,
        O: FnMut(&Path) -> Result<T>,
    {
        if !self.scanned {
            self.scanned = true;
            self.scans += 1;
            for place in scan() {
                if !self.places.iter().any(|(p, _)| *p == place) {
                    self.places.push((place, Candidate::Unvisited));
                }
            }
            debug!("discovery scan found {} candidates", self.places.len());
        }

        for (place, state) in self.places.iter_mut() {
            match state {
                Candidate::Failed => continue,
                Candidate::Found(found) => return Some(Arc::clone(found)),
                Candidate::Unvisited => match open(place.as_path()) {
                    Ok(value) => {
                        let value = Arc::new(value);
                        *state = Candidate::Found(Arc::clone(&value));
                        return Some(value);
                    }
                    Err(e) => {
                        debug!("rejecting candidate {}: {}", place.display(), e);
                        *state = Candidate::Failed;
                    }
                },
            }
        }
        None
    }

    /// How many times the scan closure has run.
    pub fn scans(&self) -> usize {
        self.scans
    }

    pub fn candidates(&self) -> impl Iterator<Item = (&Path, &Candidate<T>)> {
        self.places.iter().map(|(p, s)| (p.as_path(), s))
    }

    /// Forget everything so the next lookup scans again.
    pub fn reset(&mut self) {
        self.places.clear();
        self.scanned = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn open_even(path: &Path) -> Result<u32> {
        let n: u32 = path.to_string_lossy().trim_start_matches('/').parse().unwrap();
        if n % 2 == 0 {
            Ok(n)
        } else {
            Err(Error::NotADirectory(path.to_path_buf()))
        }
    }

    #[test]
    fn test_scan_runs_once() {
        let mut cache = DiscoveryCache::new();
        let scan = || vec![PathBuf::from("/1"), PathBuf::from("/4"), PathBuf::from("/1")];

        assert_eq!(cache.first_valid(scan, open_even).as_deref(), Some(&4));
        assert_eq!(cache.first_valid(scan, open_even).as_deref(), Some(&4));
        assert_eq!(cache.scans(), 1);
        assert_eq!(cache.candidates().count(), 2);
    }

    #[test]
    fn test_failed_candidates_are_not_retried() {
        let mut cache = DiscoveryCache::new();
        let mut opened = Vec::new();
        let scan = || vec![PathBuf::from("/3"), PathBuf::from("/5")];

        assert!(
            cache
                .first_valid(scan, |p| {
                    opened.push(p.to_path_buf());
                    open_even(p)
                })
                .is_none()
        );
        assert!(
            cache
                .first_valid(scan, |p| {
                    opened.push(p.to_path_buf());
                    open_even(p)
                })
                .is_none()
        );
        assert_eq!(opened.len(), 2);
        assert!(
            cache
                .candidates()
                .all(|(_, s)| matches!(s, Candidate::Failed))
        );
    }

    #[test]
    fn test_reset_rescans() {
        let mut cache = DiscoveryCache::new();
        assert!(cache.first_valid(Vec::new, open_even).is_none());
        assert!(cache.first_valid(Vec::new, open_even).is_none());
        assert_eq!(cache.scans(), 1);
        cache.reset();
        assert_eq!(
            cache.first_valid(|| vec![PathBuf::from("/2")], open_even).as_deref(),
            Some(&2)
        );
        assert_eq!(cache.scans(), 2);
    }
}
