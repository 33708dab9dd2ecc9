//! Auto-discovery of distributions and prefixes
//!
//! Discovery scans well-known locations once, then hands out the first
//! candidate that opens. Results live in an explicit [`Discovery`] object so
//! callers (and tests) decide how long the memo lasts.
//!
//! ## Module Structure
//! - `paths.rs`: SearchPaths (where to look)
//! - `cache.rs`: DiscoveryCache (tri-state memo per candidate)

mod cache;
mod paths;

use std::sync::{Arc, Mutex};

use tracing::info;

use crate::dist::{Distribution, distribution_candidates};
use crate::prefix::{Prefix, prefix_candidates};

pub use cache::{Candidate, DiscoveryCache};
pub use paths::{SYSTEM_BIN_DIRS, SearchPaths};

#[derive(Debug)]
pub struct Discovery {
    paths: SearchPaths,
    dists: Mutex<DiscoveryCache<Distribution>>,
    prefixes: Mutex<DiscoveryCache<Prefix>>,
}

impl Default for Discovery {
    fn default() -> Self {
        Self::new(SearchPaths::from_env())
    }
}

impl Discovery {
    pub fn new(paths: SearchPaths) -> Self {
        Self {
            paths,
            dists: Mutex::new(DiscoveryCache::new()),
            prefixes: Mutex::new(DiscoveryCache::new()),
        }
    }

    pub fn paths(&self) -> &SearchPaths {
        &self.paths
    }

    /// First valid distribution in search order, `None` once exhausted.
    pub fn default_distribution(&self) -> Option<Arc<Distribution>> {
        let mut cache = self.dists.lock().unwrap_or_else(|e| e.into_inner());
        let found = cache.first_valid(
            || distribution_candidates(&self.paths),
            |p| Distribution::new(p),
        );
        if let Some(dist) = &found {
            info!("discovered distribution {}", dist.root().display());
        }
        found
    }

    /// First valid prefix in search order, `None` once exhausted.
    pub fn default_prefix(&self) -> Option<Arc<Prefix>> {
        let mut cache = self.prefixes.lock().unwrap_or_else(|e| e.into_inner());
        let found = cache.first_valid(|| prefix_candidates(&self.paths), |p| Prefix::new(p));
        if let Some(prefix) = &found {
            info!("discovered prefix {}", prefix.root().display());
        }
        found
    }

    /// Times each scan ran: (distributions, prefixes).
    pub fn scans(&self) -> (usize, usize) {
        let dists = self.dists.lock().unwrap_or_else(|e| e.into_inner()).scans();
        let prefixes = self
            .prefixes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .scans();
        (dists, prefixes)
    }

    /// Drop every memoized candidate.
    pub fn reset(&self) {
        self.dists.lock().unwrap_or_else(|e| e.into_inner()).reset();
        self.prefixes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .reset();
    }
}
