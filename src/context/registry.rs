//! Registered contexts and the default one

use std::sync::{Arc, Mutex};

use tracing::{debug, info};

use crate::context::Context;
use crate::discovery::Discovery;
use crate::drives::{MountSource, SystemMounts};
use crate::error::{Error, Result};

#[derive(Debug, Default)]
struct RegistryState {
    /// Registration order, oldest first
    contexts: Vec<Arc<Context>>,
    default: Option<Arc<Context>>,
}

/// Live contexts plus the default pointer.
///
/// Owns the discovery caches used when no context was registered yet.
#[derive(Debug)]
pub struct ContextRegistry {
    discovery: Discovery,
    mounts: Arc<dyn MountSource>,
    state: Mutex<RegistryState>,
}

impl Default for ContextRegistry {
    fn default() -> Self {
        Self::new(Discovery::default())
    }
}

impl ContextRegistry {
    pub fn new(discovery: Discovery) -> Self {
        Self::with_mounts(discovery, Arc::new(SystemMounts))
    }

    /// Registry whose discovered contexts use `mounts`.
    pub fn with_mounts(discovery: Discovery, mounts: Arc<dyn MountSource>) -> Self {
        Self {
            discovery,
            mounts,
            state: Mutex::new(RegistryState::default()),
        }
    }

    pub fn discovery(&self) -> &Discovery {
        &self.discovery
    }

    /// Add `ctx` and make it the default.
    pub fn register(&self, ctx: Arc<Context>) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if !state.contexts.iter().any(|c| Arc::ptr_eq(c, &ctx)) {
            state.contexts.push(Arc::clone(&ctx));
        }
        debug!("default context is now {}", ctx.prefix().root().display());
        state.default = Some(ctx);
    }

    /// Remove `ctx`. If it was the default, the most recently registered
    /// survivor takes over. Returns whether `ctx` was registered.
    pub fn unregister(&self, ctx: &Arc<Context>) -> bool {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        let before = state.contexts.len();
        state.contexts.retain(|c| !Arc::ptr_eq(c, ctx));
        let removed = state.contexts.len() != before;

        if state.default.as_ref().is_some_and(|d| Arc::ptr_eq(d, ctx)) {
            state.default = state.contexts.last().cloned();
        }
        removed
    }

    /// Default context without trying discovery.
    pub fn current(&self) -> Option<Arc<Context>> {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .default
            .clone()
    }

    /// Default context, discovering and registering one if there is none.
    pub fn context(&self) -> Option<Arc<Context>> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(ctx) = &state.default {
            return Some(Arc::clone(ctx));
        }

        let dist = self.discovery.default_distribution()?;
        let prefix = self.discovery.default_prefix()?;
        match Context::with_mounts(dist, prefix, Arc::clone(&self.mounts)) {
            Ok(ctx) => {
                let ctx = Arc::new(ctx);
                info!("auto-discovered context registered");
                state.contexts.push(Arc::clone(&ctx));
                state.default = Some(Arc::clone(&ctx));
                Some(ctx)
            }
            Err(e) => {
                debug!("discovered context failed: {}", e);
                None
            }
        }
    }

    /// [`ContextRegistry::context`], failing with [`Error::NoContext`].
    pub fn require(&self) -> Result<Arc<Context>> {
        self.context().ok_or(Error::NoContext)
    }

    pub fn contexts(&self) -> Vec<Arc<Context>> {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contexts
            .clone()
    }

    pub fn len(&self) -> usize {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contexts
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::SearchPaths;
    use crate::drives::StaticMounts;
    use crate::testutil::{context_in, make_dist, make_prefix};

    fn empty_registry(home: &std::path::Path) -> ContextRegistry {
        ContextRegistry::with_mounts(
            Discovery::new(SearchPaths::default().with_home(home)),
            Arc::new(StaticMounts::root_only()),
        )
    }

    #[test]
    fn test_register_sets_default() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();
        let registry = empty_registry(&root);
        let a = Arc::new(context_in(&root.join("a"), false));
        let b = Arc::new(context_in(&root.join("b"), false));

        registry.register(Arc::clone(&a));
        registry.register(Arc::clone(&b));
        registry.register(Arc::clone(&b));
        assert_eq!(registry.len(), 2);
        assert!(Arc::ptr_eq(&registry.current().unwrap(), &b));
    }

    #[test]
    fn test_unregister_promotes_survivor() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();
        let registry = empty_registry(&root);
        let a = Arc::new(context_in(&root.join("a"), false));
        let b = Arc::new(context_in(&root.join("b"), false));
        let c = Arc::new(context_in(&root.join("c"), true));
        for ctx in [&a, &b, &c] {
            registry.register(Arc::clone(ctx));
        }

        assert!(registry.unregister(&c));
        let promoted = registry.current().unwrap();
        assert!(Arc::ptr_eq(&promoted, &a) || Arc::ptr_eq(&promoted, &b));

        // removing a non-default keeps the default
        let other = if Arc::ptr_eq(&promoted, &a) { &b } else { &a };
        assert!(registry.unregister(other));
        assert!(Arc::ptr_eq(&registry.current().unwrap(), &promoted));

        assert!(registry.unregister(&promoted));
        assert!(registry.current().is_none());
        assert!(!registry.unregister(&promoted));
    }

    #[test]
    fn test_context_discovers_once() {
        let dir = tempfile::tempdir().unwrap();
        let home = dir.path().canonicalize().unwrap();
        let dist = make_dist(&home.join("opt/wine"));
        make_prefix(&home.join(".wine"));

        let registry = ContextRegistry::with_mounts(
            Discovery::new(
                SearchPaths::default()
                    .with_home(&home)
                    .with_path_entry(dist.join("bin")),
            ),
            Arc::new(StaticMounts::root_only()),
        );

        let first = registry.context().unwrap();
        assert_eq!(first.dist().root(), dist);
        assert_eq!(first.prefix().root(), home.join(".wine"));
        let second = registry.require().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.discovery().scans(), (1, 1));
    }

    #[test]
    fn test_context_without_candidates() {
        let dir = tempfile::tempdir().unwrap();
        let registry = empty_registry(dir.path());
        assert!(registry.context().is_none());
        assert!(matches!(registry.require(), Err(Error::NoContext)));
        assert!(registry.is_empty());
    }
}
