//! Per-version model cache
//!
//! Caches artifacts derived for a structured type at one API version, such as
//! a compiled schema, so they are built once per process.
//!
//! The cache is an explicit component: create it at startup, hand it by
//! reference to whatever needs it, and call [`ModelCache::invalidate`] when the
//! registered models change.

use crate::type_key::VersionedTypeKey;
use dashmap::DashMap;
use once_cell::sync::OnceCell;
use std::sync::Arc;

type Slot<A> = Arc<OnceCell<Arc<A>>>;

/// Concurrent cache from [`VersionedTypeKey`] to a derived artifact
///
/// Each key owns a slot that is initialized at most once. The map's shard
/// lock is only held while the slot is looked up or inserted; building the
/// artifact blocks callers of the same key only.
pub struct ModelCache<A> {
    slots: DashMap<VersionedTypeKey, Slot<A>>,
}

impl<A> ModelCache<A> {
    /// Create an empty cache
    pub fn new() -> Self {
        Self {
            slots: DashMap::new(),
        }
    }

    fn slot(&self, key: VersionedTypeKey) -> Slot<A> {
        if let Some(slot) = self.slots.get(&key) {
            return Arc::clone(slot.value());
        }
        Arc::clone(self.slots.entry(key).or_default().value())
    }

    /// Look up a built artifact
    pub fn get(&self, key: &VersionedTypeKey) -> Option<Arc<A>> {
        self.slots.get(key).and_then(|slot| slot.value().get().cloned())
    }

    /// Store an artifact, replacing any previous one for the key
    pub fn put(&self, key: VersionedTypeKey, artifact: A) -> Arc<A> {
        let artifact = Arc::new(artifact);
        self.slots
            .insert(key, Arc::new(OnceCell::with_value(Arc::clone(&artifact))));
        artifact
    }

    /// Return the artifact for `key`, building it on first use
    ///
    /// Concurrent callers with the same key run `build` at most once and all
    /// receive the same `Arc`.
    pub fn get_or_insert_with<F>(&self, key: VersionedTypeKey, build: F) -> Arc<A>
    where
        F: FnOnce() -> A,
    {
        let slot = self.slot(key);
        Arc::clone(slot.get_or_init(|| {
            tracing::debug!("building cached model artifact");
            Arc::new(build())
        }))
    }

    /// Like [`get_or_insert_with`](Self::get_or_insert_with) for fallible builders
    ///
    /// A failed build leaves the slot empty; the next caller tries again.
    pub fn get_or_try_insert_with<F, E>(&self, key: VersionedTypeKey, build: F) -> Result<Arc<A>, E>
    where
        F: FnOnce() -> Result<A, E>,
    {
        let slot = self.slot(key);
        slot.get_or_try_init(|| build().map(Arc::new)).map(Arc::clone)
    }

    /// Drop the entry for one key
    pub fn remove(&self, key: &VersionedTypeKey) -> Option<Arc<A>> {
        self.slots
            .remove(key)
            .and_then(|(_, slot)| slot.get().cloned())
    }

    /// Drop every entry, e.g. after the model set was rebuilt
    pub fn invalidate(&self) {
        let count = self.slots.len();
        self.slots.clear();
        tracing::debug!(count, "model cache invalidated");
    }

    /// Number of keys with a slot, built or in progress
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True when the cache holds no keys
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl<A> Default for ModelCache<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> std::fmt::Debug for ModelCache<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelCache")
            .field("entries", &self.slots.len())
            .finish()
    }
}
