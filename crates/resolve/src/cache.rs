//! Caller-side memoization of a resolved adapter.
//!
//! The resolver builds a fresh adapter on every call. A build or IDE session
//! that wants one adapter for its whole lifetime keeps an [`AdapterCache`].

use crate::error::ResolveError;
use crate::registry::CandidateSet;
use parking_lot::Mutex;
use std::sync::Arc;
use versiongate_version::VersionToken;

/// Holds at most one resolved adapter until [`clear`](Self::clear)ed.
pub struct AdapterCache<A: ?Sized> {
    slot: Mutex<Option<Arc<A>>>,
}

impl<A: ?Sized> Default for AdapterCache<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: ?Sized> AdapterCache<A> {
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    /// Returns the cached adapter, resolving it from `candidates` on first use.
    ///
    /// A failed resolution leaves the cache empty. The lock is released while
    /// probes and the adapter constructor run, so they may use this cache.
    /// When two callers race, the first adapter stored wins.
    pub fn get_or_resolve(
        &self,
        candidates: &CandidateSet<A>,
        override_version: Option<&VersionToken>,
    ) -> Result<Arc<A>, ResolveError>
    where
        A: 'static,
    {
        if let Some(adapter) = self.get() {
            return Ok(adapter);
        }

        let resolved: Arc<A> = Arc::from(candidates.resolve(override_version)?);

        let mut slot = self.slot.lock();
        if let Some(existing) = slot.as_ref() {
            tracing::trace!(
                target: "versiongate::cache",
                "adapter cached concurrently; discarding"
            );
            return Ok(Arc::clone(existing));
        }
        *slot = Some(Arc::clone(&resolved));
        tracing::trace!(target: "versiongate::cache", "cached resolved adapter");
        Ok(resolved)
    }

    pub fn get(&self) -> Option<Arc<A>> {
        self.slot.lock().clone()
    }

    /// Drops the cached adapter so the next call resolves again.
    pub fn clear(&self) {
        self.slot.lock().take();
    }
}

impl<A: ?Sized> std::fmt::Debug for AdapterCache<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdapterCache")
            .field("populated", &self.slot.lock().is_some())
            .finish()
    }
}
