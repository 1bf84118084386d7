//! Ordered candidate registry with a guaranteed default factory.

use crate::config::ResolveConfig;
use crate::default::DefaultFactory;
use crate::error::ResolveError;
use crate::factory::AdapterFactory;
use crate::resolver::{self, Resolution};
use std::sync::Arc;
use versiongate_version::VersionToken;

/// The candidate set handed to the resolver.
///
/// Factories keep their registration order, which decides ties between equal
/// floors. The default factory is always the last candidate, no matter when
/// other factories are registered.
pub struct CandidateSet<A: ?Sized + 'static> {
    factories: Vec<Arc<dyn AdapterFactory<A>>>,
}

impl<A: ?Sized + 'static> CandidateSet<A> {
    pub fn new(default: DefaultFactory<A>) -> Self {
        Self {
            factories: vec![Arc::new(default)],
        }
    }

    /// Registers a factory ahead of the default factory.
    pub fn register<F>(&mut self, factory: F) -> &mut Self
    where
        F: AdapterFactory<A> + 'static,
    {
        self.register_shared(Arc::new(factory))
    }

    /// Registers a factory that is shared with other candidate sets.
    pub fn register_shared(&mut self, factory: Arc<dyn AdapterFactory<A>>) -> &mut Self {
        let default_slot = self.factories.len() - 1;
        self.factories.insert(default_slot, factory);
        self
    }

    /// Builder-style [`register`](Self::register).
    pub fn with<F>(mut self, factory: F) -> Self
    where
        F: AdapterFactory<A> + 'static,
    {
        self.register(factory);
        self
    }

    /// Every candidate in evaluation order, default last.
    pub fn candidates(&self) -> &[Arc<dyn AdapterFactory<A>>] {
        &self.factories
    }

    /// Names of every candidate in evaluation order.
    pub fn names(&self) -> Vec<&str> {
        self.factories.iter().map(|f| f.name()).collect()
    }

    pub fn resolve(&self, override_version: Option<&VersionToken>) -> Result<Box<A>, ResolveError> {
        resolver::resolve(&self.factories, override_version)
    }

    pub fn resolve_with_report(
        &self,
        override_version: Option<&VersionToken>,
    ) -> Result<Resolution<A>, ResolveError> {
        resolver::resolve_with_report(&self.factories, override_version)
    }

    /// Resolves using the override from `config`, if any.
    pub fn resolve_with_config(&self, config: &ResolveConfig) -> Result<Box<A>, ResolveError> {
        self.resolve(config.override_version.as_ref())
    }
}

impl<A: ?Sized + 'static> Extend<Arc<dyn AdapterFactory<A>>> for CandidateSet<A> {
    fn extend<I: IntoIterator<Item = Arc<dyn AdapterFactory<A>>>>(&mut self, iter: I) {
        for factory in iter {
            self.register_shared(factory);
        }
    }
}

impl<A: ?Sized + 'static> std::fmt::Debug for CandidateSet<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CandidateSet")
            .field("factories", &self.names())
            .finish()
    }
}
