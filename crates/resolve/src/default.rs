//! The always-applicable fallback factory.

use crate::factory::{AdapterFactory, ProbeError};
use versiongate_version::VersionToken;

/// Name reported by [`DefaultFactory`] in logs and reports.
pub const DEFAULT_FACTORY_NAME: &str = "default";

/// Version reported by the default probe: "unknown but compatible".
pub const UNKNOWN_VERSION: VersionToken = VersionToken::MIN;

/// Fallback factory appended to every candidate set.
///
/// Its floor is [`VersionToken::MIN`] and its probe cannot fail, so it is
/// compatible with any runtime. It wins only when no explicit factory does.
/// The adapter it builds may offer reduced capability but must not crash.
pub struct DefaultFactory<A: ?Sized> {
    build: Box<dyn Fn() -> Box<A> + Send + Sync>,
}

impl<A: ?Sized> DefaultFactory<A> {
    pub fn new<B>(build: B) -> Self
    where
        B: Fn() -> Box<A> + Send + Sync + 'static,
    {
        Self {
            build: Box::new(build),
        }
    }
}

impl<A: ?Sized> AdapterFactory<A> for DefaultFactory<A> {
    fn name(&self) -> &str {
        DEFAULT_FACTORY_NAME
    }

    fn min_version(&self) -> VersionToken {
        VersionToken::MIN
    }

    fn probe_current_version(&self) -> Result<VersionToken, ProbeError> {
        Ok(UNKNOWN_VERSION)
    }

    fn build_adapter(&self) -> Box<A> {
        (self.build)()
    }
}

impl<A: ?Sized> std::fmt::Debug for DefaultFactory<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefaultFactory").finish_non_exhaustive()
    }
}
