//! The factory contract that every version-specific adapter ships with.

use thiserror::Error;
use versiongate_version::{ParseError, VersionToken};

/// Why a factory could not determine the runtime version.
///
/// Probe failures are routine: a probe written against one release of the
/// plugin API may reference things that another release does not have.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProbeError {
    /// The runtime reported a version string that does not parse.
    #[error("unparseable runtime version: {0}")]
    Parse(#[from] ParseError),

    /// Whatever the probe inspects is not present in this runtime.
    #[error("unavailable: {0}")]
    Unavailable(String),

    /// The probe panicked; the payload message is preserved.
    #[error("probe panicked: {0}")]
    Panicked(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ProbeError {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable(reason.into())
    }
}

/// Describes one adapter implementation and the versions it supports.
///
/// `A` is the adapter capability surface, usually a trait object such as
/// `dyn BuildApi`. Factories hold no per-resolution state and may be reused
/// across any number of resolutions.
pub trait AdapterFactory<A: ?Sized>: Send + Sync {
    /// Identifier used in logs and resolution reports.
    fn name(&self) -> &str;

    /// Lowest runtime version this factory supports.
    ///
    /// May be derived from the probed version. A panic here is caught and
    /// treated like a probe failure.
    fn min_version(&self) -> VersionToken;

    /// Determines which version of the plugin API is loaded.
    fn probe_current_version(&self) -> Result<VersionToken, ProbeError>;

    /// Builds the adapter. Only called on the selected factory.
    fn build_adapter(&self) -> Box<A>;
}

type ProbeFn = dyn Fn() -> Result<VersionToken, ProbeError> + Send + Sync;

/// A factory assembled from closures.
///
/// ```rust
/// use versiongate::{AdapterFactory, FnFactory};
/// use versiongate_version::VersionToken;
///
/// trait Api {
///     fn label(&self) -> &'static str;
/// }
///
/// struct Modern;
/// impl Api for Modern {
///     fn label(&self) -> &'static str {
///         "modern"
///     }
/// }
///
/// let factory: FnFactory<dyn Api> = FnFactory::new(
///     "modern",
///     VersionToken::new(8, 0, 0),
///     || Ok(VersionToken::new(8, 1, 0)),
///     || -> Box<dyn Api> { Box::new(Modern) },
/// );
///
/// assert_eq!(factory.build_adapter().label(), "modern");
/// ```
pub struct FnFactory<A: ?Sized> {
    name: String,
    min_version: VersionToken,
    probe: Box<ProbeFn>,
    build: Box<dyn Fn() -> Box<A> + Send + Sync>,
}

impl<A: ?Sized> FnFactory<A> {
    pub fn new<P, B>(name: impl Into<String>, min_version: VersionToken, probe: P, build: B) -> Self
    where
        P: Fn() -> Result<VersionToken, ProbeError> + Send + Sync + 'static,
        B: Fn() -> Box<A> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            min_version,
            probe: Box::new(probe),
            build: Box::new(build),
        }
    }
}

impl<A: ?Sized> AdapterFactory<A> for FnFactory<A> {
    fn name(&self) -> &str {
        &self.name
    }

    fn min_version(&self) -> VersionToken {
        self.min_version
    }

    fn probe_current_version(&self) -> Result<VersionToken, ProbeError> {
        (self.probe)()
    }

    fn build_adapter(&self) -> Box<A> {
        (self.build)()
    }
}

impl<A: ?Sized> std::fmt::Debug for FnFactory<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnFactory")
            .field("name", &self.name)
            .field("min_version", &self.min_version)
            .finish_non_exhaustive()
    }
}
