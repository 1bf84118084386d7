//! Version-gated adapter resolution for build tooling.
//!
//! Tooling that drives a third-party plugin API across many releases keeps one
//! adapter per supported version range. Each adapter ships with an
//! [`AdapterFactory`] that declares a compatibility floor and knows how to
//! probe which API version is actually loaded. [`resolve`] probes every
//! candidate, keeps the compatible ones and builds the adapter of the one with
//! the highest floor. A [`DefaultFactory`] at the end of every
//! [`CandidateSet`] guarantees that something is always selected.
//!
//! # Examples
//!
//! ```
//! use versiongate::{CandidateSet, DefaultFactory, FnFactory, ProbeError};
//! use versiongate_version::VersionToken;
//!
//! trait VariantApi: Send + Sync {
//!     fn register_task(&self, variant: &str) -> String;
//! }
//!
//! struct Legacy;
//! impl VariantApi for Legacy {
//!     fn register_task(&self, variant: &str) -> String {
//!         format!("applicationVariants.all({variant})")
//!     }
//! }
//!
//! struct Components;
//! impl VariantApi for Components {
//!     fn register_task(&self, variant: &str) -> String {
//!         format!("androidComponents.onVariants({variant})")
//!     }
//! }
//!
//! struct Noop;
//! impl VariantApi for Noop {
//!     fn register_task(&self, _variant: &str) -> String {
//!         String::new()
//!     }
//! }
//!
//! fn runtime_version() -> Result<VersionToken, ProbeError> {
//!     Ok("8.1.0-rc01".parse()?)
//! }
//!
//! let candidates = CandidateSet::new(DefaultFactory::new(|| -> Box<dyn VariantApi> {
//!     Box::new(Noop)
//! }))
//! .with(FnFactory::new(
//!     "legacy",
//!     VersionToken::new(4, 2, 0),
//!     runtime_version,
//!     || -> Box<dyn VariantApi> { Box::new(Legacy) },
//! ))
//! .with(FnFactory::new(
//!     "components",
//!     VersionToken::new(7, 0, 0),
//!     runtime_version,
//!     || -> Box<dyn VariantApi> { Box::new(Components) },
//! ));
//!
//! let adapter = candidates.resolve(None).unwrap();
//! assert_eq!(adapter.register_task("debug"), "androidComponents.onVariants(debug)");
//!
//! // Simulate an older runtime.
//! let old = VersionToken::new(4, 2, 1);
//! let adapter = candidates.resolve(Some(&old)).unwrap();
//! assert_eq!(adapter.register_task("debug"), "applicationVariants.all(debug)");
//! ```

#![deny(unsafe_code)]

pub mod cache;
pub mod config;
pub mod default;
pub mod error;
pub mod factory;
pub mod registry;
pub mod report;
pub mod resolver;

pub use cache::AdapterCache;
pub use config::{ResolveConfig, ENV_CONFIG_PATH, ENV_OVERRIDE_VERSION};
pub use default::{DefaultFactory, DEFAULT_FACTORY_NAME, UNKNOWN_VERSION};
pub use error::ResolveError;
pub use factory::{AdapterFactory, FnFactory, ProbeError};
pub use registry::CandidateSet;
pub use report::{CandidateOutcome, Outcome, ResolutionReport};
pub use resolver::{resolve, resolve_with_report, Resolution};

pub use versiongate_version::{ParseError, Preview, PreviewChannel, VersionToken};
