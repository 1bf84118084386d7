//! The selection algorithm.
//!
//! Given candidate factories in input order and an optional override version:
//!
//! 1. Probe every candidate. A probe that errors or panics drops that
//!    candidate and nothing else.
//! 2. The effective version is the override when supplied, otherwise the
//!    candidate's own probed version.
//! 3. Keep candidates whose floor is at or below the effective version.
//! 4. Pick the kept candidate with the highest floor; on equal floors the
//!    earliest candidate wins.
//! 5. Build the winner's adapter.
//!
//! Resolution never caches and never touches shared state, so the same
//! inputs always produce the same selection.

use crate::error::ResolveError;
use crate::factory::{AdapterFactory, ProbeError};
use crate::report::{CandidateOutcome, Outcome, ResolutionReport};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use versiongate_version::VersionToken;

/// An adapter together with the report explaining why it was chosen.
pub struct Resolution<A: ?Sized> {
    pub adapter: Box<A>,
    pub report: ResolutionReport,
}

impl<A: ?Sized> Resolution<A> {
    /// Name of the factory that built the adapter.
    pub fn selected_name(&self) -> &str {
        self.report
            .selected()
            .map(|c| c.name.as_str())
            .unwrap_or_default()
    }
}

impl<A: ?Sized> std::fmt::Debug for Resolution<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolution")
            .field("report", &self.report)
            .finish_non_exhaustive()
    }
}

/// Resolves one adapter from `candidates`.
///
/// `override_version` replaces every probed version in the floor comparison;
/// probes still run, and a failing probe still excludes its candidate.
///
/// Panics raised by a candidate's probe or floor are caught and recorded as
/// probe failures, but the process panic hook still runs first, so the
/// default hook prints each one to stderr. Install a hook with
/// [`std::panic::set_hook`] to silence them.
pub fn resolve<A: ?Sized + 'static>(
    candidates: &[Arc<dyn AdapterFactory<A>>],
    override_version: Option<&VersionToken>,
) -> Result<Box<A>, ResolveError> {
    resolve_with_report(candidates, override_version).map(|resolution| resolution.adapter)
}

/// Like [`resolve`], also returning the per-candidate report.
pub fn resolve_with_report<A: ?Sized + 'static>(
    candidates: &[Arc<dyn AdapterFactory<A>>],
    override_version: Option<&VersionToken>,
) -> Result<Resolution<A>, ResolveError> {
    let (report, winner) = evaluate(candidates, override_version);

    let Some((index, min_version)) = winner else {
        tracing::error!(
            target: "versiongate::resolve",
            candidates = candidates.len(),
            "no compatible adapter; the candidate set is missing its default factory"
        );
        return Err(ResolveError::NoCompatibleAdapter {
            attempted: report.candidates,
        });
    };

    let factory = &candidates[index];
    tracing::debug!(
        target: "versiongate::resolve",
        selected = factory.name(),
        %min_version,
        override_version = ?override_version.map(ToString::to_string),
        "selected adapter factory"
    );

    Ok(Resolution {
        adapter: factory.build_adapter(),
        report,
    })
}

/// Probes and filters every candidate. Returns the report and the index and
/// floor of the winner, if any.
fn evaluate<A: ?Sized + 'static>(
    candidates: &[Arc<dyn AdapterFactory<A>>],
    override_version: Option<&VersionToken>,
) -> (ResolutionReport, Option<(usize, VersionToken)>) {
    let mut rows = Vec::with_capacity(candidates.len());
    let mut best: Option<(usize, VersionToken)> = None;

    for (index, factory) in candidates.iter().enumerate() {
        let probed = guarded(|| factory.probe_current_version());
        // Floors may be derived from the probe and panic with it.
        let floor = guarded(|| Ok(factory.min_version()));

        let (min_version, probed) = match (probed, floor) {
            (Err(err), floor) => (floor.ok(), Err(err)),
            (Ok(_), Err(err)) => (None, Err(err)),
            (Ok(current), Ok(floor)) => (Some(floor), Ok((current, floor))),
        };

        let outcome = match probed {
            Err(err) => {
                tracing::debug!(
                    target: "versiongate::resolve",
                    factory = factory.name(),
                    error = %err,
                    "probe failed; dropping candidate"
                );
                Outcome::ProbeFailed {
                    reason: err.to_string(),
                }
            }
            Ok((current, min_version)) => {
                let effective = override_version.copied().unwrap_or(current);
                if effective >= min_version {
                    // Strictly greater keeps the first of equal floors.
                    if best.map_or(true, |(_, floor)| min_version > floor) {
                        best = Some((index, min_version));
                    }
                    Outcome::Compatible { effective }
                } else {
                    tracing::trace!(
                        target: "versiongate::resolve",
                        factory = factory.name(),
                        %effective,
                        %min_version,
                        "candidate below floor"
                    );
                    Outcome::BelowFloor { effective }
                }
            }
        };

        rows.push(CandidateOutcome {
            name: factory.name().to_string(),
            min_version,
            outcome,
        });
    }

    if let Some((index, _)) = best {
        if let Outcome::Compatible { effective } = rows[index].outcome {
            rows[index].outcome = Outcome::Selected { effective };
        }
    }

    let report = ResolutionReport {
        override_version: override_version.copied(),
        candidates: rows,
    };
    (report, best)
}

/// Runs a factory callback, turning a panic into [`ProbeError::Panicked`].
fn guarded<T>(f: impl FnOnce() -> Result<T, ProbeError>) -> Result<T, ProbeError> {
    panic::catch_unwind(AssertUnwindSafe(f))
        .unwrap_or_else(|payload| Err(ProbeError::Panicked(panic_message(payload.as_ref()))))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
