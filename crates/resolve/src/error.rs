use crate::report::CandidateOutcome;
use thiserror::Error;

/// Errors surfaced by resolution.
#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum ResolveError {
    /// No candidate was compatible with the effective version.
    ///
    /// Unreachable while the candidate set contains a default factory.
    #[error("no compatible adapter among {} candidate(s): {}", .attempted.len(), render(.attempted))]
    NoCompatibleAdapter {
        /// Every candidate in input order, with its floor and outcome.
        attempted: Vec<CandidateOutcome>,
    },
}

fn render(attempted: &[CandidateOutcome]) -> String {
    if attempted.is_empty() {
        return "candidate set is empty".to_string();
    }
    attempted
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
