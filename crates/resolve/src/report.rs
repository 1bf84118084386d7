//! Per-candidate outcomes recorded during one resolution.

use serde::{Deserialize, Serialize};
use std::fmt;
use versiongate_version::VersionToken;

/// What happened to a single candidate factory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Outcome {
    /// The probe returned an error or panicked; the candidate was dropped.
    ProbeFailed { reason: String },
    /// The effective version is below the candidate's floor.
    BelowFloor { effective: VersionToken },
    /// Compatible, but another candidate had a higher (or equal, earlier) floor.
    Compatible { effective: VersionToken },
    /// Compatible and chosen.
    Selected { effective: VersionToken },
}

impl Outcome {
    pub fn is_compatible(&self) -> bool {
        matches!(self, Self::Compatible { .. } | Self::Selected { .. })
    }

    /// Returns a human-readable description of the outcome.
    pub fn description(&self) -> String {
        match self {
            Self::ProbeFailed { reason } => format!("probe failed: {}", reason),
            Self::BelowFloor { effective } => format!("{} is below floor", effective),
            Self::Compatible { effective } => format!("compatible with {}, not chosen", effective),
            Self::Selected { effective } => format!("selected for {}", effective),
        }
    }
}

/// One row of a [`ResolutionReport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateOutcome {
    /// Factory name.
    pub name: String,
    /// Declared compatibility floor; `None` when reading it panicked.
    pub min_version: Option<VersionToken>,
    pub outcome: Outcome,
}

impl fmt::Display for CandidateOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.min_version {
            Some(floor) => write!(f, "{} (min {}): ", self.name, floor)?,
            None => write!(f, "{} (min unknown): ", self.name)?,
        }
        f.write_str(&self.outcome.description())
    }
}

/// Full record of a resolution, in candidate input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionReport {
    /// Version used in place of every probe result, if one was supplied.
    pub override_version: Option<VersionToken>,
    pub candidates: Vec<CandidateOutcome>,
}

impl ResolutionReport {
    /// The selected candidate, if any.
    pub fn selected(&self) -> Option<&CandidateOutcome> {
        self.candidates
            .iter()
            .find(|c| matches!(c.outcome, Outcome::Selected { .. }))
    }

    pub fn probe_failures(&self) -> usize {
        self.candidates
            .iter()
            .filter(|c| matches!(c.outcome, Outcome::ProbeFailed { .. }))
            .count()
    }

    pub fn compatible_count(&self) -> usize {
        self.candidates
            .iter()
            .filter(|c| c.outcome.is_compatible())
            .count()
    }

    /// Generates a formatted summary for display.
    pub fn format_summary(&self) -> String {
        let mut out = String::new();
        match self.selected() {
            Some(selected) => out.push_str(&format!("Resolved adapter: {}\n", selected.name)),
            None => out.push_str("Resolved adapter: none\n"),
        }
        if let Some(version) = &self.override_version {
            out.push_str(&format!("  Override version: {}\n", version));
        }
        for candidate in &self.candidates {
            out.push_str(&format!("  - {}\n", candidate));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, min: VersionToken, outcome: Outcome) -> CandidateOutcome {
        CandidateOutcome {
            name: name.into(),
            min_version: Some(min),
            outcome,
        }
    }

    fn sample() -> ResolutionReport {
        let effective = VersionToken::new(8, 1, 0);
        ResolutionReport {
            override_version: None,
            candidates: vec![
                row(
                    "legacy",
                    VersionToken::new(7, 0, 0),
                    Outcome::ProbeFailed {
                        reason: "unavailable: VariantManager".into(),
                    },
                ),
                row("v8", VersionToken::new(8, 0, 0), Outcome::Selected { effective }),
                row("v9", VersionToken::new(9, 0, 0), Outcome::BelowFloor { effective }),
                row("default", VersionToken::MIN, Outcome::Compatible { effective }),
            ],
        }
    }

    #[test]
    fn counts_and_selection() {
        let report = sample();
        assert_eq!(report.selected().map(|c| c.name.as_str()), Some("v8"));
        assert_eq!(report.probe_failures(), 1);
        assert_eq!(report.compatible_count(), 2);
    }

    #[test]
    fn summary_lists_every_candidate() {
        let summary = sample().format_summary();
        assert!(summary.starts_with("Resolved adapter: v8"));
        assert!(summary.contains("legacy (min 7.0.0): probe failed: unavailable: VariantManager"));
        assert!(summary.contains("v9 (min 9.0.0): 8.1.0 is below floor"));
        assert!(summary.contains("default (min 0.0.0-dev)"));
    }

    #[test]
    fn serializes_outcome_with_type_tag() {
        let json = serde_json::to_value(&sample().candidates[1]).unwrap();
        assert_eq!(json["outcome"]["type"], "Selected");
        assert_eq!(json["outcome"]["effective"], "8.1.0");
        assert_eq!(json["min_version"], "8.0.0");
    }

    #[test]
    fn unreadable_floor_renders_as_unknown() {
        let candidate = CandidateOutcome {
            name: "derived".into(),
            min_version: None,
            outcome: Outcome::ProbeFailed {
                reason: "probe panicked: no runtime".into(),
            },
        };
        assert_eq!(
            candidate.to_string(),
            "derived (min unknown): probe failed: probe panicked: no runtime"
        );
        let json = serde_json::to_value(&candidate).unwrap();
        assert!(json["min_version"].is_null());
    }
}
