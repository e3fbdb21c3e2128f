//! Classifier output types and the terminal error taxonomy of a diagnosis run

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{FeatureTuple, SeriesError};

/// Per-profile comparison result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRow {
    pub profile: String,
    pub d_shape: f64,
    pub d_strength: f64,
    pub d_drops: usize,
    /// Weighted aggregate distance; lower is a better match.
    pub total_score: f64,
}

/// Final classifier output, including every row for audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnosis {
    /// Name of the best-matching profile
    pub best_match: String,
    /// Human-readable fault description for `best_match`
    pub description: String,
    pub lowest_score: f64,
    /// Features of the capture that was diagnosed
    pub target: FeatureTuple,
    /// One row per library profile, in library order
    pub rows: Vec<ScoreRow>,
}

impl Diagnosis {
    /// Rows sorted by ascending score. Ties keep library order.
    pub fn ranked(&self) -> Vec<&ScoreRow> {
        let mut rows: Vec<&ScoreRow> = self.rows.iter().collect();
        rows.sort_by(|a, b| a.total_score.total_cmp(&b.total_score));
        rows
    }
}

/// A profile the library expected but could not learn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingProfile {
    pub name: String,
    /// Why loading failed, if a source was supplied at all
    pub reason: Option<String>,
}

impl std::fmt::Display for MissingProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.reason {
            Some(reason) => write!(f, "{} ({})", self.name, reason),
            None => write!(f, "{} (no reference supplied)", self.name),
        }
    }
}

fn join_missing(missing: &[MissingProfile]) -> String {
    missing
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Failures that end a diagnosis run.
#[derive(Error, Debug)]
pub enum DiagnosisError {
    #[error("Data unavailable from {origin}: {reason}")]
    DataUnavailable {
        origin: String,
        #[source]
        reason: SeriesError,
    },

    #[error(
        "Profile library incomplete: {loaded} of {expected} profiles loaded, missing {}",
        join_missing(.missing)
    )]
    LibraryIncomplete {
        missing: Vec<MissingProfile>,
        loaded: usize,
        expected: usize,
    },

    #[error("No profiles available: classification needs at least one reference profile")]
    NoProfiles,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, score: f64) -> ScoreRow {
        ScoreRow {
            profile: name.to_string(),
            d_shape: 0.0,
            d_strength: 0.0,
            d_drops: 0,
            total_score: score,
        }
    }

    #[test]
    fn test_ranked_orders_by_score() {
        let diagnosis = Diagnosis {
            best_match: "GAIN".to_string(),
            description: "Gain Stage Failure (Potentiometer)".to_string(),
            lowest_score: 1.0,
            target: FeatureTuple::new(0.5, 0.5, 0),
            rows: vec![row("HEALTHY", 9.0), row("GAIN", 1.0), row("CONN", 4.0)],
        };
        let names: Vec<&str> = diagnosis.ranked().iter().map(|r| r.profile.as_str()).collect();
        assert_eq!(names, vec!["GAIN", "CONN", "HEALTHY"]);
    }

    #[test]
    fn test_library_incomplete_names_missing_profiles() {
        let err = DiagnosisError::LibraryIncomplete {
            missing: vec![
                MissingProfile {
                    name: "CONN".to_string(),
                    reason: Some("Failed to open conn.csv".to_string()),
                },
                MissingProfile {
                    name: "POWER".to_string(),
                    reason: None,
                },
            ],
            loaded: 2,
            expected: 4,
        };
        let msg = err.to_string();
        assert!(msg.contains("2 of 4"));
        assert!(msg.contains("CONN (Failed to open conn.csv)"));
        assert!(msg.contains("POWER (no reference supplied)"));
    }
}
