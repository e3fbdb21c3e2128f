//! Weighted nearest-profile classifier
//!
//! Compares one target FeatureTuple against every profile in a
//! ProfileLibrary, keeps the full score table for explainability, and picks
//! the lowest score. Deterministic: the library iterates in registration
//! order and only a strictly lower score displaces the current best, so the
//! first-registered profile wins exact ties.

pub mod scoring;

pub use scoring::ScoringWeights;

use crate::profiles::ProfileLibrary;
use crate::resolver;
use crate::types::{Diagnosis, DiagnosisError, FeatureTuple};

/// Ranks library profiles against a target.
#[derive(Debug, Clone, Copy, Default)]
pub struct Classifier {
    weights: ScoringWeights,
}

impl Classifier {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    /// Score `target` against every profile and resolve the best match.
    ///
    /// Fails with `NoProfiles` on an empty library; never invents a match.
    pub fn classify(
        &self,
        target: &FeatureTuple,
        library: &ProfileLibrary,
    ) -> Result<Diagnosis, DiagnosisError> {
        let mut rows = Vec::with_capacity(library.len());
        let mut best: Option<(usize, f64)> = None;

        for (name, learned) in library.iter() {
            let row = self.weights.score_row(name, target, learned);
            tracing::debug!(
                profile = %name,
                d_shape = row.d_shape,
                d_strength = row.d_strength,
                d_drops = row.d_drops,
                score = row.total_score,
                "Scored profile"
            );

            if best.map_or(true, |(_, lowest)| row.total_score < lowest) {
                best = Some((rows.len(), row.total_score));
            }
            rows.push(row);
        }

        let (best_idx, lowest_score) = best.ok_or(DiagnosisError::NoProfiles)?;
        let best_match = rows[best_idx].profile.clone();
        let description = resolver::resolve(&best_match).to_string();

        tracing::info!(
            best_match = %best_match,
            score = lowest_score,
            diagnosis = %description,
            "Classification complete"
        );

        Ok(Diagnosis {
            best_match,
            description,
            lowest_score,
            target: *target,
            rows,
        })
    }
}

/// Classify with the reference weights.
pub fn classify(target: &FeatureTuple, library: &ProfileLibrary) -> Result<Diagnosis, DiagnosisError> {
    Classifier::default().classify(target, library)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn library(entries: &[(&str, FeatureTuple)]) -> ProfileLibrary {
        let mut lib = ProfileLibrary::new();
        for (name, features) in entries {
            lib.insert(name, *features);
        }
        lib
    }

    #[test]
    fn test_gain_scenario_picks_gain() {
        let lib = library(&[
            ("HEALTHY", FeatureTuple::new(0.96, 1.0, 0)),
            ("GAIN", FeatureTuple::new(0.42, 0.28, 480)),
        ]);
        let target = FeatureTuple::new(0.40, 0.3, 500);
        let diagnosis = classify(&target, &lib).unwrap();

        assert_eq!(diagnosis.best_match, "GAIN");
        assert_eq!(diagnosis.description, "Gain Stage Failure (Potentiometer)");
        assert!((diagnosis.lowest_score - 3.4).abs() < 1e-9);
        assert_eq!(diagnosis.rows.len(), 2);
        assert_eq!(diagnosis.rows[0].profile, "HEALTHY");
        assert!((diagnosis.rows[0].total_score - 101.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_library_is_no_profiles() {
        let target = FeatureTuple::new(0.9, 1.0, 0);
        let err = classify(&target, &ProfileLibrary::new()).unwrap_err();
        assert!(matches!(err, DiagnosisError::NoProfiles));
    }

    #[test]
    fn test_exact_match_wins_with_zero_score() {
        let power = FeatureTuple::new(0.71, 0.55, 40);
        let lib = library(&[
            ("HEALTHY", FeatureTuple::new(0.97, 1.01, 0)),
            ("POWER", power),
            ("CONN", FeatureTuple::new(0.60, 0.9, 2100)),
        ]);
        let diagnosis = classify(&power, &lib).unwrap();
        assert_eq!(diagnosis.best_match, "POWER");
        assert_eq!(diagnosis.lowest_score, 0.0);
    }

    #[test]
    fn test_first_registered_wins_ties() {
        let twin = FeatureTuple::new(0.5, 0.5, 10);
        let target = FeatureTuple::new(0.6, 0.5, 10);

        let lib = library(&[("CONN", twin), ("GAIN", twin)]);
        assert_eq!(classify(&target, &lib).unwrap().best_match, "CONN");

        let lib = library(&[("GAIN", twin), ("CONN", twin)]);
        assert_eq!(classify(&target, &lib).unwrap().best_match, "GAIN");
    }

    #[test]
    fn test_classify_is_idempotent() {
        let lib = library(&[
            ("HEALTHY", FeatureTuple::new(0.96, 1.02, 2)),
            ("GAIN", FeatureTuple::new(0.42, 0.28, 480)),
            ("CONN", FeatureTuple::new(0.55, 0.95, 1800)),
            ("POWER", FeatureTuple::new(0.80, 0.60, 0)),
        ]);
        let target = FeatureTuple::new(0.81, 0.66, 12);
        let first = classify(&target, &lib).unwrap();
        let second = classify(&target, &lib).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.best_match, "POWER");
    }

    #[test]
    fn test_unknown_profile_name_resolves_to_unknown_fault() {
        let lib = library(&[("CUSTOM", FeatureTuple::new(0.9, 1.0, 0))]);
        let diagnosis = classify(&FeatureTuple::new(0.9, 1.0, 0), &lib).unwrap();
        assert_eq!(diagnosis.best_match, "CUSTOM");
        assert_eq!(diagnosis.description, "Unknown Fault");
    }
}
