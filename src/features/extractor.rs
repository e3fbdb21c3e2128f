//! Shape / strength / drops extraction
//!
//! Pure functions of a SampleSeries. A constant stimulus is a defined
//! degenerate case (strength = 0, shape = 0), not an error.

use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

use crate::acquisition::SeriesSource;
use crate::config::defaults::{DROPOUT_THRESHOLD, MIN_SAMPLES};
use crate::types::{DiagnosisError, FeatureTuple, SampleSeries};

/// Extraction tuning, loaded from the `[features]` config section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureConfig {
    /// Received values strictly below this count as a dropout
    #[serde(default = "default_dropout_threshold")]
    pub dropout_threshold: i64,

    /// Captures shorter than this are refused as insufficient data
    #[serde(default = "default_min_samples")]
    pub min_samples: usize,
}

fn default_dropout_threshold() -> i64 {
    DROPOUT_THRESHOLD
}

fn default_min_samples() -> usize {
    MIN_SAMPLES
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            dropout_threshold: DROPOUT_THRESHOLD,
            min_samples: MIN_SAMPLES,
        }
    }
}

/// Reduces captures to FeatureTuples.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureExtractor {
    config: FeatureConfig,
}

impl FeatureExtractor {
    pub fn new(config: FeatureConfig) -> Self {
        Self { config }
    }

    /// Compute the feature tuple of a series.
    pub fn extract(&self, series: &SampleSeries) -> FeatureTuple {
        let sent: Vec<f64> = series.sent().iter().map(|&v| v as f64).collect();
        let recv: Vec<f64> = series.recv().iter().map(|&v| v as f64).collect();

        let sent_std = sent.iter().population_std_dev();
        let recv_std = recv.iter().population_std_dev();

        let shape = Self::pearson(&sent, &recv, sent_std, recv_std);

        // Constant stimulus: defined as zero strength rather than a division fault
        let strength = if sent_std == 0.0 {
            0.0
        } else {
            recv_std / sent_std
        };

        let drops = series
            .recv()
            .iter()
            .filter(|&&r| r < self.config.dropout_threshold)
            .count();

        FeatureTuple::new(shape, strength, drops)
    }

    /// Load a series from `source`, enforce the minimum length, and extract.
    ///
    /// Any load or length failure becomes `DataUnavailable`; no tuple is
    /// produced in that case.
    pub fn extract_from<S>(&self, source: &S) -> Result<FeatureTuple, DiagnosisError>
    where
        S: SeriesSource + ?Sized,
    {
        let unavailable = |reason| DiagnosisError::DataUnavailable {
            origin: source.describe(),
            reason,
        };

        let series = source.load_series().map_err(unavailable)?;
        series
            .ensure_min_samples(self.config.min_samples)
            .map_err(unavailable)?;

        let features = self.extract(&series);
        tracing::debug!(
            origin = %source.describe(),
            samples = series.len(),
            shape = features.shape,
            strength = features.strength,
            drops = features.drops,
            "Extracted features"
        );
        Ok(features)
    }

    /// Pearson correlation from population moments.
    ///
    /// Formula: r = cov(x, y) / (σx × σy), 0 when either σ is 0.
    fn pearson(x: &[f64], y: &[f64], x_std: f64, y_std: f64) -> f64 {
        if x_std == 0.0 || y_std == 0.0 {
            return 0.0;
        }
        let cov = x.iter().population_covariance(y.iter());
        (cov / (x_std * y_std)).clamp(-1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn series(pairs: Vec<(i64, i64)>) -> SampleSeries {
        SampleSeries::from_pairs(pairs).unwrap()
    }

    #[test]
    fn test_identical_signal_is_perfect_match() {
        let s = series((0..100).map(|i| (i * 10, i * 10)).collect());
        let f = FeatureExtractor::default().extract(&s);
        assert!((f.shape - 1.0).abs() < 1e-9);
        assert!((f.strength - 1.0).abs() < 1e-9);
        // Only the first sample (0) is below the dropout threshold
        assert_eq!(f.drops, 1);
    }

    #[test]
    fn test_half_gain_and_inversion() {
        let s = series((0..100).map(|i| (100 + i * 4, 600 - i * 2)).collect());
        let f = FeatureExtractor::default().extract(&s);
        assert!((f.shape + 1.0).abs() < 1e-9, "shape was {}", f.shape);
        assert!((f.strength - 0.5).abs() < 1e-9, "strength was {}", f.strength);
        assert_eq!(f.drops, 0);
    }

    #[test]
    fn test_constant_stimulus_yields_zero_strength() {
        let s = series((0..50).map(|i| (512, (i * 37) % 1024)).collect());
        let f = FeatureExtractor::default().extract(&s);
        assert_eq!(f.strength, 0.0);
        assert_eq!(f.shape, 0.0);
    }

    #[test]
    fn test_constant_response_yields_zero_shape() {
        let s = series((0..50).map(|i| (i * 3, 200)).collect());
        let f = FeatureExtractor::default().extract(&s);
        assert_eq!(f.shape, 0.0);
        assert_eq!(f.strength, 0.0);
    }

    #[test]
    fn test_drops_counts_strictly_below_threshold() {
        let s = series(vec![(10, 0), (20, 4), (30, 5), (40, 6), (50, -3)]);
        let f = FeatureExtractor::default().extract(&s);
        assert_eq!(f.drops, 3);

        let strict = FeatureExtractor::new(FeatureConfig {
            dropout_threshold: 1,
            ..FeatureConfig::default()
        });
        assert_eq!(strict.extract(&s).drops, 2);
    }

    #[test]
    fn test_random_series_stay_in_range() {
        let mut rng = rand::thread_rng();
        let extractor = FeatureExtractor::default();
        for _ in 0..200 {
            let n = rng.gen_range(10..300);
            let constant_sent = rng.gen_bool(0.1);
            let pairs: Vec<(i64, i64)> = (0..n)
                .map(|_| {
                    let sent = if constant_sent { 300 } else { rng.gen_range(0..1024) };
                    (sent, rng.gen_range(0..1024))
                })
                .collect();
            let f = extractor.extract(&series(pairs));
            assert!((-1.0..=1.0).contains(&f.shape), "shape out of range: {}", f.shape);
            assert!(f.strength >= 0.0, "negative strength: {}", f.strength);
            if constant_sent {
                assert_eq!(f.strength, 0.0);
                assert_eq!(f.shape, 0.0);
            }
        }
    }

    #[test]
    fn test_extract_from_rejects_short_capture() {
        let short = series((0..5).map(|i| (i, i)).collect());
        let err = FeatureExtractor::default().extract_from(&short).unwrap_err();
        match err {
            DiagnosisError::DataUnavailable { origin, reason } => {
                assert!(origin.contains("5 samples"));
                assert!(reason.to_string().contains("need 10, have 5"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_extract_from_matches_extract() {
        let s = series((0..40).map(|i| (i * 5, i * 4 + 3)).collect());
        let extractor = FeatureExtractor::default();
        assert_eq!(extractor.extract_from(&s).unwrap(), extractor.extract(&s));
    }
}
