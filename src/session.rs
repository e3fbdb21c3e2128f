//! Diagnostic session: train → completeness gate → extract → classify
//!
//! A session owns one immutable profile library, built once from the
//! reference captures, and diagnoses any number of targets against it.

use crate::acquisition::{CsvTableSource, SeriesSource};
use crate::classifier::Classifier;
use crate::config::DiagConfig;
use crate::features::FeatureExtractor;
use crate::profiles::{LibraryBuild, ProfileFailure, ProfileLibrary};
use crate::resolver::FaultProfile;
use crate::types::{Diagnosis, DiagnosisError};

pub struct DiagnosticSession {
    extractor: FeatureExtractor,
    classifier: Classifier,
    build: LibraryBuild,
    allow_partial: bool,
}

impl DiagnosticSession {
    /// Learn the four reference profiles from `profiles.reference_dir`.
    ///
    /// Never fails; check [`Self::failures`] or let [`Self::diagnose`]
    /// enforce completeness.
    pub fn train(config: &DiagConfig) -> Self {
        let dir = &config.profiles.reference_dir;
        tracing::info!(reference_dir = %dir.display(), "Training profile library");

        let sources = FaultProfile::ALL.into_iter().map(|profile| {
            (
                profile.name(),
                CsvTableSource::new(dir.join(profile.file_name()), config.features.min_samples),
            )
        });
        Self::with_sources(config, sources)
    }

    /// Learn profiles from caller-supplied sources, in the given order.
    pub fn with_sources<I, N, S>(config: &DiagConfig, named_sources: I) -> Self
    where
        I: IntoIterator<Item = (N, S)>,
        N: AsRef<str>,
        S: SeriesSource,
    {
        let extractor = FeatureExtractor::new(config.features);
        let build = ProfileLibrary::build(&extractor, named_sources);

        tracing::info!(
            learned = build.library.len(),
            failed = build.failures.len(),
            "Profile library built"
        );

        Self {
            extractor,
            classifier: Classifier::new(config.scoring),
            build,
            allow_partial: config.profiles.allow_partial_library,
        }
    }

    pub fn library(&self) -> &ProfileLibrary {
        &self.build.library
    }

    pub fn failures(&self) -> &[ProfileFailure] {
        &self.build.failures
    }

    /// Completeness gate applied before every classification.
    ///
    /// With `allow_partial_library` unset, all four fault categories must be
    /// present. With it set, a partial library is accepted (with a warning);
    /// an empty one still fails at classification with `NoProfiles`.
    pub fn ensure_ready(&self) -> Result<(), DiagnosisError> {
        let expected = FaultProfile::names();
        match self.build.require_complete(&expected) {
            Ok(()) => Ok(()),
            Err(err) if self.allow_partial => {
                tracing::warn!(error = %err, "Diagnosing with a partial profile library");
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    /// Diagnose one target capture.
    pub fn diagnose<S>(&self, target: &S) -> Result<Diagnosis, DiagnosisError>
    where
        S: SeriesSource + ?Sized,
    {
        self.ensure_ready()?;
        let features = self.extractor.extract_from(target)?;
        tracing::info!(
            origin = %target.describe(),
            shape = features.shape,
            strength = features.strength,
            drops = features.drops,
            "Target features"
        );
        self.classifier.classify(&features, &self.build.library)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SampleSeries;

    fn capture(gain: f64, dropout_every: Option<usize>) -> SampleSeries {
        SampleSeries::from_pairs((0..200).map(|i| {
            let sent = 512 + ((i as f64 * 0.2).sin() * 300.0) as i64;
            let mut recv = 512 + ((sent - 512) as f64 * gain) as i64;
            if dropout_every.is_some_and(|n| i % n == 0) {
                recv = 0;
            }
            (sent, recv)
        }))
        .unwrap()
    }

    fn references() -> Vec<(&'static str, SampleSeries)> {
        vec![
            ("HEALTHY", capture(1.0, None)),
            ("GAIN", capture(0.3, None)),
            ("CONN", capture(1.0, Some(3))),
            ("POWER", capture(0.6, Some(50))),
        ]
    }

    #[test]
    fn test_full_library_diagnoses_gain_fault() {
        let session = DiagnosticSession::with_sources(&DiagConfig::default(), references());
        assert!(session.failures().is_empty());
        let diagnosis = session.diagnose(&capture(0.32, None)).unwrap();
        assert_eq!(diagnosis.best_match, "GAIN");
        assert_eq!(diagnosis.rows.len(), 4);
    }

    #[test]
    fn test_partial_library_refused_by_default() {
        let mut refs = references();
        refs.truncate(3);
        let session = DiagnosticSession::with_sources(&DiagConfig::default(), refs);
        let err = session.diagnose(&capture(1.0, None)).unwrap_err();
        assert!(matches!(err, DiagnosisError::LibraryIncomplete { loaded: 3, .. }));
    }

    #[test]
    fn test_partial_library_allowed_when_opted_in() {
        let mut config = DiagConfig::default();
        config.profiles.allow_partial_library = true;
        let mut refs = references();
        refs.truncate(2);
        let session = DiagnosticSession::with_sources(&config, refs);
        let diagnosis = session.diagnose(&capture(1.0, None)).unwrap();
        assert_eq!(diagnosis.best_match, "HEALTHY");
        assert_eq!(diagnosis.rows.len(), 2);
    }

    #[test]
    fn test_empty_library_with_opt_in_is_no_profiles() {
        let mut config = DiagConfig::default();
        config.profiles.allow_partial_library = true;
        let session =
            DiagnosticSession::with_sources(&config, Vec::<(&str, SampleSeries)>::new());
        let err = session.diagnose(&capture(1.0, None)).unwrap_err();
        assert!(matches!(err, DiagnosisError::NoProfiles));
    }

    #[test]
    fn test_unreadable_target_is_data_unavailable() {
        let session = DiagnosticSession::with_sources(&DiagConfig::default(), references());
        let target = CsvTableSource::new("/nonexistent/live_test.csv", 10);
        let err = session.diagnose(&target).unwrap_err();
        assert!(matches!(err, DiagnosisError::DataUnavailable { .. }));
        assert!(err.to_string().contains("live_test.csv"));
    }

    #[test]
    fn test_constant_stimulus_target_still_classifies() {
        let session = DiagnosticSession::with_sources(&DiagConfig::default(), references());
        let flat = SampleSeries::from_pairs((0..100).map(|i| (400, 390 + i % 7))).unwrap();
        let diagnosis = session.diagnose(&flat).unwrap();
        assert_eq!(diagnosis.target.strength, 0.0);
        assert_eq!(diagnosis.rows.len(), 4);
    }
}
