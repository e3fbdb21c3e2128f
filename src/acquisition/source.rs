//! Series source abstraction for reference and target captures.
//!
//! Provides a unified trait for obtaining a SampleSeries from different
//! origins: capture tables on disk, or series already held in memory
//! (stdin reads, test fixtures).

use std::path::{Path, PathBuf};

use super::load_table;
use crate::types::{SampleSeries, SeriesError};

/// Trait abstracting where a capture comes from.
///
/// Loading may fail; callers decide whether a failure is fatal (target
/// capture) or recoverable (one reference profile among several).
pub trait SeriesSource {
    /// Produce the series, or explain why it is unavailable.
    fn load_series(&self) -> Result<SampleSeries, SeriesError>;

    /// Human-readable origin for logging and error messages.
    fn describe(&self) -> String;
}

// ============================================================================
// CSV Table Source
// ============================================================================

/// A `Sent,Recv` table on disk.
#[derive(Debug, Clone)]
pub struct CsvTableSource {
    path: PathBuf,
    min_samples: usize,
}

impl CsvTableSource {
    pub fn new(path: impl Into<PathBuf>, min_samples: usize) -> Self {
        Self {
            path: path.into(),
            min_samples,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SeriesSource for CsvTableSource {
    fn load_series(&self) -> Result<SampleSeries, SeriesError> {
        load_table(&self.path, self.min_samples)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

// ============================================================================
// In-memory Source
// ============================================================================

impl SeriesSource for SampleSeries {
    fn load_series(&self) -> Result<SampleSeries, SeriesError> {
        Ok(self.clone())
    }

    fn describe(&self) -> String {
        format!("in-memory series ({} samples)", self.len())
    }
}

impl<S: SeriesSource + ?Sized> SeriesSource for Box<S> {
    fn load_series(&self) -> Result<SampleSeries, SeriesError> {
        (**self).load_series()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_source_yields_clone() {
        let series = SampleSeries::from_pairs(vec![(1, 1), (2, 2)]).unwrap();
        let loaded = series.load_series().unwrap();
        assert_eq!(loaded, series);
        assert!(series.describe().contains("2 samples"));
    }

    #[test]
    fn test_csv_source_reports_missing_file() {
        let source = CsvTableSource::new("/nonexistent/gain.csv", 10);
        assert_eq!(source.describe(), "/nonexistent/gain.csv");
        assert!(matches!(
            source.load_series(),
            Err(SeriesError::Io { .. })
        ));
    }

    #[test]
    fn test_boxed_sources_are_interchangeable() {
        let sources: Vec<Box<dyn SeriesSource>> = vec![
            Box::new(SampleSeries::from_pairs(vec![(1, 1)]).unwrap()),
            Box::new(CsvTableSource::new("/nonexistent/power.csv", 10)),
        ];
        assert!(sources[0].load_series().is_ok());
        assert!(sources[1].load_series().is_err());
    }
}
