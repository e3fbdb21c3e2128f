//! SampleSeries: index-aligned stimulus/response samples

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or constructing a sample series
#[derive(Error, Debug)]
pub enum SeriesError {
    #[error("Failed to open {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Read error: {0}")]
    Read(#[from] std::io::Error),

    #[error("Empty table: header row is missing")]
    EmptyTable,

    #[error("Missing required column '{0}' in header")]
    MissingColumn(&'static str),

    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Length mismatch: {sent} sent samples vs {recv} received samples")]
    LengthMismatch { sent: usize, recv: usize },

    #[error("Insufficient data: need {needed}, have {available}")]
    InsufficientSamples { needed: usize, available: usize },
}

/// One captured trace: `sent[i]` is the stimulus written to the relay and
/// `recv[i]` the value read back for the same tick.
///
/// Immutable once built; always non-empty with equal-length sides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleSeries {
    sent: Vec<i64>,
    recv: Vec<i64>,
}

impl SampleSeries {
    /// Build a series from two index-aligned sequences.
    pub fn new(sent: Vec<i64>, recv: Vec<i64>) -> Result<Self, SeriesError> {
        if sent.len() != recv.len() {
            return Err(SeriesError::LengthMismatch {
                sent: sent.len(),
                recv: recv.len(),
            });
        }
        if sent.is_empty() {
            return Err(SeriesError::InsufficientSamples {
                needed: 1,
                available: 0,
            });
        }
        Ok(Self { sent, recv })
    }

    /// Build a series from `(sent, recv)` pairs.
    pub fn from_pairs<I>(pairs: I) -> Result<Self, SeriesError>
    where
        I: IntoIterator<Item = (i64, i64)>,
    {
        let (sent, recv): (Vec<i64>, Vec<i64>) = pairs.into_iter().unzip();
        Self::new(sent, recv)
    }

    pub fn sent(&self) -> &[i64] {
        &self.sent
    }

    pub fn recv(&self) -> &[i64] {
        &self.recv
    }

    /// Number of sample pairs.
    pub fn len(&self) -> usize {
        self.sent.len()
    }

    /// Always false for a constructed series; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.sent.is_empty()
    }

    /// Iterate over `(sent, recv)` pairs in capture order.
    pub fn pairs(&self) -> impl Iterator<Item = (i64, i64)> + '_ {
        self.sent.iter().copied().zip(self.recv.iter().copied())
    }

    /// Refuse series too short for variance and correlation to mean anything.
    pub fn ensure_min_samples(&self, needed: usize) -> Result<(), SeriesError> {
        if self.len() < needed {
            return Err(SeriesError::InsufficientSamples {
                needed,
                available: self.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_length_mismatch() {
        let err = SampleSeries::new(vec![1, 2, 3], vec![1, 2]).unwrap_err();
        assert!(matches!(
            err,
            SeriesError::LengthMismatch { sent: 3, recv: 2 }
        ));
    }

    #[test]
    fn test_rejects_empty() {
        let err = SampleSeries::new(Vec::new(), Vec::new()).unwrap_err();
        assert!(matches!(err, SeriesError::InsufficientSamples { .. }));
    }

    #[test]
    fn test_from_pairs_keeps_order() {
        let series = SampleSeries::from_pairs(vec![(10, 9), (20, 18), (30, 27)]).unwrap();
        assert_eq!(series.sent(), &[10, 20, 30]);
        assert_eq!(series.recv(), &[9, 18, 27]);
        assert_eq!(series.pairs().nth(1), Some((20, 18)));
    }

    #[test]
    fn test_min_samples_gate() {
        let series = SampleSeries::from_pairs((0..9).map(|i| (i, i))).unwrap();
        let err = series.ensure_min_samples(10).unwrap_err();
        assert_eq!(err.to_string(), "Insufficient data: need 10, have 9");
        assert!(series.ensure_min_samples(9).is_ok());
    }
}
