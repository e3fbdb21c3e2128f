//! FeatureTuple: the three descriptors compared by the classifier

use serde::{Deserialize, Serialize};

/// Descriptors derived from one SampleSeries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureTuple {
    /// Pearson correlation between sent and recv, in [-1, 1].
    /// Zero when either side has no variance.
    pub shape: f64,
    /// stddev(recv) / stddev(sent); exactly 0 when sent is constant.
    pub strength: f64,
    /// Count of recv samples below the dropout threshold.
    pub drops: usize,
}

impl FeatureTuple {
    pub const fn new(shape: f64, strength: f64, drops: usize) -> Self {
        Self {
            shape,
            strength,
            drops,
        }
    }

    /// Shape expressed as a tracking accuracy percentage (bench report figure).
    pub fn accuracy_percent(&self) -> f64 {
        self.shape * 100.0
    }
}

impl std::fmt::Display for FeatureTuple {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Shape={:.2} | Strength={:.2} | Drops={}",
            self.shape, self.strength, self.drops
        )
    }
}
