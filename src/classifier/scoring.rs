//! Weighted distance between two feature tuples
//!
//! `score = |Δshape| × shape_weight + |Δstrength| × strength_weight + |Δdrops| / drops_divisor`
//!
//! The three descriptors live on very different scales (shape in [-1, 1],
//! strength around 1, drops in the thousands); the weights bring them onto a
//! comparable footing. They are a hand-tuned heuristic, not a statistical
//! distance.

use serde::{Deserialize, Serialize};

use crate::config::defaults::{DROPS_DIVISOR, SHAPE_WEIGHT, STRENGTH_WEIGHT};
use crate::types::{FeatureTuple, ScoreRow};

/// Scoring weights, loaded from the `[scoring]` config section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    #[serde(default = "default_shape_weight")]
    pub shape_weight: f64,

    #[serde(default = "default_strength_weight")]
    pub strength_weight: f64,

    #[serde(default = "default_drops_divisor")]
    pub drops_divisor: f64,
}

fn default_shape_weight() -> f64 {
    SHAPE_WEIGHT
}
fn default_strength_weight() -> f64 {
    STRENGTH_WEIGHT
}
fn default_drops_divisor() -> f64 {
    DROPS_DIVISOR
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            shape_weight: SHAPE_WEIGHT,
            strength_weight: STRENGTH_WEIGHT,
            drops_divisor: DROPS_DIVISOR,
        }
    }
}

impl ScoringWeights {
    /// Compare `target` against one profile and build its score row.
    pub fn score_row(&self, profile: &str, target: &FeatureTuple, learned: &FeatureTuple) -> ScoreRow {
        let d_shape = (target.shape - learned.shape).abs();
        let d_strength = (target.strength - learned.strength).abs();
        let d_drops = target.drops.abs_diff(learned.drops);

        ScoreRow {
            profile: profile.to_string(),
            d_shape,
            d_strength,
            d_drops,
            total_score: self.combine(d_shape, d_strength, d_drops),
        }
    }

    /// Weighted sum of absolute deltas.
    pub fn combine(&self, d_shape: f64, d_strength: f64, d_drops: usize) -> f64 {
        let score_shape = d_shape * self.shape_weight;
        let score_strength = d_strength * self.strength_weight;
        let score_drops = d_drops as f64 / self.drops_divisor;
        score_shape + score_strength + score_drops
    }
}
