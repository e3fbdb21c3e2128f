//! Shared data structures for signal-relay fault diagnosis
//!
//! This module defines the core types for the diagnosis pipeline:
//! - Stage 1: SampleSeries (paired stimulus/response samples)
//! - Stage 2: FeatureTuple (shape, strength, drops descriptors)
//! - Stage 3: ScoreRow / Diagnosis (classifier output)
//!
//! Error enums shared across stages live next to the types they describe.

mod series;
mod features;
mod diagnosis;

pub use series::*;
pub use features::*;
pub use diagnosis::*;
