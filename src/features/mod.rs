//! Feature extraction for captured relay traces
//!
//! Reduces a SampleSeries to the three descriptors the classifier compares:
//! - `shape`: Pearson correlation of stimulus vs response
//! - `strength`: response/stimulus standard-deviation ratio
//! - `drops`: response samples below the dropout threshold
//!
//! Statistics (means, standard deviations, covariance) come from statrs.

pub mod extractor;

pub use extractor::{FeatureConfig, FeatureExtractor};
