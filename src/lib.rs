//! relay-diag: Signal-Relay Fault Diagnosis
//!
//! Diagnoses the fault mode of an analog signal-relay circuit by comparing a
//! captured stimulus/response trace against recorded reference traces.
//!
//! ## Architecture
//!
//! - **Acquisition**: `Sent,Recv` capture tables from files or readers
//! - **Features**: shape (correlation), strength (amplitude ratio), drops
//! - **Profiles**: ordered library of learned reference features
//! - **Classifier**: weighted nearest-profile ranking with full score table
//! - **Resolver**: profile name → fault description
//! - **Session**: train / completeness gate / diagnose orchestration

pub mod config;
pub mod types;
pub mod acquisition;
pub mod features;
pub mod profiles;
pub mod classifier;
pub mod resolver;
pub mod session;
pub mod report;

// Re-export configuration
pub use config::DiagConfig;

// Re-export commonly used types
pub use types::{
    Diagnosis, DiagnosisError, FeatureTuple, MissingProfile, SampleSeries, ScoreRow, SeriesError,
};

// Re-export pipeline components
pub use acquisition::{CsvTableSource, SeriesSource};
pub use classifier::{classify, Classifier, ScoringWeights};
pub use features::{FeatureConfig, FeatureExtractor};
pub use profiles::{LibraryBuild, ProfileFailure, ProfileLibrary};
pub use resolver::{resolve, FaultProfile};
pub use session::DiagnosticSession;
