//! Diagnosis rendering
//!
//! - `terminal`: fixed-column text tables for console output
//! - `json`: machine-readable report with a generation timestamp

pub mod json;
pub mod terminal;

pub use json::DiagnosisReport;
