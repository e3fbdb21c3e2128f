//! Diagnosis Configuration Module
//!
//! Provides session configuration loaded from TOML files, replacing the
//! hand-tuned scoring weights and thresholds with operator-tunable values.
//!
//! ## Loading Order
//!
//! 1. `RELAY_DIAG_CONFIG` environment variable (path to TOML file)
//! 2. `relay_diag.toml` in the current working directory
//! 3. Built-in defaults (the reference weights 100 / 50 / 1⁄50)
//!
//! ## Usage
//!
//! ```ignore
//! let config = DiagConfig::load()?;
//! let session = DiagnosticSession::train(&config);
//! ```

mod diag_config;
pub mod defaults;
pub mod validation;

pub use diag_config::*;
