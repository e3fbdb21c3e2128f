//! System-wide default constants.
//!
//! Centralises the numeric knobs of the diagnosis pipeline.
//! Grouped by subsystem for easy discovery.

// ============================================================================
// Feature Extraction
// ============================================================================

/// Received values below this count as a signal dropout (ADC units).
pub const DROPOUT_THRESHOLD: i64 = 5;

/// Minimum sample pairs for variance and correlation to be meaningful.
pub const MIN_SAMPLES: usize = 10;

// ============================================================================
// Scoring
// ============================================================================

/// Multiplier on |Δshape|.
///
/// Shape lives in [-1, 1], so it is amplified to compete with the others.
pub const SHAPE_WEIGHT: f64 = 100.0;

/// Multiplier on |Δstrength|. Strength is typically O(1).
pub const STRENGTH_WEIGHT: f64 = 50.0;

/// Divisor on |Δdrops|.
///
/// Drop counts reach the thousands over a 60 s capture and are suppressed.
pub const DROPS_DIVISOR: f64 = 50.0;

// ============================================================================
// Profiles / Session
// ============================================================================

/// Directory holding the reference capture tables.
pub const REFERENCE_DIR: &str = ".";

/// Default target capture written by the live recording step.
pub const LIVE_CAPTURE_FILE: &str = "live_test.csv";

/// Config file searched for in the working directory.
pub const CONFIG_FILE_NAME: &str = "relay_diag.toml";

/// Environment variable pointing at an explicit config file.
pub const CONFIG_ENV_VAR: &str = "RELAY_DIAG_CONFIG";

// ============================================================================
// Report Layout
// ============================================================================

/// Width of the horizontal rules around the score table.
pub const REPORT_RULE_WIDTH: usize = 65;
