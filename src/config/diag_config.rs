//! Diagnosis Configuration - scoring weights and thresholds as TOML values
//!
//! Every tunable of the pipeline is a field in this module. Each struct
//! implements `Default` with the reference values, so a missing config file
//! reproduces the bench results exactly.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use super::defaults::{CONFIG_ENV_VAR, CONFIG_FILE_NAME, REFERENCE_DIR};
use crate::classifier::ScoringWeights;
use crate::features::FeatureConfig;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for a diagnosis session.
///
/// Load with `DiagConfig::load()` which searches:
/// 1. `$RELAY_DIAG_CONFIG` env var
/// 2. `./relay_diag.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiagConfig {
    /// Feature extraction thresholds
    #[serde(default)]
    pub features: FeatureConfig,

    /// Classifier weights
    #[serde(default)]
    pub scoring: ScoringWeights,

    /// Reference profile locations and completeness policy
    #[serde(default)]
    pub profiles: ProfileConfig,
}

impl DiagConfig {
    /// Load configuration using the standard search order:
    /// 1. `$RELAY_DIAG_CONFIG` environment variable
    /// 2. `./relay_diag.toml` in the current working directory
    /// 3. Built-in defaults
    ///
    /// A file that exists but fails to parse or validate is an error here,
    /// unlike a missing file: diagnosing with silently different weights
    /// would produce misleading results.
    pub fn load() -> Result<Self, ConfigError> {
        let from_env = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
        Self::load_searching(from_env.as_deref(), Path::new(CONFIG_FILE_NAME))
    }

    /// Search order behind [`Self::load`], with the candidates passed in.
    ///
    /// `env_path` is skipped with a warning when it does not exist; `local`
    /// is skipped silently.
    pub fn load_searching(env_path: Option<&Path>, local: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = env_path {
            if path.exists() {
                let config = Self::load_from_file(path)?;
                info!(path = %path.display(), "Loaded config from {}", CONFIG_ENV_VAR);
                return Ok(config);
            }
            warn!(
                path = %path.display(),
                "{} points to non-existent file, falling back",
                CONFIG_ENV_VAR
            );
        }

        if local.exists() {
            let config = Self::load_from_file(local)?;
            info!(path = %local.display(), "Loaded local config");
            return Ok(config);
        }

        info!("No {} found, using built-in defaults", CONFIG_FILE_NAME);
        Ok(Self::default())
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents, &path.display().to_string())
    }

    /// Parse and validate a TOML document. Unknown keys only warn.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Self::parse(contents, "<inline>")
    }

    fn parse(contents: &str, origin: &str) -> Result<Self, ConfigError> {
        for unknown in super::validation::validate_unknown_keys(contents) {
            warn!(origin, "{}", unknown);
        }

        let config: Self = toml::from_str(contents).map_err(|source| ConfigError::Parse {
            origin: origin.to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the current config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate all values for internal consistency.
    ///
    /// Rules:
    /// - Weights must be finite and non-negative
    /// - The drops divisor must be strictly positive (used in division)
    /// - At least two samples are needed for a standard deviation
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors: Vec<String> = Vec::new();
        let s = &self.scoring;

        Self::check_weight(s.shape_weight, "scoring.shape_weight", &mut errors);
        Self::check_weight(s.strength_weight, "scoring.strength_weight", &mut errors);
        if !s.drops_divisor.is_finite() || s.drops_divisor <= 0.0 {
            errors.push(format!(
                "scoring.drops_divisor must be a finite value > 0 (got {})",
                s.drops_divisor
            ));
        }

        if self.features.min_samples < 2 {
            errors.push(format!(
                "features.min_samples must be >= 2 (got {})",
                self.features.min_samples
            ));
        }

        if self.profiles.reference_dir.as_os_str().is_empty() {
            errors.push("profiles.reference_dir must not be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    fn check_weight(value: f64, name: &str, errors: &mut Vec<String>) {
        // NaN comparisons silently pass: catch them explicitly
        if !value.is_finite() {
            errors.push(format!("{name}: value must be finite (got {value})"));
            return;
        }
        if value < 0.0 {
            errors.push(format!("{name}: value must be >= 0 (got {value:.3})"));
        }
    }
}

// ============================================================================
// Profiles
// ============================================================================

/// Where reference captures live and how strictly completeness is enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// Directory containing healthy.csv, gain.csv, conn.csv and power.csv
    #[serde(default = "default_reference_dir")]
    pub reference_dir: PathBuf,

    /// Diagnose even when some reference profiles failed to load
    #[serde(default)]
    pub allow_partial_library: bool,
}

fn default_reference_dir() -> PathBuf {
    PathBuf::from(REFERENCE_DIR)
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            reference_dir: default_reference_dir(),
            allow_partial_library: false,
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid TOML in {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Cannot serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Config rejected: {}", .0.join("; "))]
    Validation(Vec<String>),
}
