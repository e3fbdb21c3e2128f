//! Profile name → human-readable fault description
//!
//! The four fault categories recorded on the relay bench, plus an explicit
//! "Unknown Fault" for any name outside that set.

use serde::{Deserialize, Serialize};

/// Description returned for names outside the known fault categories.
pub const UNKNOWN_FAULT: &str = "Unknown Fault";

/// Known fault categories, in reference registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FaultProfile {
    Healthy,
    Gain,
    Conn,
    Power,
}

impl FaultProfile {
    /// All categories in registration order. Ties in classification go to
    /// the earlier entry.
    pub const ALL: [Self; 4] = [Self::Healthy, Self::Gain, Self::Conn, Self::Power];

    /// Canonical (upper-case) profile name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Healthy => "HEALTHY",
            Self::Gain => "GAIN",
            Self::Conn => "CONN",
            Self::Power => "POWER",
        }
    }

    /// File name of the reference capture for this category.
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Healthy => "healthy.csv",
            Self::Gain => "gain.csv",
            Self::Conn => "conn.csv",
            Self::Power => "power.csv",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Healthy => "System Healthy",
            Self::Gain => "Gain Stage Failure (Potentiometer)",
            Self::Conn => "Loose Ribbon Cable (Intermittent Fault)",
            Self::Power => "Power Rail Failure (Diode Clipping)",
        }
    }

    /// Case-insensitive lookup by profile name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(name.trim()))
    }

    /// Canonical names of every category, in registration order.
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|p| p.name()).collect()
    }
}

impl std::fmt::Display for FaultProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Translate a profile name into its fault description.
pub fn resolve(profile_name: &str) -> &'static str {
    FaultProfile::from_name(profile_name).map_or(UNKNOWN_FAULT, FaultProfile::description)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_profiles_resolve() {
        assert_eq!(resolve("HEALTHY"), "System Healthy");
        assert_eq!(resolve("GAIN"), "Gain Stage Failure (Potentiometer)");
        assert_eq!(resolve("CONN"), "Loose Ribbon Cable (Intermittent Fault)");
        assert_eq!(resolve("POWER"), "Power Rail Failure (Diode Clipping)");
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(resolve("conn"), "Loose Ribbon Cable (Intermittent Fault)");
        assert_eq!(FaultProfile::from_name(" Power "), Some(FaultProfile::Power));
    }

    #[test]
    fn test_unknown_name_is_explicit() {
        assert_eq!(resolve("UNKNOWN"), UNKNOWN_FAULT);
        assert_eq!(resolve(""), UNKNOWN_FAULT);
    }

    #[test]
    fn test_file_names_follow_profile_names() {
        for profile in FaultProfile::ALL {
            assert_eq!(
                profile.file_name().trim_end_matches(".csv").to_uppercase(),
                profile.name()
            );
        }
    }
}
