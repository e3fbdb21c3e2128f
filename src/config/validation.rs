//! Typo detection for `relay_diag.toml`.
//!
//! Serde silently ignores keys it does not know, so a misspelt
//! `shape_wieght` would leave the default weight in force without a word.
//! Before deserializing, the raw document is flattened into dotted key paths
//! and each path outside [`known_config_keys`] is reported, with the nearest
//! known path as a hint when one is close enough.

use std::collections::HashSet;

/// Largest edit distance at which a known key is offered as a correction.
const MAX_SUGGESTION_DISTANCE: usize = 3;

/// A config key serde would have ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKey {
    /// Dotted path, e.g. `scoring.shape_wieght`
    pub key: String,
    /// Closest known path, if any is within reach
    pub suggestion: Option<String>,
}

impl std::fmt::Display for UnknownKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.suggestion {
            Some(hint) => write!(f, "Unknown config key '{}' (did you mean '{}'?)", self.key, hint),
            None => write!(f, "Unknown config key '{}'", self.key),
        }
    }
}

/// Every dotted path `DiagConfig` deserializes, section headers included.
pub fn known_config_keys() -> HashSet<&'static str> {
    [
        "features",
        "features.dropout_threshold",
        "features.min_samples",
        "scoring",
        "scoring.shape_weight",
        "scoring.strength_weight",
        "scoring.drops_divisor",
        "profiles",
        "profiles.reference_dir",
        "profiles.allow_partial_library",
    ]
    .into_iter()
    .collect()
}

/// Flatten a TOML table into dotted key paths, parents before children.
///
/// `[scoring] shape_weight = 1` yields `scoring` and `scoring.shape_weight`.
pub fn dotted_keys(table: &toml::Table) -> Vec<String> {
    let mut keys = Vec::new();
    push_keys(table, None, &mut keys);
    keys
}

fn push_keys(table: &toml::Table, parent: Option<&str>, keys: &mut Vec<String>) {
    for (name, value) in table {
        let path = parent.map_or_else(|| name.clone(), |p| format!("{p}.{name}"));
        if let toml::Value::Table(child) = value {
            keys.push(path.clone());
            push_keys(child, Some(&path), keys);
        } else {
            keys.push(path);
        }
    }
}

/// Character-level edit distance (insert, delete, substitute).
fn levenshtein(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b.len()).collect();

    for (i, ca) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = (above + 1)
                .min(row[j] + 1)
                .min(diagonal + usize::from(ca != cb));
            diagonal = above;
        }
    }

    row[b.len()]
}

/// Nearest known key within [`MAX_SUGGESTION_DISTANCE`] edits.
///
/// Equal distances resolve to the alphabetically first key, so the hint does
/// not depend on set iteration order.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    known
        .iter()
        .map(|&candidate| (levenshtein(unknown, candidate), candidate))
        .filter(|&(distance, _)| distance <= MAX_SUGGESTION_DISTANCE)
        .min()
        .map(|(_, candidate)| candidate.to_string())
}

/// Report every key in `raw_toml` that `DiagConfig` does not define.
///
/// A document that is not valid TOML yields nothing here; deserialization
/// reports that error with its location.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<UnknownKey> {
    let Ok(table) = raw_toml.parse::<toml::Table>() else {
        return Vec::new();
    };

    let known = known_config_keys();
    dotted_keys(&table)
        .into_iter()
        .filter(|key| !known.contains(key.as_str()))
        .map(|key| UnknownKey {
            suggestion: suggest_correction(&key, &known),
            key,
        })
        .collect()
}
