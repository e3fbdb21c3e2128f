//! JSON diagnosis report

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::Diagnosis;

/// Diagnosis plus the moment it was produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisReport {
    pub generated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub diagnosis: Diagnosis,
    /// Profile names from best to worst match
    pub ranking: Vec<String>,
}

impl DiagnosisReport {
    pub fn new(diagnosis: Diagnosis) -> Self {
        let ranking = diagnosis
            .ranked()
            .into_iter()
            .map(|row| row.profile.clone())
            .collect();
        Self {
            generated_at: Utc::now(),
            diagnosis,
            ranking,
        }
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
