//! Ordered profile library and its construction report

use crate::acquisition::SeriesSource;
use crate::features::FeatureExtractor;
use crate::types::{DiagnosisError, FeatureTuple, MissingProfile};

/// Ordered mapping of profile name → learned features.
///
/// Names are upper-cased on insert and unique. Iteration follows
/// registration order, which is what makes classifier tie-breaks
/// deterministic. Immutable once handed to a classifier, so it can be shared
/// across threads freely.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileLibrary {
    entries: Vec<(String, FeatureTuple)>,
}

impl ProfileLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a profile. Re-registering a name replaces its features but
    /// keeps its original position.
    pub fn insert(&mut self, name: &str, features: FeatureTuple) {
        let key = name.trim().to_uppercase();
        match self.entries.iter_mut().find(|(n, _)| *n == key) {
            Some(entry) => entry.1 = features,
            None => self.entries.push((key, features)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FeatureTuple> {
        let key = name.trim().to_uppercase();
        self.entries.iter().find(|(n, _)| *n == key).map(|(_, f)| f)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Profiles in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FeatureTuple)> {
        self.entries.iter().map(|(n, f)| (n.as_str(), f))
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Learn one profile per named source.
    ///
    /// Sources that fail to load or are too short are skipped and reported in
    /// [`LibraryBuild::failures`]; the build itself never fails.
    pub fn build<I, N, S>(extractor: &FeatureExtractor, named_sources: I) -> LibraryBuild
    where
        I: IntoIterator<Item = (N, S)>,
        N: AsRef<str>,
        S: SeriesSource,
    {
        let mut library = Self::new();
        let mut failures = Vec::new();

        for (name, source) in named_sources {
            let name = name.as_ref().trim().to_uppercase();
            match extractor.extract_from(&source) {
                Ok(features) => {
                    tracing::info!(
                        profile = %name,
                        shape = features.shape,
                        strength = features.strength,
                        drops = features.drops,
                        "Learned profile"
                    );
                    library.insert(&name, features);
                }
                Err(error) => {
                    tracing::warn!(profile = %name, error = %error, "Skipping reference profile");
                    failures.push(ProfileFailure { name, error });
                }
            }
        }

        LibraryBuild { library, failures }
    }
}

/// A reference profile that could not be learned.
#[derive(Debug)]
pub struct ProfileFailure {
    pub name: String,
    pub error: DiagnosisError,
}

/// Outcome of [`ProfileLibrary::build`]: the (possibly partial) library plus
/// every per-profile failure.
#[derive(Debug, Default)]
pub struct LibraryBuild {
    pub library: ProfileLibrary,
    pub failures: Vec<ProfileFailure>,
}

impl LibraryBuild {
    /// Refuse to proceed unless every expected profile was learned.
    ///
    /// The error lists each missing profile together with the reason its
    /// reference failed, when one was attempted.
    pub fn require_complete(&self, expected: &[&str]) -> Result<(), DiagnosisError> {
        let missing: Vec<MissingProfile> = expected
            .iter()
            .filter(|name| !self.library.contains(name))
            .map(|name| {
                let key = name.trim().to_uppercase();
                MissingProfile {
                    reason: self
                        .failures
                        .iter()
                        .find(|f| f.name == key)
                        .map(|f| f.error.to_string()),
                    name: key,
                }
            })
            .collect();

        if missing.is_empty() {
            return Ok(());
        }
        Err(DiagnosisError::LibraryIncomplete {
            loaded: expected.len() - missing.len(),
            expected: expected.len(),
            missing,
        })
    }
}
