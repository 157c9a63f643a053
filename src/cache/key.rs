//! Cache key generation.

use serde::{Deserialize, Serialize};

/// Separator between the normalized word and the normalized language.
pub const KEY_SEPARATOR: &str = "_";

/// Canonical identity of a cached vocabulary record.
///
/// Built from `lowercase(trim(vocab)) + "_" + lowercase(trim(language))`, so
/// lookups differing only in case or surrounding whitespace share one entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn normalize(vocab: &str, language: &str) -> Self {
        let mut key = String::with_capacity(vocab.len() + language.len() + 1);
        key.push_str(&vocab.trim().to_lowercase());
        key.push_str(KEY_SEPARATOR);
        key.push_str(&language.trim().to_lowercase());
        Self(key)
    }

    /// Wrap an already-normalized key, e.g. one read back from a store.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Shorthand for [`CacheKey::normalize`].
pub fn normalize(vocab: &str, language: &str) -> CacheKey {
    CacheKey::normalize(vocab, language)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_and_whitespace_insensitive() {
        assert_eq!(
            normalize("Run", "Vietnamese"),
            normalize("  run ", "vietnamese")
        );
        assert_eq!(normalize("Run", "Vietnamese").as_str(), "run_vietnamese");
    }

    #[test]
    fn test_inner_whitespace_is_kept() {
        assert_eq!(
            normalize(" Give Up ", "English").as_str(),
            "give up_english"
        );
    }

    #[test]
    fn test_distinct_languages_distinct_keys() {
        assert_ne!(normalize("run", "Vietnamese"), normalize("run", "Japanese"));
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let key = normalize("Résumé", "French");
        assert_eq!(serde_json::to_value(&key).unwrap(), "résumé_french");
    }
}
