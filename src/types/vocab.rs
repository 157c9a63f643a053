//! Vocabulary record returned to callers and stored in the cache.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Structured lexical information for one word, explained in one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct VocabInfoRecord {
    /// The headword, case preserved.
    pub vocab: String,
    /// Explanation language, free-form (e.g. "Vietnamese").
    pub language: String,
    /// Example sentences ordered from easiest to hardest.
    #[schemars(length(max = 3))]
    pub examples: Vec<ExampleItem>,
    pub synonyms: Vec<SynonymItem>,
    pub origin: OriginInfo,
}

/// Difficulty level of an example sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ExampleLevel {
    Easy,
    Medium,
    Hard,
}

impl ExampleLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExampleLevel::Easy => "easy",
            ExampleLevel::Medium => "medium",
            ExampleLevel::Hard => "hard",
        }
    }
}

impl std::fmt::Display for ExampleLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ExampleItem {
    pub level: ExampleLevel,
    /// English sentence using the headword.
    pub sentence: String,
    /// Translation or explanation in the target language.
    pub translation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SynonymItem {
    pub word: String,
    /// Meaning explained in the target language.
    pub meaning: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct OriginInfo {
    pub etymology: String,
    #[serde(default)]
    pub historical_context: Option<String>,
}

impl VocabInfoRecord {
    /// True when examples never step down in difficulty.
    pub fn examples_in_order(&self) -> bool {
        self.examples
            .windows(2)
            .all(|pair| pair[0].level <= pair[1].level)
    }
}
