//! Instruction template for vocabulary lookups.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

pub const SYSTEM_PROMPT: &str = "You are a helpful language expert.";

const TEMPLATE: &str = r#"You are a linguist. Analyse the English word "{vocab}" and return detailed information about it written in {language}.

IMPORTANT:
- ALL returned content (examples, synonyms, origin) MUST be written in {language}
- Only the example sentences ("sentence") are written in English
- Translations ("translation") and every other explanation MUST be in {language}

Return one JSON object with exactly this format (NO markdown, NO code block, plain JSON only):

{
  "vocab": "{vocab}",
  "language": "{language}",
  "examples": [
    {
      "level": "easy",
      "sentence": "An easy example sentence in English",
      "translation": "Explanation or translation in {language}"
    },
    {
      "level": "medium",
      "sentence": "A medium example sentence in English",
      "translation": "Explanation or translation in {language}"
    },
    {
      "level": "hard",
      "sentence": "A hard example sentence in English",
      "translation": "Explanation or translation in {language}"
    }
  ],
  "synonyms": [
    {
      "word": "synonym 1",
      "meaning": "Meaning explained in {language}"
    },
    {
      "word": "synonym 2",
      "meaning": "Meaning explained in {language}"
    }
  ],
  "origin": {
    "etymology": "Origin of the word in {language}",
    "historical_context": "Historical context in {language} (if any)"
  }
}

RULES:
1. Examples: at most 3, ordered from easiest to hardest (easy -> medium -> hard)
2. Synonyms: list common synonyms, each with a meaning in {language}
3. Origin: explain the etymology and historical context (if any) in {language}
4. Every explanation, translation and description MUST be in {language}
5. Only the "sentence" field of each example is in English

Return ONLY the JSON, with no text before or after it."#;

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{(vocab|language)\}").expect("placeholder pattern"));

/// Render the user prompt for one lookup.
///
/// Both placeholders are filled in a single pass, so placeholder text inside
/// the submitted values is left as is.
pub fn vocab_info_prompt(vocab: &str, language: &str) -> String {
    PLACEHOLDER
        .replace_all(TEMPLATE, |caps: &Captures| match &caps[1] {
            "vocab" => vocab.to_string(),
            _ => language.to_string(),
        })
        .into_owned()
}
