//! Core data types for vocabulary lookups.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`VocabInfoRecord`] | Examples, synonyms, and origin for one word in one explanation language |
//! | [`ExampleItem`] | Example sentence with difficulty level and translation |
//! | [`ExampleLevel`] | Difficulty level (`easy`, `medium`, `hard`) |
//! | [`SynonymItem`] | Synonym with a target-language explanation |
//! | [`OriginInfo`] | Etymology and optional historical context |
//! | [`VocabInfoRequest`] | Validated `(vocab, language)` input |

pub mod request;
pub mod vocab;

pub use request::VocabInfoRequest;
pub use vocab::{ExampleItem, ExampleLevel, OriginInfo, SynonymItem, VocabInfoRecord};
