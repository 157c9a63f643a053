//! Validated lookup input.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// A `(vocab, language)` pair as submitted by a caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabInfoRequest {
    pub vocab: String,
    pub language: String,
}

impl VocabInfoRequest {
    pub fn new(vocab: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            vocab: vocab.into(),
            language: language.into(),
        }
    }

    /// Reject empty or whitespace-only fields.
    pub fn validate(&self) -> Result<()> {
        if self.vocab.trim().is_empty() {
            return Err(Error::invalid_request("vocab must not be empty", "vocab"));
        }
        if self.language.trim().is_empty() {
            return Err(Error::invalid_request(
                "language must not be empty",
                "language",
            ));
        }
        Ok(())
    }
}
