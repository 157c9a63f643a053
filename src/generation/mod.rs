//! Structured generation: one chat-completions call per lookup.

pub mod client;
pub mod prompt;

pub use client::{GenerationClient, GenerationClientBuilder, GenerationEndpoint};
pub use prompt::{vocab_info_prompt, SYSTEM_PROMPT};

use crate::Result;
use async_trait::async_trait;

/// Produces raw model text for a `(vocab, language)` lookup.
///
/// Implementations make exactly one attempt; retry policy belongs to the caller.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, vocab: &str, language: &str) -> Result<String>;
}
