//! # vocab-info
//!
//! Cached vocabulary lookups backed by structured LLM generation.
//!
//! A lookup for `(vocab, language)` returns graded example sentences,
//! synonyms, and etymology. Results are cached under a normalized key; a miss
//! triggers one generation call whose output is extracted, validated against a
//! fixed schema, written back, and returned. The cache fails open: an
//! unreachable or slow store reads as a miss and never fails a lookup.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use vocab_info::cache::VocabStoreConfig;
//! use vocab_info::generation::GenerationClient;
//! use vocab_info::VocabInfoService;
//!
//! #[tokio::main]
//! async fn main() -> vocab_info::Result<()> {
//!     let cache = VocabStoreConfig::from_env()?.connect().await;
//!     let generator = GenerationClient::builder().build().await?;
//!     let service = VocabInfoService::new(cache, Arc::new(generator))?;
//!
//!     let record = service.fetch("resilient", "Vietnamese").await?;
//!     println!("{}", record.origin.etymology);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`cache`] | Key normalization, stores, and the fail-open cache adapter |
//! | [`generation`] | Prompt template and chat-completions client |
//! | [`structured`] | JSON extraction and schema validation |
//! | [`types`] | Request and record types |

pub mod cache;
pub mod error;
pub mod generation;
pub mod service;
pub mod structured;
pub mod types;

pub use cache::{CacheKey, VocabCache};
pub use error::{Error, ErrorClass, ErrorContext};
pub use generation::Generator;
pub use service::VocabInfoService;
pub use structured::vocab_info_schema;
pub use types::{
    ExampleItem, ExampleLevel, OriginInfo, SynonymItem, VocabInfoRecord, VocabInfoRequest,
};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;
