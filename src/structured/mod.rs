//! Structured output: turning raw model text into a validated
//! [`VocabInfoRecord`].
//!
//! - [`extract_json_object`]: locate a JSON object in free-form text
//! - [`RecordValidator`]: check it against the record schema
//! - [`ResponseExtractor`]: both steps, in order
//!
//! ```
//! use vocab_info::structured::ResponseExtractor;
//!
//! let extractor = ResponseExtractor::new().unwrap();
//! let raw = r#"```json
//! {"vocab": "run", "language": "Vietnamese",
//!  "examples": [{"level": "easy", "sentence": "I run.", "translation": "Tôi chạy."}],
//!  "synonyms": [], "origin": {"etymology": "Old English rinnan"}}
//! ```"#;
//! let record = extractor.extract(raw).unwrap();
//! assert_eq!(record.vocab, "run");
//! ```

pub mod error;
pub mod extract;
pub mod validator;

pub use error::ValidationError;
pub use extract::extract_json_object;
pub use validator::{vocab_info_schema, RecordValidator};

use crate::types::VocabInfoRecord;
use crate::Result;
use tracing::debug;

pub struct ResponseExtractor {
    validator: RecordValidator,
}

impl ResponseExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            validator: RecordValidator::new()?,
        })
    }

    /// Extract and validate. `MalformedOutput` when no object is found,
    /// `SchemaInvalid` when one is found with the wrong shape.
    pub fn extract(&self, raw: &str) -> Result<VocabInfoRecord> {
        let value = extract_json_object(raw)?;
        let record = self.validator.validate(&value)?;
        debug!(vocab = %record.vocab, examples = record.examples.len(), "model output validated");
        Ok(record)
    }
}
