use crate::structured::ValidationError;
use thiserror::Error;

/// Structured error context for better error handling and debugging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Field path or configuration key that caused the error (e.g., "vocab", "AZURE_OPENAI_ENDPOINT")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., response excerpt, HTTP status text)
    pub details: Option<String>,
    /// Source of the error (e.g., "generation", "vocab_request")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            field_path: None,
            details: None,
            source: None,
        }
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// How a caller (typically an HTTP adapter) should surface an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// The request itself was unusable (empty word or language).
    InvalidRequest,
    /// The model answered, but not with a usable record.
    UnprocessableOutput,
    /// The generation service or local configuration failed.
    ServerError,
}

impl ErrorClass {
    /// Suggested HTTP status for transport adapters.
    pub fn http_status(&self) -> u16 {
        match self {
            ErrorClass::InvalidRequest => 400,
            ErrorClass::UnprocessableOutput => 422,
            ErrorClass::ServerError => 500,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorClass::InvalidRequest => "invalid_request",
            ErrorClass::UnprocessableOutput => "unprocessable_output",
            ErrorClass::ServerError => "server_error",
        }
    }
}

impl std::fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unified error type for vocabulary lookups.
///
/// Cache store failures never appear here: the cache adapter absorbs them and
/// degrades to a miss.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid request: {message}{}", format_context(.context))]
    InvalidRequest {
        message: String,
        context: ErrorContext,
    },

    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("Generation failed: {message}{}", format_context(.context))]
    Generation {
        message: String,
        /// HTTP status returned by the generation service, if any.
        status: Option<u16>,
        context: ErrorContext,
    },

    #[error("Malformed model output: {message}")]
    MalformedOutput {
        message: String,
        /// Leading slice of the raw model output, for logs.
        excerpt: String,
    },

    #[error("Model output does not match the vocabulary schema: {}", format_validation(.errors))]
    SchemaInvalid { errors: Vec<ValidationError> },
}

// Helper function to format error context for display
fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

fn format_validation(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

const EXCERPT_CHARS: usize = 200;

impl Error {
    pub fn invalid_request(msg: impl Into<String>, field: impl Into<String>) -> Self {
        Error::InvalidRequest {
            message: msg.into(),
            context: ErrorContext::new()
                .with_field_path(field)
                .with_source("vocab_request"),
        }
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Error::Configuration {
            message: msg.into(),
            context: ErrorContext::new(),
        }
    }

    /// Create a new configuration error with structured context
    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    /// Create a new generation error with structured context
    pub fn generation_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Generation {
            message: msg.into(),
            status: None,
            context,
        }
    }

    pub fn generation_status(status: u16, msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Generation {
            message: msg.into(),
            status: Some(status),
            context,
        }
    }

    pub fn malformed_output(msg: impl Into<String>, raw: &str) -> Self {
        Error::MalformedOutput {
            message: msg.into(),
            excerpt: raw.chars().take(EXCERPT_CHARS).collect(),
        }
    }

    pub fn schema_invalid(errors: Vec<ValidationError>) -> Self {
        Error::SchemaInvalid { errors }
    }

    /// Classify the error for the caller.
    pub fn class(&self) -> ErrorClass {
        match self {
            Error::InvalidRequest { .. } => ErrorClass::InvalidRequest,
            Error::MalformedOutput { .. } | Error::SchemaInvalid { .. } => {
                ErrorClass::UnprocessableOutput
            }
            Error::Configuration { .. } | Error::Generation { .. } => ErrorClass::ServerError,
        }
    }

    /// Whether repeating the same call later could plausibly succeed.
    ///
    /// Nothing in this crate retries; this is a hint for the caller.
    pub fn retryable(&self) -> bool {
        match self {
            Error::Generation { status, .. } => match status {
                None => true,
                Some(code) => *code == 408 || *code == 429 || *code >= 500,
            },
            Error::MalformedOutput { .. } | Error::SchemaInvalid { .. } => true,
            Error::InvalidRequest { .. } | Error::Configuration { .. } => false,
        }
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::InvalidRequest { context, .. }
            | Error::Configuration { context, .. }
            | Error::Generation { context, .. } => Some(context),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classes_map_to_distinct_statuses() {
        let invalid = Error::invalid_request("vocab must not be empty", "vocab");
        let malformed = Error::malformed_output("no JSON object found", "not json at all");
        let schema = Error::schema_invalid(vec![ValidationError::without_path("bad")]);
        let generation =
            Error::generation_with_context("connection refused", ErrorContext::new());

        assert_eq!(invalid.class().http_status(), 400);
        assert_eq!(malformed.class(), ErrorClass::UnprocessableOutput);
        assert_eq!(schema.class(), ErrorClass::UnprocessableOutput);
        assert_eq!(generation.class(), ErrorClass::ServerError);
        assert_eq!(generation.class().http_status(), 500);
    }

    #[test]
    fn test_display_includes_context() {
        let err = Error::generation_status(
            401,
            "unexpected status 401",
            ErrorContext::new().with_source("generation"),
        );
        let text = err.to_string();
        assert!(text.starts_with("Generation failed: unexpected status 401"));
        assert!(text.contains("source: generation"));
        assert!(!err.retryable());
    }

    #[test]
    fn test_schema_invalid_lists_every_violation() {
        let err = Error::schema_invalid(vec![
            ValidationError::with_path("\"origin\" is a required property", "/".to_string()),
            ValidationError::with_path("\"rare\" is not one of", "/examples/0/level".to_string()),
        ]);
        let text = err.to_string();
        assert!(text.contains("/examples/0/level"));
        assert!(text.contains("origin"));
    }

    #[test]
    fn test_malformed_output_truncates_excerpt() {
        let raw = "x".repeat(1000);
        match Error::malformed_output("no JSON object found", &raw) {
            Error::MalformedOutput { excerpt, .. } => assert_eq!(excerpt.len(), EXCERPT_CHARS),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_retryable_generation_statuses() {
        let ctx = ErrorContext::new;
        assert!(Error::generation_status(429, "rate limited", ctx()).retryable());
        assert!(Error::generation_status(503, "unavailable", ctx()).retryable());
        assert!(!Error::generation_status(400, "bad request", ctx()).retryable());
        assert!(!Error::configuration("missing key").retryable());
    }
}
