//! Locating a JSON object inside free-form model output.

use crate::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static FENCED_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"```(?:json|JSON)?[ \t]*\r?\n?([\s\S]*?)\s*```").expect("fenced block pattern")
});

static OUTER_OBJECT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{[\s\S]*\}").expect("outer object pattern"));

/// Pull the first JSON object out of `raw`.
///
/// Attempts, first success wins:
/// 1. interior of each fenced code block (optionally tagged `json`), in order
/// 2. the span from the first `{` to the last `}`
/// 3. the whole trimmed text
///
/// A candidate that parses to anything other than an object is skipped.
pub fn extract_json_object(raw: &str) -> Result<Value> {
    if let Some(value) = FENCED_BLOCK
        .captures_iter(raw)
        .filter_map(|c| c.get(1))
        .find_map(|m| parse_object(m.as_str()))
    {
        return Ok(value);
    }

    if let Some(value) = OUTER_OBJECT
        .find(raw)
        .and_then(|m| parse_object(m.as_str()))
    {
        return Ok(value);
    }

    if let Some(value) = parse_object(raw) {
        return Ok(value);
    }

    Err(Error::malformed_output("no JSON object found in model output", raw))
}

fn parse_object(candidate: &str) -> Option<Value> {
    match serde_json::from_str::<Value>(candidate.trim()) {
        Ok(value @ Value::Object(_)) => Some(value),
        _ => None,
    }
}
