//! Field-level validation of untrusted JSON values.
//!
//! Each function returns a `Result` so the caller decides which fallback to
//! apply; nothing here substitutes defaults on its own.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoercionError {
    #[error("field is missing or null")]
    Missing,

    #[error("unexpected JSON type: {0}")]
    WrongType(&'static str),

    #[error("not a number: {0:?}")]
    NotNumeric(String),

    #[error("not a finite number")]
    NonFinite,

    #[error("not strictly positive: {0}")]
    NonPositive(f64),

    #[error("no usable text")]
    Empty,
}

static SENTENCE_END: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]+(?:\s+|$)").expect("sentence regex is valid"));

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Parse a numeric string such as `"123.4"`, `" $1,250.50 "`.
pub fn parse_number(text: &str) -> Result<f64, CoercionError> {
    let trimmed = text.trim();
    let unsigned = trimmed.strip_prefix('$').unwrap_or(trimmed);
    let cleaned: String = unsigned.chars().filter(|c| *c != ',').collect();
    cleaned
        .trim()
        .parse::<f64>()
        .map_err(|_| CoercionError::NotNumeric(trimmed.to_string()))
}

/// A price level: a JSON number or numeric string, finite and > 0.
pub fn price_level(value: Option<&Value>) -> Result<f64, CoercionError> {
    let number = match value {
        None | Some(Value::Null) => return Err(CoercionError::Missing),
        Some(Value::Number(n)) => n.as_f64().ok_or(CoercionError::NonFinite)?,
        Some(Value::String(s)) => parse_number(s)?,
        Some(other) => return Err(CoercionError::WrongType(type_name(other))),
    };

    if !number.is_finite() {
        return Err(CoercionError::NonFinite);
    }
    if number <= 0.0 {
        return Err(CoercionError::NonPositive(number));
    }
    Ok(number)
}

/// The verdict field must be a string.
pub fn verdict_text(value: Option<&Value>) -> Result<&str, CoercionError> {
    match value {
        None | Some(Value::Null) => Err(CoercionError::Missing),
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(other) => Err(CoercionError::WrongType(type_name(other))),
    }
}

/// Display bullets from a list of strings or from one block of prose.
pub fn bullets(value: Option<&Value>) -> Result<Vec<String>, CoercionError> {
    let items = match value {
        None | Some(Value::Null) => return Err(CoercionError::Missing),
        Some(Value::String(text)) => split_sentences(text),
        Some(Value::Array(entries)) => entries.iter().filter_map(bullet_entry).collect(),
        Some(other) => return Err(CoercionError::WrongType(type_name(other))),
    };

    if items.is_empty() {
        Err(CoercionError::Empty)
    } else {
        Ok(items)
    }
}

fn bullet_entry(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    has_content(&text).then_some(text)
}

/// Split prose on sentence-ending punctuation followed by whitespace or the
/// end of the text. Decimal points such as `1.50` are not boundaries.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for boundary in SENTENCE_END.find_iter(text) {
        push_sentence(&mut sentences, &text[start..boundary.end()]);
        start = boundary.end();
    }
    push_sentence(&mut sentences, &text[start..]);

    sentences
}

fn push_sentence(sentences: &mut Vec<String>, piece: &str) {
    let piece = piece.trim();
    if has_content(piece) {
        sentences.push(piece.to_string());
    }
}

fn has_content(text: &str) -> bool {
    text.chars().any(|c| c.is_alphanumeric())
}
