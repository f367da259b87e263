//! Request DTOs for the semantic cache API
//!
//! Defines the message shapes sent by the host UI.

use serde::Deserialize;

/// A message posted to `POST /message`, discriminated by its `action` field.
///
/// # Variants
/// - `{"action": "searchCache", "text": ...}` - look up a similar cached answer
/// - `{"action": "cachePrompt", "prompt": ..., "answer": ...}` - record an answer
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action")]
pub enum CacheRequest {
    #[serde(rename = "searchCache")]
    SearchCache { text: String },

    #[serde(rename = "cachePrompt")]
    CachePrompt { prompt: String, answer: String },
}

/// Returns true when `text` is long enough to be worth searching.
///
/// Length is counted in characters after trimming surrounding whitespace.
pub fn is_searchable(text: &str, min_query_length: usize) -> bool {
    text.trim().chars().count() >= min_query_length
}

/// Validates a record request.
///
/// Returns an error message if validation fails, None if valid. The answer
/// must be strictly longer than `min_answer_length` characters.
pub fn validate_record(prompt: &str, answer: &str, min_answer_length: usize) -> Option<String> {
    if prompt.trim().is_empty() {
        return Some("Prompt cannot be empty".to_string());
    }
    if answer.chars().count() <= min_answer_length {
        return Some(format!(
            "Answer must be longer than {} characters",
            min_answer_length
        ));
    }
    None
}
