//! Recover a JSON payload embedded in free-form model output

use crate::error::{Result, JobMatcherError};
use log::debug;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Parse the first balanced `{...}` or `[...]` span in `text`.
///
/// Prose before or after the payload and surrounding code fences are
/// ignored. Braces inside string literals do not affect the scan.
pub fn try_extract_json(text: &str) -> Result<Value> {
    let span = balanced_span(text)?;
    serde_json::from_str(span)
        .map_err(|e| JobMatcherError::MalformedPayload(format!("invalid JSON in model output: {}", e)))
}

/// Soft variant of [`try_extract_json`]: any failure yields `None`
pub fn extract_valid_json(text: &str) -> Option<Value> {
    match try_extract_json(text) {
        Ok(value) => Some(value),
        Err(e) => {
            debug!("No usable JSON payload: {}", e);
            None
        }
    }
}

/// Extract and deserialize into a caller-defined shape
pub fn extract_json_as<T: DeserializeOwned>(text: &str) -> Option<T> {
    let value = extract_valid_json(text)?;
    match serde_json::from_value(value) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            debug!("JSON payload has unexpected shape: {}", e);
            None
        }
    }
}

fn balanced_span(text: &str) -> Result<&str> {
    let start = text
        .find(['{', '['])
        .ok_or_else(|| JobMatcherError::MalformedPayload("no JSON object or array found".to_string()))?;

    let mut stack: Vec<u8> = Vec::new();
    let mut in_string = false;
    let mut escaped = false;

    // Delimiters are ASCII, so byte scanning never splits a char we care about
    for (offset, &byte) in text.as_bytes()[start..].iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if byte == b'\\' {
                escaped = true;
            } else if byte == b'"' {
                in_string = false;
            }
            continue;
        }

        match byte {
            b'"' => in_string = true,
            b'{' => stack.push(b'}'),
            b'[' => stack.push(b']'),
            b'}' | b']' => {
                if stack.pop() != Some(byte) {
                    return Err(JobMatcherError::MalformedPayload(
                        "mismatched closing bracket".to_string(),
                    ));
                }
                if stack.is_empty() {
                    let end = start + offset + 1;
                    return Ok(&text[start..end]);
                }
            }
            _ => {}
        }
    }

    Err(JobMatcherError::MalformedPayload("unbalanced JSON payload".to_string()))
}
