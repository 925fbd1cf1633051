// SPDX-License-Identifier: Apache-2.0

//! Turning free-form model output into an [`IssueAnalysis`].
//!
//! Two steps, each testable on its own:
//!
//! 1. [`recover_json`] finds a JSON value in the reply. It first tries a
//!    strict parse of the whole text; failing that, it parses the span from
//!    the first `{` to the last `}`. There is no further repair.
//! 2. [`normalize_analysis`] coerces the parsed object field by field. Missing
//!    or wrong-shaped fields get defaults instead of failing.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::types::{IssueAnalysis, IssueType};
use crate::error::IssueLensError;

/// Which parse step produced the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseTier {
    /// The whole reply was valid JSON.
    Strict,
    /// Only the `{...}` span inside the reply was valid JSON.
    Extracted,
}

/// JSON recovered from a model reply.
#[derive(Debug, Clone, PartialEq)]
pub struct RecoveredJson {
    /// Parsed value.
    pub value: Value,
    /// Step that succeeded.
    pub tier: ParseTier,
}

/// Returns the span from the first `{` to the last `}`, if they are ordered.
#[must_use]
pub fn extract_object_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

/// Recovers a JSON value from model output.
///
/// # Errors
///
/// Returns `IssueLensError::MalformedModelOutput` when neither the whole text
/// nor its `{...}` span parses.
pub fn recover_json(text: &str) -> Result<RecoveredJson, IssueLensError> {
    let text = text.trim();

    let strict_err = match serde_json::from_str::<Value>(text) {
        Ok(value) => {
            return Ok(RecoveredJson {
                value,
                tier: ParseTier::Strict,
            });
        }
        Err(e) => e,
    };

    let Some(span) = extract_object_span(text) else {
        return Err(IssueLensError::MalformedModelOutput {
            message: strict_err.to_string(),
        });
    };

    match serde_json::from_str::<Value>(span) {
        Ok(value) => {
            debug!(
                skipped = text.len() - span.len(),
                "Recovered JSON object from surrounding text"
            );
            Ok(RecoveredJson {
                value,
                tier: ParseTier::Extracted,
            })
        }
        Err(e) => Err(IssueLensError::MalformedModelOutput {
            message: e.to_string(),
        }),
    }
}

/// Renders a JSON value as display text.
///
/// Strings are taken verbatim; everything else uses its compact JSON form.
fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Reads a string field, treating absent and `null` alike.
fn string_field(obj: &Map<String, Value>, key: &str) -> String {
    match obj.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(value) => stringify(value).trim().to_string(),
    }
}

fn labels_field(obj: &Map<String, Value>) -> Vec<String> {
    match obj.get("suggested_labels") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| stringify(item).trim().to_string())
            .collect(),
        Some(scalar) => vec![stringify(scalar).trim().to_string()],
    }
}

fn type_field(obj: &Map<String, Value>) -> IssueType {
    let raw = string_field(obj, "type");
    if raw.is_empty() {
        return IssueType::Other;
    }
    IssueType::from_model(&raw).unwrap_or_else(|| {
        warn!(value = %raw, "Model returned unknown issue type, using 'other'");
        IssueType::Other
    })
}

/// Coerces a parsed JSON value into an [`IssueAnalysis`].
///
/// # Errors
///
/// Returns `IssueLensError::MalformedModelOutput` if the value is not a JSON
/// object. Field-level defects are never errors.
pub fn normalize_analysis(value: &Value) -> Result<IssueAnalysis, IssueLensError> {
    let obj = value
        .as_object()
        .ok_or_else(|| IssueLensError::MalformedModelOutput {
            message: format!("expected a JSON object, got {}", json_kind(value)),
        })?;

    Ok(IssueAnalysis {
        summary: string_field(obj, "summary"),
        issue_type: type_field(obj),
        priority_score: string_field(obj, "priority_score"),
        suggested_labels: labels_field(obj),
        potential_impact: string_field(obj, "potential_impact"),
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Recovers and normalizes a model reply in one step.
///
/// # Errors
///
/// Returns `IssueLensError::MalformedModelOutput` if no JSON object can be
/// recovered from `text`.
pub fn parse_model_reply(text: &str) -> Result<IssueAnalysis, IssueLensError> {
    let recovered = recover_json(text)?;
    if recovered.tier == ParseTier::Extracted {
        warn!("Model wrapped its JSON in extra text");
    }
    normalize_analysis(&recovered.value)
}
