//! Rubric normalization: parse-or-degrade, never fail.
//!
//! Rubric cells arrive as a JSON-encoded criterion array, free text, or
//! nothing at all. This stage turns any of those into a valid [`Rubric`]
//! and reports degradation as data (a [`RubricNote`]) instead of an error,
//! so a malformed cell can never abort the batch. The only row-skip
//! condition — an empty question — is decided upstream in the pipeline.

use serde_json::Value;

use crate::model::{DEFAULT_OPERATOR, Rubric, RubricPoint};
use crate::variant::RubricMode;

/// Characters of the offending cell quoted in parse diagnostics.
const SNIPPET_LENGTH: usize = 100;

/// Diagnostic produced alongside a degraded or empty rubric.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RubricNote {
    /// Cell was empty or whitespace-only. Informational, not a warning.
    EmptyCell,
    /// Cell is not valid JSON (structured mode only).
    ParseFailed { message: String, snippet: String },
    /// Cell is valid JSON but not an array (structured mode only).
    NotAnArray,
}

impl RubricNote {
    /// Whether this note should count as a warning. `EmptyCell` does not.
    #[must_use]
    pub const fn is_warning(&self) -> bool {
        !matches!(self, Self::EmptyCell)
    }
}

/// Outcome of normalizing one rubric cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRubric {
    pub rubric: Rubric,
    pub note: Option<RubricNote>,
}

impl NormalizedRubric {
    const fn clean(rubric: Rubric) -> Self {
        Self { rubric, note: None }
    }

    const fn degraded(rubric: Rubric, note: RubricNote) -> Self {
        Self {
            rubric,
            note: Some(note),
        }
    }
}

/// Normalize one raw rubric cell.
///
/// Structured mode expects a JSON array of criterion objects and degrades to
/// an empty point list on anything else. Passthrough mode keeps unparseable
/// or non-array text verbatim — that is the designed fallback, not an error.
/// Elements of a parsed array are never dropped: a missing `criteria` is
/// synthesized as `"Criterion <position>"` and a missing `operator` defaults
/// to `"correctness"`.
#[must_use]
pub fn normalize_rubric(raw: &str, mode: RubricMode) -> NormalizedRubric {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return NormalizedRubric::degraded(Rubric::Empty, RubricNote::EmptyCell);
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Array(items)) => NormalizedRubric::clean(Rubric::Points(points_from(&items))),
        Ok(_) => match mode {
            RubricMode::Structured => {
                NormalizedRubric::degraded(Rubric::Points(Vec::new()), RubricNote::NotAnArray)
            }
            RubricMode::Passthrough => {
                NormalizedRubric::clean(Rubric::Text(trimmed.to_string()))
            }
        },
        Err(error) => match mode {
            RubricMode::Structured => NormalizedRubric::degraded(
                Rubric::Points(Vec::new()),
                RubricNote::ParseFailed {
                    message: error.to_string(),
                    snippet: snippet(trimmed),
                },
            ),
            RubricMode::Passthrough => {
                NormalizedRubric::clean(Rubric::Text(trimmed.to_string()))
            }
        },
    }
}

fn points_from(items: &[Value]) -> Vec<RubricPoint> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let criteria = item
                .get("criteria")
                .and_then(Value::as_str)
                .map_or_else(|| format!("Criterion {}", index + 1), str::to_string);
            let operator = item
                .get("operator")
                .and_then(Value::as_str)
                .map_or_else(|| DEFAULT_OPERATOR.to_string(), str::to_string);
            RubricPoint { criteria, operator }
        })
        .collect()
}

fn snippet(text: &str) -> String {
    text.chars().take(SNIPPET_LENGTH).collect()
}
