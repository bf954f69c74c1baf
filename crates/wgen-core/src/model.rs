//! Canonical in-memory representation of one task row.
//!
//! One `TaskRecord` is produced per usable source row and handed to the
//! variant renderers in [`crate::render`]. The rubric is already normalized
//! at that point; renderers never re-parse anything.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use schemars::JsonSchema;

/// Grading operator assumed when a criterion does not name one.
pub const DEFAULT_OPERATOR: &str = "correctness";

/// A single grading criterion, reducible to a yes/no outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RubricPoint {
    pub criteria: String,
    pub operator: String,
}

impl RubricPoint {
    /// Criterion with the default operator.
    #[must_use]
    pub fn new(criteria: impl Into<String>) -> Self {
        Self {
            criteria: criteria.into(),
            operator: DEFAULT_OPERATOR.to_string(),
        }
    }
}

/// Normalized rubric value for one row.
///
/// Never null in output: a rubric renders as a list of points, a raw text
/// fallback, or the variant's empty representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rubric {
    /// Successfully parsed criterion list. May be empty.
    Points(Vec<RubricPoint>),
    /// Raw cell text, kept verbatim by passthrough variants.
    Text(String),
    /// Cell was empty or whitespace-only.
    Empty,
}

impl Rubric {
    /// The criterion list, empty for `Text` and `Empty`.
    #[must_use]
    pub fn points(&self) -> &[RubricPoint] {
        match self {
            Self::Points(points) => points,
            Self::Text(_) | Self::Empty => &[],
        }
    }

    /// Render for passthrough documents: a JSON array of points, the raw
    /// string, or `""`.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Points(points) => Value::Array(
                points
                    .iter()
                    .map(|point| {
                        json!({
                            "criteria": point.criteria,
                            "operator": point.operator,
                        })
                    })
                    .collect(),
            ),
            Self::Text(text) => Value::String(text.clone()),
            Self::Empty => Value::String(String::new()),
        }
    }
}

/// Canonical representation of one usable source row.
///
/// Built by the pipeline after column selection, id generation, and rubric
/// normalization; consumed by the variant renderers. Optional fields are
/// `None` when the column is absent from the source or the cell is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRecord {
    /// Run-unique identifier, also the output file stem.
    pub id: String,
    /// Question text, trimmed, never empty (empty questions skip the row).
    pub question: String,
    pub rubric: Rubric,
    pub answer: Option<String>,
    pub steps: Option<String>,
    pub filing_links: Vec<String>,
    /// Passthrough statistics columns, kept as raw strings.
    pub pass_at_10: Option<String>,
    pub mean: Option<String>,
    pub variance: Option<String>,
    /// 1-based position in the source.
    pub row_index: usize,
}
