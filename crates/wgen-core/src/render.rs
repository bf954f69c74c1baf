//! Schema-variant rendering.
//!
//! Pure mapping from the canonical [`TaskRecord`] into the concrete document
//! shapes the grading runtime accepts. Variant selection is a run-level
//! configuration choice; the mapping itself has no per-row state.
//!
//! All three shapes keep the same contract: a run-unique identifier, rubric
//! entries with exactly two discrete outcomes (`yes` -> 1.0, `no` -> 0.0),
//! and execution flags `include_files`/`use_docker` pinned to `false`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::{DEFAULT_OPERATOR, RubricPoint, TaskRecord};
use crate::variant::SchemaVariant;

/// Source label recorded in document metadata.
pub const METADATA_SOURCE: &str = "csv";

/// Name of the rubric entry synthesized when a variant requires at least one
/// entry and the normalized rubric is empty.
pub const DEFAULT_ENTRY_NAME: &str = "Task completion";

/// Message of the synthesized rubric entry.
pub const DEFAULT_ENTRY_MESSAGE: &str = "Was the task completed successfully?";

/// A typed text fragment (`{"type": "text", "content": ...}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TextPart {
    #[serde(rename = "type")]
    pub kind: String,
    pub content: String,
}

impl TextPart {
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            kind: "text".to_string(),
            content: content.into(),
        }
    }
}

/// One labelled outcome of a discrete scoring rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Outcome {
    pub label: String,
    pub score: f64,
}

/// Discrete two-outcome scoring rule shared by every variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DiscreteScore {
    #[serde(rename = "type")]
    pub kind: String,
    pub outcomes: Vec<Outcome>,
}

impl DiscreteScore {
    /// The fixed `yes` -> 1.0 / `no` -> 0.0 rule.
    #[must_use]
    pub fn yes_no() -> Self {
        Self {
            kind: "discrete".to_string(),
            outcomes: vec![
                Outcome {
                    label: "yes".to_string(),
                    score: 1.0,
                },
                Outcome {
                    label: "no".to_string(),
                    score: 0.0,
                },
            ],
        }
    }
}

// ---------------------------------------------------------------------------
// worlds
// ---------------------------------------------------------------------------

/// One rubric entry in a worlds document, scored individually.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WorldsRubric {
    pub name: String,
    pub weight: f64,
    pub score: DiscreteScore,
    pub operator: String,
    pub messages: Vec<TextPart>,
    pub dependencies: Vec<String>,
}

/// Prompt/rubrics document with per-entry scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WorldsDocument {
    pub prompt: Vec<TextPart>,
    pub rubrics: Vec<WorldsRubric>,
    pub include_files: bool,
    pub use_docker: bool,
}

// ---------------------------------------------------------------------------
// rocker
// ---------------------------------------------------------------------------

/// Metadata bag of a rocker document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RockerMetadata {
    pub source: String,
    pub row_index: usize,
    pub filing_links: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pass_at_10: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variance: Option<String>,
}

/// Flat id/title document with passthrough rubric and top-level scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RockerDocument {
    pub id: String,
    pub title: String,
    pub description: String,
    pub answer: String,
    /// Criterion array, raw text, or `""` — whatever normalization produced.
    pub rubric: Value,
    pub scoring: DiscreteScore,
    pub include_files: bool,
    pub use_docker: bool,
    pub metadata: RockerMetadata,
}

// ---------------------------------------------------------------------------
// harness
// ---------------------------------------------------------------------------

/// Outcome scores keyed by label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct OutcomeScores {
    pub yes: f64,
    pub no: f64,
}

impl OutcomeScores {
    #[must_use]
    pub const fn yes_no() -> Self {
        Self { yes: 1.0, no: 0.0 }
    }
}

/// One graded criterion in a harness document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct HarnessCriterion {
    pub name: String,
    pub operator: String,
    pub outcomes: OutcomeScores,
}

/// Metadata bag of a harness document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct HarnessMetadata {
    pub source: String,
    pub row_index: usize,
}

/// Flat task_id/criteria document with per-entry outcome scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct HarnessDocument {
    pub task_id: String,
    pub prompt: String,
    pub criteria: Vec<HarnessCriterion>,
    pub include_files: bool,
    pub use_docker: bool,
    pub metadata: HarnessMetadata,
}

// ---------------------------------------------------------------------------
// rendering
// ---------------------------------------------------------------------------

/// One rendered document of any variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TaskDocument {
    Worlds(WorldsDocument),
    Rocker(RockerDocument),
    Harness(HarnessDocument),
}

/// Map a canonical record into the document shape of `variant`.
#[must_use]
pub fn render(variant: SchemaVariant, record: &TaskRecord) -> TaskDocument {
    match variant {
        SchemaVariant::Worlds => TaskDocument::Worlds(render_worlds(record)),
        SchemaVariant::Rocker => TaskDocument::Rocker(render_rocker(record)),
        SchemaVariant::Harness => TaskDocument::Harness(render_harness(record)),
    }
}

fn render_worlds(record: &TaskRecord) -> WorldsDocument {
    let points = record.rubric.points();
    let rubrics = if points.is_empty() {
        vec![WorldsRubric {
            name: DEFAULT_ENTRY_NAME.to_string(),
            weight: 1.0,
            score: DiscreteScore::yes_no(),
            operator: DEFAULT_OPERATOR.to_string(),
            messages: vec![TextPart::text(DEFAULT_ENTRY_MESSAGE)],
            dependencies: Vec::new(),
        }]
    } else {
        points.iter().map(worlds_rubric).collect()
    };

    WorldsDocument {
        prompt: vec![TextPart::text(record.question.clone())],
        rubrics,
        include_files: false,
        use_docker: false,
    }
}

fn worlds_rubric(point: &RubricPoint) -> WorldsRubric {
    WorldsRubric {
        name: point.criteria.clone(),
        weight: 1.0,
        score: DiscreteScore::yes_no(),
        operator: point.operator.clone(),
        messages: vec![TextPart::text(point.criteria.clone())],
        dependencies: Vec::new(),
    }
}

fn render_rocker(record: &TaskRecord) -> RockerDocument {
    let title = if record.question.is_empty() {
        format!("Question {}", record.row_index)
    } else {
        record.question.clone()
    };

    RockerDocument {
        id: record.id.clone(),
        title,
        description: record.steps.clone().unwrap_or_default(),
        answer: record.answer.clone().unwrap_or_default(),
        rubric: record.rubric.to_value(),
        scoring: DiscreteScore::yes_no(),
        include_files: false,
        use_docker: false,
        metadata: RockerMetadata {
            source: METADATA_SOURCE.to_string(),
            row_index: record.row_index,
            filing_links: record.filing_links.clone(),
            pass_at_10: record.pass_at_10.clone(),
            mean: record.mean.clone(),
            variance: record.variance.clone(),
        },
    }
}

fn render_harness(record: &TaskRecord) -> HarnessDocument {
    let points = record.rubric.points();
    let criteria = if points.is_empty() {
        vec![HarnessCriterion {
            name: DEFAULT_ENTRY_NAME.to_string(),
            operator: DEFAULT_OPERATOR.to_string(),
            outcomes: OutcomeScores::yes_no(),
        }]
    } else {
        points
            .iter()
            .map(|point| HarnessCriterion {
                name: point.criteria.clone(),
                operator: point.operator.clone(),
                outcomes: OutcomeScores::yes_no(),
            })
            .collect()
    };

    HarnessDocument {
        task_id: record.id.clone(),
        prompt: record.question.clone(),
        criteria,
        include_files: false,
        use_docker: false,
        metadata: HarnessMetadata {
            source: METADATA_SOURCE.to_string(),
            row_index: record.row_index,
        },
    }
}
