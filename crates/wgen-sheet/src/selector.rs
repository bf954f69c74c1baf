//! Column selection: logical fields resolved against a source header.
//!
//! Headers in the wild vary in casing and spelling (`Question`, `question`,
//! `Filing Links`, `filing_links`). Matching is case-insensitive and treats
//! whitespace and underscores as equivalent; the first matching header wins.

use crate::error::SheetError;

/// Logical field names the pipeline recognizes.
pub mod fields {
    pub const QUESTION: &str = "question";
    pub const RUBRIC: &str = "rubric";
    pub const ANSWER: &str = "answer";
    pub const STEPS: &str = "steps";
    pub const FILING_LINKS: &str = "filing links";
    pub const PASS_AT_10: &str = "pass@10";
    pub const MEAN: &str = "mean";
    pub const VARIANCE: &str = "variance";
}

/// Resolved column indexes for one source header.
///
/// `question` and `rubric` are required; everything else is optional and
/// `None` when the source does not carry the column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    pub question: usize,
    pub rubric: usize,
    pub answer: Option<usize>,
    pub steps: Option<usize>,
    pub filing_links: Option<usize>,
    pub pass_at_10: Option<usize>,
    pub mean: Option<usize>,
    pub variance: Option<usize>,
}

impl ColumnMap {
    /// Resolve every logical field against `headers`.
    ///
    /// # Errors
    ///
    /// [`SheetError::MissingColumn`] when `question` or `rubric` cannot be
    /// resolved. This is batch-fatal.
    pub fn resolve(headers: &[String]) -> Result<Self, SheetError> {
        Ok(Self {
            question: require(headers, fields::QUESTION)?,
            rubric: require(headers, fields::RUBRIC)?,
            answer: find(headers, fields::ANSWER),
            steps: find(headers, fields::STEPS),
            filing_links: find(headers, fields::FILING_LINKS),
            pass_at_10: find(headers, fields::PASS_AT_10),
            mean: find(headers, fields::MEAN),
            variance: find(headers, fields::VARIANCE),
        })
    }
}

/// Index of the first header matching `field`, or `None`.
fn find(headers: &[String], field: &str) -> Option<usize> {
    let wanted = fold(field);
    headers.iter().position(|header| fold(header) == wanted)
}

fn require(headers: &[String], field: &'static str) -> Result<usize, SheetError> {
    find(headers, field).ok_or_else(|| SheetError::MissingColumn {
        field,
        headers: headers.to_vec(),
    })
}

/// Fold a name for comparison: lower-case, underscores as spaces, runs of
/// whitespace collapsed.
fn fold(name: &str) -> String {
    name.to_lowercase()
        .replace('_', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
