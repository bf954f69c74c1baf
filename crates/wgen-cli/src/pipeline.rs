//! Conversion pipeline: select columns → generate ids → normalize rubrics →
//! render documents → write files.
//!
//! Single-threaded and synchronous: each row is fully processed before the
//! next one is read. The only state carried across rows is the identifier
//! generator's collision table and the run counters. Failures are row-scoped
//! except for the fatal cases (unreadable source, missing required columns,
//! write errors).

use anyhow::Context;
use serde::Serialize;
use wgen_core::ids::IdGenerator;
use wgen_core::model::TaskRecord;
use wgen_core::normalize::{RubricNote, normalize_rubric};
use wgen_core::render::render;
use wgen_core::variant::SchemaVariant;
use wgen_sheet::{ColumnMap, Row, RowSource};

use crate::config::{DegradedStat, WgenConfig};
use crate::progress::Progress;
use crate::sink::DirSink;

/// Row accounting for one run.
#[derive(Debug, Default, Clone, Copy, Serialize)]
pub struct RunStats {
    /// Rows that produced a document.
    pub processed: u32,
    /// Rows omitted from output (plus degraded rubrics under the `skipped`
    /// accounting policy).
    pub skipped: u32,
    /// Degraded rubrics under the default accounting policy.
    pub warnings: u32,
}

/// Run-level knobs, fixed before the first row.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub variant: SchemaVariant,
    pub slug_max_length: usize,
    pub sequential_prefix: String,
    pub degraded_stat: DegradedStat,
}

impl ConvertOptions {
    /// Merge config defaults with a per-run variant override.
    #[must_use]
    pub fn from_config(config: &WgenConfig, variant: Option<SchemaVariant>) -> Self {
        Self {
            variant: variant.unwrap_or(config.convert.variant),
            slug_max_length: config.convert.slug_max_length,
            sequential_prefix: config.convert.sequential_prefix.clone(),
            degraded_stat: config.convert.degraded_stat,
        }
    }
}

/// One conversion run. Create fresh per run; the id collision table must not
/// outlive it.
pub struct ConvertPipeline {
    options: ConvertOptions,
    generator: IdGenerator,
    stats: RunStats,
}

impl ConvertPipeline {
    #[must_use]
    pub fn new(options: ConvertOptions) -> Self {
        let generator = IdGenerator::new(options.variant.id_strategy())
            .with_prefix(options.sequential_prefix.clone())
            .with_slug_max_length(options.slug_max_length);
        Self {
            options,
            generator,
            stats: RunStats::default(),
        }
    }

    /// Drive the full pipeline over `source`. Writes through `sink`, or
    /// performs a dry run when `sink` is `None`.
    ///
    /// # Errors
    ///
    /// Fatal conditions only: required columns missing from the header, a
    /// row that cannot be read, or a failed write. Everything else degrades
    /// per row and is reported through the returned [`RunStats`].
    pub fn run(
        &mut self,
        source: &mut dyn RowSource,
        sink: Option<&DirSink>,
        progress: &Progress,
    ) -> anyhow::Result<RunStats> {
        let columns = ColumnMap::resolve(source.headers())?;
        tracing::debug!(headers = ?source.headers(), "resolved source header");

        let mut row_index = 0usize;
        while let Some(row) = source.next_row() {
            let row = row.context("failed to read row from source")?;
            row_index += 1;
            self.process_row(&columns, &row, row_index, sink)?;
            progress.inc();
        }

        tracing::info!(
            processed = self.stats.processed,
            skipped = self.stats.skipped,
            warnings = self.stats.warnings,
            "run complete"
        );
        Ok(self.stats)
    }

    fn process_row(
        &mut self,
        columns: &ColumnMap,
        row: &Row,
        row_index: usize,
        sink: Option<&DirSink>,
    ) -> anyhow::Result<()> {
        let question = row.get(columns.question).trim();
        if question.is_empty() {
            self.stats.skipped += 1;
            tracing::info!(row = row_index, "skipping row: empty question");
            return Ok(());
        }

        let normalized = normalize_rubric(
            row.get(columns.rubric),
            self.options.variant.rubric_mode(),
        );
        match &normalized.note {
            Some(RubricNote::EmptyCell) => {
                tracing::info!(row = row_index, "empty rubric");
            }
            Some(RubricNote::ParseFailed { message, snippet }) => {
                tracing::warn!(
                    row = row_index,
                    %message,
                    %snippet,
                    "rubric is not valid JSON; falling back to default rubric"
                );
                self.count_degraded();
            }
            Some(RubricNote::NotAnArray) => {
                tracing::warn!(
                    row = row_index,
                    "rubric JSON is not an array; falling back to default rubric"
                );
                self.count_degraded();
            }
            None => {}
        }

        let id = self.generator.next(question, row_index);
        let record = TaskRecord {
            id: id.clone(),
            question: question.to_string(),
            rubric: normalized.rubric,
            answer: optional_cell(columns.answer, row),
            steps: optional_cell(columns.steps, row),
            filing_links: split_links(columns.filing_links, row),
            pass_at_10: optional_cell(columns.pass_at_10, row),
            mean: optional_cell(columns.mean, row),
            variance: optional_cell(columns.variance, row),
            row_index,
        };

        let document = render(self.options.variant, &record);
        if let Some(sink) = sink {
            sink.write(&id, &document)
                .with_context(|| format!("failed to write document for row {row_index}"))?;
        }
        self.stats.processed += 1;
        Ok(())
    }

    fn count_degraded(&mut self) {
        match self.options.degraded_stat {
            DegradedStat::Warnings => self.stats.warnings += 1,
            DegradedStat::Skipped => self.stats.skipped += 1,
        }
    }
}

/// Trimmed cell value, `None` when the column is absent or the cell empty.
fn optional_cell(column: Option<usize>, row: &Row) -> Option<String> {
    column
        .map(|index| row.get(index).trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Comma-separated link list, empty when the column is absent or blank.
fn split_links(column: Option<usize>, row: &Row) -> Vec<String> {
    optional_cell(column, row).map_or_else(Vec::new, |raw| {
        raw.split(',')
            .map(|link| link.trim().to_string())
            .filter(|link| !link.is_empty())
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use wgen_core::variant::SchemaVariant;
    use wgen_sheet::VecSource;

    use super::{ConvertOptions, ConvertPipeline, RunStats};
    use crate::config::{DegradedStat, WgenConfig};
    use crate::progress::Progress;
    use crate::sink::DirSink;

    fn options(variant: SchemaVariant) -> ConvertOptions {
        ConvertOptions::from_config(&WgenConfig::default(), Some(variant))
    }

    fn source(headers: &[&str], rows: &[&[&str]]) -> VecSource {
        VecSource::new(
            headers.iter().map(ToString::to_string).collect(),
            rows.iter()
                .map(|row| row.iter().map(ToString::to_string).collect())
                .collect(),
        )
    }

    fn run(
        variant: SchemaVariant,
        headers: &[&str],
        rows: &[&[&str]],
    ) -> (RunStats, tempfile::TempDir) {
        let tmp = tempfile::TempDir::new().expect("tempdir");
        let sink = DirSink::create(tmp.path().join("out")).expect("sink");
        let mut source = source(headers, rows);
        let stats = ConvertPipeline::new(options(variant))
            .run(&mut source, Some(&sink), &Progress::rows("test"))
            .expect("run");
        (stats, tmp)
    }

    fn read_doc(tmp: &tempfile::TempDir, name: &str) -> serde_json::Value {
        let body = std::fs::read_to_string(tmp.path().join("out").join(name)).expect("read doc");
        serde_json::from_str(&body).expect("valid json")
    }

    #[test]
    fn well_formed_rubric_array_maps_to_scored_entries() {
        // Scenario: one row, one parsed criterion, two discrete outcomes.
        let (stats, tmp) = run(
            SchemaVariant::Worlds,
            &["Question", "Rubric"],
            &[&[
                "Is X true?",
                r#"[{"criteria": "Checks X", "operator": "correctness"}]"#,
            ]],
        );

        assert_eq!(stats.processed, 1);
        assert_eq!(stats.skipped, 0);
        assert_eq!(stats.warnings, 0);

        let doc = read_doc(&tmp, "task_001.json");
        assert_eq!(doc["rubrics"].as_array().map(Vec::len), Some(1));
        assert_eq!(doc["rubrics"][0]["name"], "Checks X");
        assert_eq!(
            doc["rubrics"][0]["score"]["outcomes"],
            serde_json::json!([
                {"label": "yes", "score": 1.0},
                {"label": "no", "score": 0.0},
            ])
        );
    }

    #[test]
    fn unparseable_rubric_degrades_to_default_entry_with_warning() {
        let (stats, tmp) = run(
            SchemaVariant::Worlds,
            &["Question", "Rubric"],
            &[&["Q", "not json"]],
        );

        assert_eq!(stats.processed, 1);
        assert_eq!(stats.warnings, 1);
        assert_eq!(stats.skipped, 0);

        let doc = read_doc(&tmp, "task_001.json");
        assert_eq!(doc["rubrics"][0]["name"], "Task completion");
        assert_eq!(
            doc["rubrics"][0]["messages"][0]["content"],
            "Was the task completed successfully?"
        );
    }

    #[test]
    fn duplicate_questions_get_collision_suffixes() {
        let (stats, tmp) = run(
            SchemaVariant::Rocker,
            &["Question", "Rubric"],
            &[&["Same Q?", ""], &["Same Q?", ""]],
        );

        assert_eq!(stats.processed, 2);
        assert_eq!(read_doc(&tmp, "same-q.json")["id"], "same-q");
        assert_eq!(read_doc(&tmp, "same-q-1.json")["id"], "same-q-1");
    }

    #[test]
    fn empty_question_skips_the_row() {
        let (stats, tmp) = run(
            SchemaVariant::Worlds,
            &["Question", "Rubric"],
            &[&["", "[]"], &["Real question", "[]"]],
        );

        assert_eq!(stats.processed, 1);
        assert_eq!(stats.skipped, 1);
        // Ids are row-indexed, so the surviving row is task_002.
        let entries = std::fs::read_dir(tmp.path().join("out"))
            .expect("read dir")
            .count();
        assert_eq!(entries, 1);
        assert_eq!(read_doc(&tmp, "task_002.json")["prompt"][0]["content"], "Real question");
    }

    #[test]
    fn empty_rubric_is_not_a_warning() {
        let (stats, tmp) = run(
            SchemaVariant::Rocker,
            &["Question", "Rubric"],
            &[&["Q", "   "]],
        );

        assert_eq!(stats.processed, 1);
        assert_eq!(stats.warnings, 0);
        assert_eq!(read_doc(&tmp, "q.json")["rubric"], "");
    }

    #[test]
    fn passthrough_keeps_free_text_rubric_without_warning() {
        let (stats, tmp) = run(
            SchemaVariant::Rocker,
            &["Question", "Rubric"],
            &[&["Q", "grade leniently"]],
        );

        assert_eq!(stats.warnings, 0);
        assert_eq!(read_doc(&tmp, "q.json")["rubric"], "grade leniently");
    }

    #[test]
    fn skipped_accounting_policy_counts_degraded_rubrics_as_skips() {
        let mut opts = options(SchemaVariant::Harness);
        opts.degraded_stat = DegradedStat::Skipped;

        let tmp = tempfile::TempDir::new().expect("tempdir");
        let sink = DirSink::create(tmp.path().join("out")).expect("sink");
        let mut src = source(&["Question", "Rubric"], &[&["Q", "{broken"]]);
        let stats = ConvertPipeline::new(opts)
            .run(&mut src, Some(&sink), &Progress::rows("test"))
            .expect("run");

        // The document is still produced; only the counter differs.
        assert_eq!(stats.processed, 1);
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.warnings, 0);
    }

    #[test]
    fn optional_columns_flow_into_rocker_metadata() {
        let (_, tmp) = run(
            SchemaVariant::Rocker,
            &["Question", "Answer", "Steps", "Rubric", "Filing Links", "Pass@10"],
            &[&[
                "Q",
                "the answer",
                "step one",
                "",
                "https://a.example, https://b.example",
                "0.7",
            ]],
        );

        let doc = read_doc(&tmp, "q.json");
        assert_eq!(doc["answer"], "the answer");
        assert_eq!(doc["description"], "step one");
        assert_eq!(
            doc["metadata"]["filing_links"],
            serde_json::json!(["https://a.example", "https://b.example"])
        );
        assert_eq!(doc["metadata"]["pass_at_10"], "0.7");
        assert!(doc["metadata"].get("mean").is_none());
    }

    #[test]
    fn missing_required_column_aborts_the_run() {
        let mut src = source(&["Prompt", "Rubric"], &[&["q", "[]"]]);
        let result = ConvertPipeline::new(options(SchemaVariant::Worlds)).run(
            &mut src,
            None,
            &Progress::rows("test"),
        );
        assert!(result.is_err());
    }

    #[test]
    fn dry_run_writes_nothing_but_counts_everything() {
        let mut src = source(
            &["Question", "Rubric"],
            &[&["Q1", "[]"], &["", ""], &["Q2", "broken{"]],
        );
        let stats = ConvertPipeline::new(options(SchemaVariant::Harness))
            .run(&mut src, None, &Progress::rows("test"))
            .expect("run");

        assert_eq!(stats.processed, 2);
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.warnings, 1);
    }
}
