use serde::Serialize;
use wgen_sheet::{ColumnMap, CsvSource, RowSource};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::CheckArgs;
use crate::config::WgenConfig;
use crate::output::output;
use crate::pipeline::{ConvertOptions, ConvertPipeline};
use crate::progress::Progress;

#[derive(Debug, Serialize)]
struct CheckResponse {
    input: String,
    variant: String,
    question_column: String,
    rubric_column: String,
    optional_columns: Vec<String>,
    rows: u32,
    convertible: u32,
    skipped: u32,
    warnings: u32,
}

/// Handle `wgen check <input.csv>`: a dry run that resolves columns and
/// counts would-be results without writing anything.
pub fn handle(args: &CheckArgs, config: &WgenConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut source = CsvSource::open(&args.input)?;
    let columns = ColumnMap::resolve(source.headers())?;

    let headers = source.headers().to_vec();
    let optional_columns = [
        columns.answer,
        columns.steps,
        columns.filing_links,
        columns.pass_at_10,
        columns.mean,
        columns.variance,
    ]
    .iter()
    .flatten()
    .map(|&index| headers[index].clone())
    .collect();

    let options = ConvertOptions::from_config(config, args.variant);
    let variant = options.variant;

    let progress = Progress::rows("checking");
    let stats = ConvertPipeline::new(options).run(&mut source, None, &progress)?;
    progress.finish(&format!("{} rows checked", stats.processed + stats.skipped));

    output(
        &CheckResponse {
            input: args.input.clone(),
            variant: variant.to_string(),
            question_column: headers[columns.question].clone(),
            rubric_column: headers[columns.rubric].clone(),
            optional_columns,
            rows: stats.processed + stats.skipped,
            convertible: stats.processed,
            skipped: stats.skipped,
            warnings: stats.warnings,
        },
        flags.format,
    )
}
