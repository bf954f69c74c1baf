use anyhow::Context;
use serde::Serialize;
use wgen_sheet::CsvSource;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ConvertArgs;
use crate::config::WgenConfig;
use crate::output::output;
use crate::pipeline::{ConvertOptions, ConvertPipeline};
use crate::progress::Progress;
use crate::sink::DirSink;

#[derive(Debug, Serialize)]
struct ConvertResponse {
    input: String,
    output_dir: String,
    variant: String,
    processed: u32,
    skipped: u32,
    warnings: u32,
}

/// Handle `wgen convert <input.csv>`.
pub fn handle(args: &ConvertArgs, config: &WgenConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut source = CsvSource::open(&args.input)?;

    let out_dir = args.out.clone().unwrap_or_else(|| config.output.dir.clone());
    let sink = DirSink::create(&out_dir)
        .with_context(|| format!("failed to create output directory '{out_dir}'"))?;

    let options = ConvertOptions::from_config(config, args.variant);
    let variant = options.variant;

    let progress = Progress::rows("converting");
    let stats = ConvertPipeline::new(options).run(&mut source, Some(&sink), &progress)?;
    progress.finish(&format!("{} documents written", stats.processed));

    output(
        &ConvertResponse {
            input: args.input.clone(),
            output_dir: sink.dir().display().to_string(),
            variant: variant.to_string(),
            processed: stats.processed,
            skipped: stats.skipped,
            warnings: stats.warnings,
        },
        flags.format,
    )
}
