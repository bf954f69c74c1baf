use clap::{Args, Subcommand};
use wgen_core::variant::SchemaVariant;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Convert a CSV sheet into per-row task descriptor documents.
    Convert(ConvertArgs),
    /// Validate a sheet and report would-be results without writing.
    Check(CheckArgs),
    /// Dump the JSON Schema of the document variants.
    Schema(SchemaArgs),
}

/// Arguments for `wgen convert`.
#[derive(Clone, Debug, Args)]
pub struct ConvertArgs {
    /// Path to the input CSV file.
    pub input: String,

    /// Output directory (created if absent; defaults from config).
    #[arg(short, long)]
    pub out: Option<String>,

    /// Document variant: worlds, rocker, harness (defaults from config).
    #[arg(long)]
    pub variant: Option<SchemaVariant>,
}

/// Arguments for `wgen check`.
#[derive(Clone, Debug, Args)]
pub struct CheckArgs {
    /// Path to the input CSV file.
    pub input: String,

    /// Document variant to validate against (defaults from config).
    #[arg(long)]
    pub variant: Option<SchemaVariant>,
}

/// Arguments for `wgen schema`.
#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Variant name to dump; all variants when omitted.
    #[arg(long)]
    pub name: Option<String>,
}
