use clap::Parser;

mod cli;
mod commands;
mod config;
mod output;
mod pipeline;
mod progress;
mod sink;
mod ui;

fn main() {
    if let Err(error) = run() {
        eprintln!("wgen error: {error:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();
    ui::init(&flags);

    match &cli.command {
        // Schema export needs no configuration.
        cli::Commands::Schema(args) => commands::schema::handle(args, &flags),
        cli::Commands::Convert(args) => {
            let config = config::WgenConfig::load()?;
            commands::convert::handle(args, &config, &flags)
        }
        cli::Commands::Check(args) => {
            let config = config::WgenConfig::load()?;
            commands::check::handle(args, &config, &flags)
        }
    }
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("WGEN_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
