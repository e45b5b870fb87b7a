use std::{io::IsTerminal, path::PathBuf, process::ExitCode};

use clap::Parser;
use strandgen::{Config, Error, HttpFetcher, Platform, run};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Generate platform localization and analytics sources from spreadsheet CSV exports.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The JSON configuration file
    #[arg(default_value = "strandgen.json")]
    config: PathBuf,

    /// Override the configured platform (Android, iOS, Web)
    #[arg(short, long)]
    platform: Option<String>,

    /// Log debug details
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args);

    match generate(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(args: &Args) {
    let level = if args.verbose {
        "debug"
    } else if args.quiet {
        "warn"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(std::io::stderr().is_terminal())
                .with_writer(std::io::stderr),
        )
        .init();
}

fn generate(args: &Args) -> Result<(), Error> {
    let mut config = Config::load(&args.config)?;
    if let Some(platform) = &args.platform {
        config.platform = platform.parse::<Platform>()?.name().to_string();
    }
    config.lint();

    let report = run(&config, &HttpFetcher::new()?)?;
    info!(
        "done: {} files written, {} sources skipped",
        report.files.len(),
        report.skipped_sources.len()
    );
    Ok(())
}
