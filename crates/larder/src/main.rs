mod cli;
mod commands;
mod output;

use clap::{CommandFactory, Parser};
use cli::{Cli, ColorMode, Commands, ValidateTarget};
use output::{OutputMode, Reporter};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    let mode = if cli.json {
        OutputMode::Json
    } else if cli.quiet {
        OutputMode::Quiet
    } else {
        OutputMode::Human
    };

    match cli.color {
        ColorMode::Never => colored::control::set_override(false),
        ColorMode::Always => colored::control::set_override(true),
        ColorMode::Auto => {}
    }

    let mut reporter = Reporter::new(mode);

    let success = match cli.command {
        Commands::Validate { target } => match target {
            ValidateTarget::Article {
                file,
                previous,
                media,
                media_api,
            } => commands::validate::run_validate_article(
                &file,
                previous.as_deref(),
                media.as_deref(),
                media_api.as_deref(),
                &mut reporter,
            ),
        },
        Commands::Preview { file, media } => {
            commands::preview::run_preview(&file, media.as_deref(), &mut reporter)
        }
        Commands::Webhook {
            collection,
            file,
            operation,
            force,
        } => commands::webhook::run_webhook(
            collection,
            &file,
            operation.into(),
            force,
            &mut reporter,
        ),
        Commands::Translate { target, texts } => {
            commands::translate::run_translate(&target, &texts, &mut reporter)
        }
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "larder", &mut std::io::stdout());
            return;
        }
    };

    reporter.finish();

    if !success {
        std::process::exit(1);
    }
}

/// `RUST_LOG` wins; otherwise `--quiet` keeps warnings, `--verbose` adds
/// debug output. Logs go to stderr so `--json` output stays parseable.
fn init_logging(verbose: bool, quiet: bool) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if quiet {
        EnvFilter::new("warn")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
