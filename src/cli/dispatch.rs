//! Command dispatch, separated from the binary to keep `main` small.

use super::args::{Cli, Commands};
use super::handlers;
use crate::config::Config;
use crate::exit::LecternExit;
use anyhow::Result;
use std::path::PathBuf;

/// Executes the parsed command line.
///
/// # Errors
/// Returns error if config loading or the command handler fails.
pub fn execute(cli: Cli) -> Result<LecternExit> {
    let root = cli
        .root
        .clone()
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));
    let mut config = Config::load(root)?;
    config.verbose = cli.verbose;

    match cli.command {
        Commands::Links { .. }
        | Commands::Naming
        | Commands::Layout
        | Commands::Assets => run_validator(&config, cli.command),

        Commands::Annotate { .. }
        | Commands::Badge { .. }
        | Commands::Quotes { .. }
        | Commands::Tidy { .. } => run_mutator(&config, cli.command),

        Commands::Coverage { badges, index } => handlers::handle_coverage(&config, badges, index),
        Commands::Compile => handlers::handle_compile(&config),
        Commands::Restore => handlers::handle_restore(&config),
    }
}

fn run_validator(config: &Config, command: Commands) -> Result<LecternExit> {
    match command {
        Commands::Links { format, report } => handlers::handle_links(config, format, report.as_deref()),
        Commands::Naming => handlers::handle_naming(config),
        Commands::Layout => handlers::handle_layout(config),
        Commands::Assets => handlers::handle_assets(config),
        _ => unreachable!(),
    }
}

fn run_mutator(config: &Config, command: Commands) -> Result<LecternExit> {
    match command {
        Commands::Annotate {
            path,
            title,
            description,
            tags,
            author,
            batch,
            dry_run,
        } => {
            let opts = crate::notebook::annotate::AnnotateOptions {
                title,
                description,
                tags: tags.map(|t| t.split(',').map(|s| s.trim().to_string()).collect()),
                author,
                dry_run,
            };
            handlers::handle_annotate(config, &path, &opts, batch)
        }
        Commands::Badge { dry_run } => handlers::handle_badge(config, dry_run),
        Commands::Quotes { dry_run } => handlers::handle_quotes(config, dry_run),
        Commands::Tidy { dry_run } => handlers::handle_tidy(config, dry_run),
        _ => unreachable!(),
    }
}
