//! CLI module graph and dispatch.

pub mod catalog;
pub mod command;
pub mod config;
pub mod fallbacks;
pub mod output;
pub mod view;

use command::{Cli, Commands};

use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Run a parsed command line.
///
/// # Errors
///
/// Returns the first error hit by the selected command.
pub fn execute(cli: &Cli) -> Result<()> {
    if let Commands::Config(command) = &cli.command {
        return config::execute(command, &cli.config);
    }

    let config = Config::load_or_default(&cli.config)?;
    config.init_logging();

    match &cli.command {
        Commands::Product(command) => catalog::execute(command, &config),
        Commands::Fallbacks(command) => fallbacks::execute(command, &config),
        Commands::Resolve(args) => view::resolve(args, &config),
        Commands::Stock => view::stock(&config),
        Commands::View(args) => view::execute(args, &config),
        Commands::Config(_) => Ok(()),
    }
}
