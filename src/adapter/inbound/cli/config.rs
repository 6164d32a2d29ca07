//! Handlers for `config` commands.

use std::path::Path;

use super::command::ConfigCommand;
use super::output;
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::settings::Config;

pub fn execute(command: &ConfigCommand, path: &Path) -> Result<()> {
    match command {
        ConfigCommand::Show => show(path),
        ConfigCommand::Validate => validate(path),
    }
}

fn show(path: &Path) -> Result<()> {
    let config = Config::load_or_default(path)?;
    let rendered = render(&config)?;
    output::data("config", serde_json::to_value(&config)?, rendered.trim_end());
    Ok(())
}

fn render(config: &Config) -> Result<String> {
    Ok(toml::to_string_pretty(config).map_err(ConfigError::Serialize)?)
}

fn validate(path: &Path) -> Result<()> {
    let config = Config::load(path)?;
    output::success(&format!("{} is valid", path.display()));
    if output::verbosity() > 0 {
        output::field("Database", &config.database);
        output::field("Products", config.product_base_url()?);
    }
    Ok(())
}
