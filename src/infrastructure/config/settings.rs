//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application
//! settings. Configuration is loaded from a TOML file; the database path
//! can be overridden with `PRODUCT_FALLBACKS_DATABASE`.
//!
//! # Example
//!
//! ```no_run
//! use product_fallbacks::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use super::logging::LoggingConfig;
use crate::application::SubstitutionPolicy;
use crate::domain::ProductId;
use crate::error::{ConfigError, Result};

/// Environment variable overriding [`Config::database`].
pub const DATABASE_ENV: &str = "PRODUCT_FALLBACKS_DATABASE";

/// Public storefront the permalinks point at.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorefrontConfig {
    /// Site root, e.g. `https://shop.example.com/`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path segment under which product pages live.
    #[serde(default = "default_product_base")]
    pub product_base: String,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            product_base: default_product_base(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8080/".to_string()
}

fn default_product_base() -> String {
    "product".to_string()
}

/// Which rendering hooks are active.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SubstitutionConfig {
    /// Redirect single-product pages of out-of-stock products.
    #[serde(default = "default_true")]
    pub redirect: bool,

    /// Overwrite out-of-stock products with their fallback when populated.
    #[serde(default = "default_true")]
    pub substitute_content: bool,
}

impl Default for SubstitutionConfig {
    fn default() -> Self {
        Self {
            redirect: true,
            substitute_content: true,
        }
    }
}

const fn default_true() -> bool {
    true
}

/// Public product listing settings.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ListingConfig {
    /// Product ids left out of public product listings.
    #[serde(default)]
    pub exclude: Vec<u64>,
}

/// Main application configuration.
///
/// Load from a TOML file using [`Config::load`] or parse directly with
/// [`Config::parse_toml`]. Every section is optional.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Path to the SQLite database file.
    ///
    /// Defaults to "fallbacks.db" in the current directory.
    #[serde(default = "default_database_path")]
    pub database: String,

    #[serde(default)]
    pub storefront: StorefrontConfig,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub substitution: SubstitutionConfig,

    #[serde(default)]
    pub listing: ListingConfig,
}

fn default_database_path() -> String {
    "fallbacks.db".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database_path(),
            storefront: StorefrontConfig::default(),
            logging: LoggingConfig::default(),
            substitution: SubstitutionConfig::default(),
            listing: ListingConfig::default(),
        }
    }
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;

        if let Ok(database) = std::env::var(DATABASE_ENV) {
            config.database = database;
        }

        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load `path` if it exists, otherwise start from defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file fails to load.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Self::parse_toml("")
        }
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<()> {
        if self.database.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "database" }.into());
        }
        if self.storefront.base_url.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "base_url" }.into());
        }

        let base = Url::parse(&self.storefront.base_url).map_err(|e| ConfigError::InvalidValue {
            field: "base_url",
            reason: e.to_string(),
        })?;
        if !matches!(base.scheme(), "http" | "https") || base.cannot_be_a_base() {
            return Err(ConfigError::InvalidValue {
                field: "base_url",
                reason: "must be an http or https URL".to_string(),
            }
            .into());
        }

        if !LoggingConfig::FORMATS.contains(&self.logging.format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "format",
                reason: format!("must be one of {}", LoggingConfig::FORMATS.join(", ")),
            }
            .into());
        }

        if self.listing.exclude.contains(&0) {
            return Err(ConfigError::InvalidValue {
                field: "exclude",
                reason: "product ids must be greater than 0".to_string(),
            }
            .into());
        }

        Ok(())
    }

    /// URL every product permalink is joined onto, always ending in `/`.
    ///
    /// # Errors
    ///
    /// Returns an error if the storefront URL cannot be parsed.
    pub fn product_base_url(&self) -> Result<Url> {
        let mut base = Url::parse(&self.storefront.base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let segment = self.storefront.product_base.trim_matches('/');
        if segment.is_empty() {
            return Ok(base);
        }
        Ok(base.join(&format!("{segment}/"))?)
    }

    /// Hook behaviour derived from the `substitution` and `listing` sections.
    #[must_use]
    pub fn substitution_policy(&self) -> SubstitutionPolicy {
        SubstitutionPolicy {
            redirect: self.substitution.redirect,
            substitute_content: self.substitution.substitute_content,
            listing_exclude: self
                .listing
                .exclude
                .iter()
                .copied()
                .filter_map(ProductId::from_coerced)
                .collect(),
        }
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}
