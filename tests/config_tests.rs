use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use product_fallbacks::error::{ConfigError, Error};
use product_fallbacks::infrastructure::config::settings::Config;

fn write_temp_config(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("config.toml");
    fs::write(&path, contents).expect("write temp config");
    path
}

#[test]
fn config_loads_full_document() {
    let toml = r#"
database = "catalog.db"

[storefront]
base_url = "https://shop.example.com/"
product_base = "shop"

[logging]
level = "debug"
format = "json"

[substitution]
redirect = true
substitute_content = false

[listing]
exclude = [157]
"#;

    let dir = TempDir::new().expect("temp dir");
    let path = write_temp_config(&dir, toml);
    let config = Config::load(&path).expect("config loads");

    assert_eq!(config.database, "catalog.db");
    assert_eq!(config.logging.format, "json");
    assert_eq!(
        config.product_base_url().unwrap().as_str(),
        "https://shop.example.com/shop/"
    );

    let policy = config.substitution_policy();
    assert!(policy.redirect);
    assert!(!policy.substitute_content);
    assert_eq!(policy.listing_exclude.len(), 1);
}

#[test]
fn config_rejects_unknown_log_format() {
    let toml = r#"
[logging]
level = "info"
format = "xml"
"#;

    let dir = TempDir::new().expect("temp dir");
    let path = write_temp_config(&dir, toml);
    let result = Config::load(&path);

    match result {
        Err(Error::Config(ConfigError::InvalidValue {
            field: "format", ..
        })) => {}
        Err(err) => panic!("Expected invalid format error, got {err}"),
        Ok(_) => panic!("Expected invalid format error, got Ok"),
    }
}

#[test]
fn config_rejects_unparseable_base_url() {
    let toml = r#"
[storefront]
base_url = "not a url"
"#;

    let dir = TempDir::new().expect("temp dir");
    let path = write_temp_config(&dir, toml);

    assert!(matches!(
        Config::load(&path),
        Err(Error::Config(ConfigError::InvalidValue {
            field: "base_url",
            ..
        }))
    ));
}

#[test]
fn config_reports_malformed_toml() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_temp_config(&dir, "database = [");

    assert!(matches!(
        Config::load(&path),
        Err(Error::Config(ConfigError::Parse(_)))
    ));
}

#[test]
fn missing_file_is_an_error_for_load_but_not_for_load_or_default() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("absent.toml");

    assert!(matches!(
        Config::load(&path),
        Err(Error::Config(ConfigError::ReadFile(_)))
    ));

    let config = Config::load_or_default(&path).expect("defaults");
    assert!(config.substitution.redirect);
    assert!(config.listing.exclude.is_empty());
}
