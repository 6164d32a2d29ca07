//! CLI output formatting.
//!
//! Human-readable output uses colored symbols; `--json` switches every line
//! to a `{"type": ..., "payload": ...}` object for scripting. Quiet mode
//! suppresses everything except warnings, errors and requested data.

use std::fmt::Display;
use std::sync::{OnceLock, RwLock};

use owo_colors::OwoColorize;
use serde_json::json;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::domain::Product;

/// Runtime output configuration shared by CLI handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// Emit machine-readable JSON output instead of human-readable text.
    pub json: bool,
    /// Suppress non-essential output.
    pub quiet: bool,
    /// Verbosity level (0 = normal, 1+ = increasingly verbose).
    pub verbose: u8,
}

impl OutputConfig {
    #[must_use]
    pub const fn new(json: bool, quiet: bool, verbose: u8) -> Self {
        Self {
            json,
            quiet,
            verbose,
        }
    }
}

static OUTPUT_CONFIG: OnceLock<RwLock<OutputConfig>> = OnceLock::new();

fn config_cell() -> &'static RwLock<OutputConfig> {
    OUTPUT_CONFIG.get_or_init(|| RwLock::new(OutputConfig::default()))
}

fn read_config() -> OutputConfig {
    match config_cell().read() {
        Ok(config) => *config,
        Err(poisoned) => *poisoned.into_inner(),
    }
}

fn write_config(config: OutputConfig) {
    match config_cell().write() {
        Ok(mut current) => *current = config,
        Err(poisoned) => *poisoned.into_inner() = config,
    }
}

fn regular_output_suppressed(config: OutputConfig) -> bool {
    !config.json && config.quiet
}

fn emit_json_line(kind: &str, payload: serde_json::Value) {
    println!(
        "{}",
        json!({
            "type": kind,
            "payload": payload,
        })
    );
}

/// Apply output settings from global CLI flags.
pub fn configure(config: OutputConfig) {
    write_config(config);
}

/// Return whether machine-readable JSON output is enabled.
#[must_use]
pub fn is_json() -> bool {
    read_config().json
}

/// Return the global verbosity level from `-v` flags.
#[must_use]
pub fn verbosity() -> u8 {
    read_config().verbose
}

/// Print a labeled value.
pub fn field(label: &str, value: impl Display) {
    let config = read_config();
    let value = value.to_string();

    if config.json {
        emit_json_line("field", json!({ "label": label, "value": value }));
        return;
    }
    if regular_output_suppressed(config) {
        return;
    }

    println!("  {:<12} {}", label.dimmed(), value);
}

/// Print a success line.
pub fn success(message: &str) {
    let config = read_config();

    if config.json {
        emit_json_line("success", json!({ "message": message }));
        return;
    }
    if regular_output_suppressed(config) {
        return;
    }

    println!("  {} {}", "✓".green(), message);
}

/// Print a warning line.
pub fn warning(message: &str) {
    if read_config().json {
        emit_json_line("warning", json!({ "message": message }));
        return;
    }

    println!("  {} {}", "⚠".yellow(), message);
}

/// Print an error line to stderr.
pub fn error(message: &str) {
    if read_config().json {
        eprintln!(
            "{}",
            json!({
                "type": "error",
                "payload": { "message": message },
            })
        );
        return;
    }

    eprintln!("  {} {}", "×".red(), message);
}

/// Print requested data. Shown even in quiet mode.
pub fn data(kind: &str, payload: serde_json::Value, human: impl Display) {
    if read_config().json {
        emit_json_line(kind, payload);
        return;
    }
    println!("{human}");
}

/// Print a redirect decision.
pub fn redirect(status: u16, location: &str) {
    if read_config().json {
        emit_json_line(
            "redirect",
            json!({ "status": status, "location": location }),
        );
        return;
    }
    println!("  {} {} {}", status.to_string().yellow(), "→".dimmed(), location);
}

/// Print a rendered product, noting the slot it replaced if substituted.
pub fn rendered(product: &Product, requested: Option<u64>) {
    if read_config().json {
        emit_json_line(
            "render",
            json!({ "product": product, "substituted_for": requested }),
        );
        return;
    }

    println!("  {} {}", product.name.bold(), format!("#{}", product.id).dimmed());
    println!("  {:<12} {}", "Price".dimmed(), product.price);
    println!("  {:<12} {}", "Stock".dimmed(), stock_label(product));
    if !product.short_description.is_empty() {
        println!("  {:<12} {}", "Summary".dimmed(), product.short_description);
    }
    if let Some(requested) = requested {
        println!("  {} shown in place of #{requested}", "↺".cyan());
    }
}

fn stock_label(product: &Product) -> String {
    if product.is_in_stock() {
        product.stock_status.green().to_string()
    } else {
        product.stock_status.red().to_string()
    }
}

#[derive(Tabled)]
struct ProductLine {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Slug")]
    slug: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Stock")]
    stock: String,
}

/// Print a product listing.
pub fn products(products: &[Product]) {
    if read_config().json {
        emit_json_line("products", json!(products));
        return;
    }
    if products.is_empty() {
        println!("  {}", "no products".dimmed());
        return;
    }

    let lines: Vec<ProductLine> = products
        .iter()
        .map(|product| ProductLine {
            id: product.id.value(),
            name: product.name.clone(),
            slug: product.slug.clone(),
            price: product.price.to_string(),
            stock: product.stock_status.to_string(),
        })
        .collect();
    println!("{}", Table::new(lines).with(Style::rounded()));
}
