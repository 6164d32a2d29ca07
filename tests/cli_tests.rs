use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

/// A scratch directory holding a config file and its catalog database.
struct Workspace {
    dir: TempDir,
    config: PathBuf,
}

impl Workspace {
    fn new(extra: &str) -> Self {
        let dir = TempDir::new().expect("temp dir");
        let database = dir.path().join("catalog.db");
        let config = dir.path().join("config.toml");
        let toml = format!(
            concat!(
                "database = \"{}\"\n",
                "\n",
                "[storefront]\n",
                "base_url = \"https://shop.example.com/\"\n",
                "\n",
                "[logging]\n",
                "level = \"warn\"\n",
                "format = \"pretty\"\n",
                "{}"
            ),
            database.display().to_string().replace('\\', "/"),
            extra
        );
        fs::write(&config, toml).expect("write temp config");
        Self { dir, config }
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_product-fallbacks"));
        cmd.current_dir(self.dir.path())
            .env_remove("PRODUCT_FALLBACKS_DATABASE")
            .env_remove("RUST_LOG")
            .arg("--config")
            .arg(&self.config);
        cmd
    }

    fn run(&self, args: &[&str]) {
        self.cmd().args(args).assert().success();
    }

    fn json(&self, args: &[&str]) -> Vec<Value> {
        let output = self.cmd().arg("--json").args(args).output().expect("run cli");
        assert!(output.status.success(), "{args:?} failed: {output:?}");
        String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(|line| serde_json::from_str(line).expect("json line"))
            .collect()
    }

    fn add(&self, id: &str, slug: &str, stock: &str) {
        self.run(&["product", "add", id, "--name", slug, "--slug", slug, "--stock", stock]);
    }
}

fn payload<'a>(lines: &'a [Value], kind: &str) -> &'a Value {
    lines
        .iter()
        .find(|line| line["type"] == kind)
        .map(|line| &line["payload"])
        .unwrap_or_else(|| panic!("no {kind} line in {lines:?}"))
}

#[test]
fn cli_returns_nonzero_on_config_error() {
    let ws = Workspace::new("\n[listing]\nexclude = [0]\n");

    ws.cmd()
        .args(["config", "validate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("exclude"));
}

#[test]
fn config_validate_accepts_valid_file() {
    let ws = Workspace::new("");
    ws.cmd().args(["config", "validate"]).assert().success();
}

#[test]
fn view_redirects_out_of_stock_product() {
    let ws = Workspace::new("");
    ws.add("100", "hoodie", "outofstock");
    ws.add("101", "hoodie-zip", "outofstock");
    ws.add("102", "hoodie-logo", "instock");
    ws.run(&["fallbacks", "set", "100", "101, 102"]);

    let lines = ws.json(&["view", "100"]);
    let redirect = payload(&lines, "redirect");
    assert_eq!(redirect["status"], 302);
    assert_eq!(
        redirect["location"],
        "https://shop.example.com/product/hoodie-logo/"
    );
}

#[test]
fn view_listing_renders_fallback_content() {
    let ws = Workspace::new("");
    ws.add("100", "hoodie", "outofstock");
    ws.add("102", "hoodie-logo", "instock");
    ws.run(&["fallbacks", "set", "100", "102"]);

    let lines = ws.json(&["view", "100", "--listing"]);
    let render = payload(&lines, "render");
    assert_eq!(render["product"]["id"], 102);
    assert_eq!(render["substituted_for"], 100);
}

#[test]
fn view_renders_original_when_fallbacks_are_exhausted() {
    let ws = Workspace::new("");
    ws.add("100", "hoodie", "outofstock");
    ws.add("101", "hoodie-zip", "outofstock");
    ws.run(&["fallbacks", "set", "100", "101"]);

    let lines = ws.json(&["view", "100"]);
    assert!(lines.iter().all(|line| line["type"] != "redirect"));
    let render = payload(&lines, "render");
    assert_eq!(render["product"]["id"], 100);
    assert!(render["substituted_for"].is_null());
}

#[test]
fn fallbacks_set_coerces_input() {
    let ws = Workspace::new("");
    ws.add("100", "hoodie", "outofstock");
    ws.run(&["fallbacks", "set", "100", "5, 12,0,abc,7"]);

    let lines = ws.json(&["fallbacks", "show", "100"]);
    assert_eq!(payload(&lines, "fallbacks")["fallbacks"], serde_json::json!([5, 12, 7]));
}

#[test]
fn fallbacks_clear_removes_list() {
    let ws = Workspace::new("");
    ws.add("100", "hoodie", "outofstock");
    ws.add("101", "hoodie-zip", "instock");
    ws.run(&["fallbacks", "set", "100", "101"]);
    ws.run(&["fallbacks", "clear", "100"]);

    let lines = ws.json(&["resolve", "100"]);
    assert!(payload(&lines, "resolve")["fallback"].is_null());
}

#[test]
fn product_add_rejects_slug_of_another_product() {
    let ws = Workspace::new("");
    ws.add("1", "hoodie", "outofstock");

    ws.cmd()
        .args(["product", "add", "2", "--name", "Other", "--slug", "hoodie"])
        .assert()
        .failure();

    let lines = ws.json(&["product", "show", "1"]);
    let shown = payload(&lines, "product");
    assert_eq!(shown["product"]["slug"], "hoodie");
    assert_eq!(shown["product"]["stock_status"], "outofstock");
}

#[test]
fn resolve_reports_missing_fallback_as_inactive() {
    let ws = Workspace::new("");
    ws.add("100", "hoodie", "outofstock");
    ws.add("102", "hoodie-logo", "instock");
    ws.run(&["fallbacks", "set", "100", "999"]);

    let lines = ws.json(&["resolve", "100"]);
    let resolved = payload(&lines, "resolve");
    assert_eq!(resolved["fallback"], 999);
    assert_eq!(resolved["applies"], false);

    ws.run(&["fallbacks", "set", "100", "999, 102"]);
    let lines = ws.json(&["resolve", "100"]);
    let resolved = payload(&lines, "resolve");
    assert_eq!(resolved["fallback"], 999);
    assert_eq!(resolved["applies"], false);

    ws.run(&["fallbacks", "set", "100", "102"]);
    let lines = ws.json(&["resolve", "100"]);
    assert_eq!(payload(&lines, "resolve")["applies"], true);
}

#[test]
fn fallbacks_set_requires_existing_product() {
    let ws = Workspace::new("");

    ws.cmd()
        .args(["fallbacks", "set", "100", "101"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("100"));
}

#[test]
fn stock_lists_out_of_stock_products() {
    let ws = Workspace::new("");
    ws.add("100", "hoodie", "outofstock");
    ws.add("101", "hoodie-zip", "onbackorder");
    ws.add("102", "hoodie-logo", "instock");
    ws.add("103", "tee", "outofstock");

    let lines = ws.json(&["stock"]);
    assert_eq!(
        payload(&lines, "out_of_stock")["products"],
        serde_json::json!([100, 103])
    );
}

#[test]
fn product_list_hides_excluded_products_from_public_listing() {
    let ws = Workspace::new("\n[listing]\nexclude = [157]\n");
    ws.add("100", "hoodie", "instock");
    ws.add("157", "hidden", "instock");

    let public = ws.json(&["product", "list"]);
    let ids: Vec<u64> = payload(&public, "products")
        .as_array()
        .expect("product array")
        .iter()
        .filter_map(|product| product["id"].as_u64())
        .collect();
    assert_eq!(ids, vec![100]);

    let admin = ws.json(&["product", "list", "--admin"]);
    assert_eq!(payload(&admin, "products").as_array().map(Vec::len), Some(2));
}
