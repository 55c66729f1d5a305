// Integration tests for the selstat binary.
// Run with: cargo test -p selstat-cli --test cli_tests -- --nocapture

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self { dir: tempfile::tempdir().expect("tempdir") }
    }

    fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, contents).expect("write fixture");
        path
    }

    /// Settings path that does not exist, so defaults apply.
    fn settings(&self) -> PathBuf {
        self.dir.path().join("settings.json")
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_selstat"))
            .env("SELSTAT_SETTINGS", self.settings())
            .args(args)
            .output()
            .expect("run selstat")
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn path_arg(path: &Path) -> &str {
    path.to_str().expect("utf-8 path")
}

const PRICES: &str = "\"$1,234.56\",abc,42,\"1,5\"\n1,2,3,4\n5,6,7,8\n";

#[test]
fn stats_prints_status_line() {
    let ws = Workspace::new();
    let csv = ws.write("prices.csv", PRICES);

    let output = ws.run(&["stats", path_arg(&csv), "--range", "A1:D1"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output).trim(), "Average: 426.02  Count: 3  Sum: 1,278.06");
}

#[test]
fn stats_json_shape() {
    let ws = Workspace::new();
    let csv = ws.write("prices.csv", PRICES);

    let output = ws.run(&["stats", path_arg(&csv), "--range", "A2:B3", "--add", "C1", "--json"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let val: serde_json::Value = serde_json::from_str(stdout(&output).trim()).expect("valid JSON");
    assert_eq!(val["count"], 5);
    assert_eq!(val["cells"], 5);
    assert_eq!(val["sum"].as_f64().unwrap(), 56.0);
}

#[test]
fn stats_without_numbers_reports_empty() {
    let ws = Workspace::new();
    let csv = ws.write("words.csv", "a,b\nc,d\n");

    let output = ws.run(&["stats", path_arg(&csv), "--range", "A1:B2"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), "No numeric cells");

    let output = ws.run(&["stats", path_arg(&csv), "--range", "A1:B2", "--json"]);
    let val: serde_json::Value = serde_json::from_str(stdout(&output).trim()).expect("valid JSON");
    assert_eq!(val["empty"], true);
    assert_eq!(val["cells"], 4);
}

#[test]
fn stats_strict_and_locale() {
    let ws = Workspace::new();
    let csv = ws.write("prices.csv", PRICES);

    let output =
        ws.run(&["stats", path_arg(&csv), "--range", "A1:D1", "--strict", "--locale", "de-DE"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output).trim(), "Average: 21,75  Count: 2  Sum: 43,5");
}

#[test]
fn stats_with_localized_labels() {
    let ws = Workspace::new();
    let csv = ws.write("nums.csv", "1,2\n");
    let messages = ws.write("messages.json", r#"{"sum": {"message": "Summe"}, "count": "Anzahl"}"#);

    let output =
        ws.run(&["stats", path_arg(&csv), "-r", "A1:B1", "--messages", path_arg(&messages)]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output).trim(), "Average: 1.5  Anzahl: 2  Summe: 3");
}

#[test]
fn stats_tsv_by_extension() {
    let ws = Workspace::new();
    let tsv = ws.write("data.tsv", "1,000\t2\n");

    let output = ws.run(&["stats", path_arg(&tsv), "--range", "A1:B1"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output).trim(), "Average: 501  Count: 2  Sum: 1,002");
}

#[test]
fn copy_prints_tsv_in_row_order() {
    let ws = Workspace::new();
    let csv = ws.write("grid.csv", "a,b,c\nd, e ,f\ng,h,i\n");

    let output = ws.run(&["copy", path_arg(&csv), "--range", "C3:B2", "--add", "A1"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "a\ne\tf\nh\ti\n");
}

#[test]
fn range_outside_table_is_usage_error() {
    let ws = Workspace::new();
    let csv = ws.write("small.csv", "1,2\n3,4\n");

    let output = ws.run(&["stats", path_arg(&csv), "--range", "A1:C9"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("C9 is outside the table"));

    let output = ws.run(&["stats", path_arg(&csv), "--range", "nonsense"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn missing_file_is_io_error() {
    let ws = Workspace::new();
    let missing = ws.dir.path().join("missing.csv");

    let output = ws.run(&["stats", path_arg(&missing), "--range", "A1"]);
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn disabled_settings_refuse_selection() {
    let ws = Workspace::new();
    let csv = ws.write("nums.csv", "1,2\n");
    std::fs::write(ws.settings(), r#"{"enabled": false}"#).unwrap();

    let output = ws.run(&["stats", path_arg(&csv), "--range", "A1:B1"]);
    assert_eq!(output.status.code(), Some(5));
    assert!(stderr(&output).contains("disabled"));
}

#[test]
fn smart_copy_off_refuses_copy() {
    let ws = Workspace::new();
    let csv = ws.write("nums.csv", "1,2\n");
    std::fs::write(ws.settings(), "{\n  // no clipboard export\n  \"smartCopy\": false\n}\n").unwrap();

    let output = ws.run(&["copy", path_arg(&csv), "--range", "A1:B1"]);
    assert_eq!(output.status.code(), Some(5));
}

#[test]
fn settings_file_enables_strict_mode() {
    let ws = Workspace::new();
    let csv = ws.write("prices.csv", PRICES);
    std::fs::write(ws.settings(), r#"{"strictMode": true}"#).unwrap();

    let output = ws.run(&["stats", path_arg(&csv), "--range", "A1:D1", "--json"]);
    let val: serde_json::Value = serde_json::from_str(stdout(&output).trim()).expect("valid JSON");
    assert_eq!(val["count"], 2);
}

#[test]
fn config_prints_effective_settings() {
    let ws = Workspace::new();
    let output = ws.run(&["config"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let val: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("valid JSON");
    assert_eq!(val["enabled"], true);
    assert_eq!(val["strictMode"], false);
    assert_eq!(val["theme"], "auto");

    let output = ws.run(&["config", "--path"]);
    assert_eq!(stdout(&output).trim(), path_arg(&ws.settings()));
}
