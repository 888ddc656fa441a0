//! End-to-end tests running the built `ets-parse` binary.

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const PAGE: &str = "@Entry\n@Component\nstruct Index {\n  @State message: string = 'Hello'\n\n  build() {\n    Text($r('app.string.title')).fontSize(50)\n  }\n}\n";

/// Run the binary inside `dir`, isolated from any user config.
fn ets_parse(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ets-parse"))
        .args(args)
        .current_dir(dir)
        .env("XDG_CONFIG_HOME", dir.join("xdg"))
        .env_remove("ETS_PARSE_LOG")
        .output()
        .expect("failed to run ets-parse")
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("Index.ets"), PAGE).unwrap();
    dir
}

#[test]
fn missing_arguments_print_usage() {
    let dir = TempDir::new().unwrap();
    for args in [&[][..], &["only.ets"][..]] {
        let output = ets_parse(dir.path(), args);
        assert_eq!(output.status.code(), Some(1));
        assert!(stderr(&output).contains("Usage: ets-parse <source-file> <output-file>"));
    }
}

#[test]
fn writes_pretty_ir_by_default() {
    let dir = workspace();
    let output = ets_parse(dir.path(), &["Index.ets", "out.json"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stderr(&output).contains("Successfully parsed: Index.ets"));

    let json = std::fs::read_to_string(dir.path().join("out.json")).unwrap();
    assert!(json.starts_with("{\n  \"kind\""));
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["kindName"], "SourceFile");
    assert_eq!(value["fileName"], "Index.ets");
    assert_eq!(value["statements"][0]["kindName"], "ClassDeclaration");
    assert_eq!(value["statements"][0]["decorators"][1]["name"], "Component");
}

#[test]
fn compact_flag_writes_single_line() {
    let dir = workspace();
    let output = ets_parse(dir.path(), &["Index.ets", "out.json", "--compact"]);
    assert!(output.status.success(), "{}", stderr(&output));
    let json = std::fs::read_to_string(dir.path().join("out.json")).unwrap();
    assert!(!json.contains('\n'));
}

#[test]
fn emits_javascript() {
    let dir = workspace();
    let output = ets_parse(dir.path(), &["Index.ets", "out.js", "--emit", "js"]);
    assert!(output.status.success(), "{}", stderr(&output));
    let js = std::fs::read_to_string(dir.path().join("out.js")).unwrap();
    assert!(js.starts_with("export class Index {"));
    assert!(js.contains(r#"__getResourceId__(10003, undefined, "app", "title")"#));
}

#[test]
fn project_config_selects_output() {
    let dir = workspace();
    std::fs::create_dir_all(dir.path().join(".ets-parse")).unwrap();
    std::fs::write(
        dir.path().join(".ets-parse/config.toml"),
        "[output]\nemit = \"js\"\n",
    )
    .unwrap();

    let output = ets_parse(dir.path(), &["Index.ets", "out.js"]);
    assert!(output.status.success(), "{}", stderr(&output));
    let js = std::fs::read_to_string(dir.path().join("out.js")).unwrap();
    assert!(js.contains("class Index"));

    // Flags beat config.
    let output = ets_parse(dir.path(), &["Index.ets", "out.json", "--emit", "ir"]);
    assert!(output.status.success(), "{}", stderr(&output));
    let json = std::fs::read_to_string(dir.path().join("out.json")).unwrap();
    assert!(json.starts_with('{'));
}

#[test]
fn strict_mode_fails_on_syntax_error() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("bad.ets"), "let = ;\n").unwrap();

    let output = ets_parse(dir.path(), &["bad.ets", "out.json", "--strict"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Error parsing file:"));
    assert!(!dir.path().join("out.json").exists());

    let output = ets_parse(dir.path(), &["bad.ets", "out.json"]);
    assert!(output.status.success(), "{}", stderr(&output));
}

#[test]
fn unreadable_source_is_an_error() {
    let dir = TempDir::new().unwrap();
    let output = ets_parse(dir.path(), &["missing.ets", "out.json"]);
    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("Error parsing file: failed to read missing.ets"));
}

#[test]
fn invalid_config_is_skipped() {
    let dir = workspace();
    std::fs::write(dir.path().join("broken.toml"), "[output\n").unwrap();
    let output = ets_parse(
        dir.path(),
        &["Index.ets", "out.json", "--config", "broken.toml"],
    );
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stderr(&output).contains("invalid config file"));
}
