//! Integration tests for scanning Go source trees.
//!
//! These tests run the Go frontend and the scanner against the fixture tree
//! in `testdata/gate` and against generated temporary trees.

#![cfg(feature = "tree-sitter")]

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use loopgate::cli::{self, Cli, EXIT_FAILED, EXIT_SUCCESS};
use loopgate::{analyze_file, frontend, Frontend, ScanConfig, ScanResult, Scanner};
use tempfile::TempDir;

fn testdata_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata").join("gate")
}

fn go() -> &'static dyn Frontend {
    frontend::default_frontend().expect("Go frontend should be available")
}

fn scan(config: ScanConfig) -> ScanResult {
    Scanner::new(config, go()).scan().expect("scan should succeed")
}

fn function_names(lines: &[String]) -> Vec<String> {
    lines
        .iter()
        .filter(|l| l.starts_with("Function "))
        .map(|l| l.split_whitespace().nth(1).unwrap().to_string())
        .collect()
}

// =============================================================================
// Fixture tree
// =============================================================================

#[test]
fn test_fixture_default_threshold() {
    let result = scan(ScanConfig::new(testdata_path()));

    assert_eq!(result.files_scanned, 4);
    assert_eq!(
        function_names(&result.passed_lines()),
        vec!["Dump", "Match", "NewHandler", "Register", "Sum3"]
    );
    assert_eq!(function_names(&result.failed_lines()), vec!["Pairs", "Deep"]);

    let failed = result.failed_lines();
    assert_eq!(failed.len(), 3);
    assert!(failed[0].starts_with("Error in file "), "{}", failed[0]);
    assert!(failed[0].contains("bad.go"));
    assert!(failed[1].ends_with("matrix.go, loop depth: 4"), "{}", failed[1]);
    assert!(failed[2].ends_with("deep.go, loop depth: 5"), "{}", failed[2]);
    assert!(!result.is_success());
}

#[test]
fn test_fixture_ignored_directories() {
    let config = ScanConfig::new(testdata_path())
        .with_threshold(4)
        .with_ignore_dirs(["vendor", "broken"]);
    let result = scan(config);

    let ignored: Vec<&str> = result
        .ignored_dirs
        .iter()
        .map(|d| d.name.as_str())
        .collect();
    assert_eq!(ignored, vec!["broken", "vendor"]);
    assert_eq!(result.files_scanned, 2);
    assert!(result.failed.is_empty());
    assert!(result.is_success());
    assert!(result
        .passed_lines()
        .iter()
        .all(|l| !l.contains("deep.go") && !l.contains("bad.go")));
}

#[test]
fn test_fixture_ignore_is_exact_name_match() {
    let config = ScanConfig::new(testdata_path())
        .with_threshold(10)
        .with_ignore_dirs(["vend", "dep/", "gate/vendor"]);
    let result = scan(config);

    assert!(result.ignored_dirs.is_empty());
    assert!(result.passed_lines().iter().any(|l| l.contains("Deep")));
}

#[test]
fn test_fixture_scan_is_repeatable() {
    let first = scan(ScanConfig::new(testdata_path()));
    let second = scan(ScanConfig::new(testdata_path()));

    assert_eq!(first.passed_lines(), second.passed_lines());
    assert_eq!(first.failed_lines(), second.failed_lines());
}

#[test]
fn test_analyze_file_is_idempotent() {
    let path = testdata_path().join("service").join("matrix.go");
    let first = analyze_file(go(), &path).unwrap();
    let second = analyze_file(go(), &path).unwrap();

    assert_eq!(first, second);
    assert_eq!(first["Sum3"], 3);
    assert_eq!(first["Pairs"], 4);
}

// =============================================================================
// Generated trees
// =============================================================================

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

const TWO_FUNCS: &str = r#"
package main

func A(xs []int) {
    for _, x := range xs {
        _ = x
    }
}

func B(n int) {
    for i := 0; i < n; i++ {
        for j := 0; j < n; j++ {
            for k := 0; k < n; k++ {
                println(i, j, k)
            }
        }
    }
}
"#;

#[test]
fn test_end_to_end_threshold_two() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "main.go", TWO_FUNCS);

    let result = scan(ScanConfig::new(temp.path()).with_threshold(2));

    assert_eq!(function_names(&result.passed_lines()), vec!["A"]);
    assert_eq!(function_names(&result.failed_lines()), vec!["B"]);
    assert!(result.passed_lines()[0].ends_with("main.go, loop depth: 1"));
    assert!(result.failed_lines()[0].ends_with("main.go, loop depth: 3"));
    assert!(!result.is_success());
}

#[test]
fn test_threshold_boundary() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "main.go", TWO_FUNCS);

    let result = scan(ScanConfig::new(temp.path()).with_threshold(3));
    assert!(result.is_success());
    assert_eq!(result.passed.len(), 2);
}

#[test]
fn test_non_go_files_are_skipped() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "main.go", "package main\n\nfunc main() {}\n");
    write(temp.path(), "notes.md", "for { for { for { for {} } } }");
    write(temp.path(), "script.go.txt", "not go");

    let result = scan(ScanConfig::new(temp.path()).with_threshold(0));
    assert_eq!(result.files_scanned, 1);
    assert!(result.is_success());
}

#[test]
fn test_cli_exit_codes() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "main.go", TWO_FUNCS);
    let root = temp.path().to_string_lossy().to_string();
    let config = temp.path().join("none.yaml").to_string_lossy().to_string();

    let failing = Cli::parse_from([
        "loopgate",
        "2",
        root.as_str(),
        "[]",
        "--config",
        config.as_str(),
        "--no-color",
    ]);
    assert_eq!(cli::run(&failing).unwrap(), EXIT_FAILED);

    let passing = Cli::parse_from([
        "loopgate",
        "3",
        root.as_str(),
        "[]",
        "--config",
        config.as_str(),
        "--format",
        "json",
    ]);
    assert_eq!(cli::run(&passing).unwrap(), EXIT_SUCCESS);
}

#[test]
fn test_cli_negative_threshold_keeps_default() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "main.go", TWO_FUNCS);
    let root = temp.path().to_string_lossy().to_string();
    let config = temp.path().join("none.yaml").to_string_lossy().to_string();

    let cli = Cli::try_parse_from([
        "loopgate",
        "-1",
        root.as_str(),
        "[]",
        "--config",
        config.as_str(),
    ])
    .expect("negative threshold should parse as a value");

    assert_eq!(cli::resolve_config(&cli).threshold, 3);
    assert_eq!(cli::run(&cli).unwrap(), EXIT_SUCCESS);
}

#[test]
fn test_cli_missing_root_is_an_error() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("missing").to_string_lossy().to_string();
    let config = temp.path().join("none.yaml").to_string_lossy().to_string();

    let cli = Cli::parse_from([
        "loopgate",
        "3",
        root.as_str(),
        "[]",
        "--config",
        config.as_str(),
    ]);
    assert!(cli::run(&cli).is_err());
}
