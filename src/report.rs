//! Output formatting for loopgate results.
//!
//! Supports two output formats:
//! - Pretty: colored terminal output listing passed then failed functions
//! - JSON: structured output for programmatic consumption

use colored::*;
use serde::Serialize;
use std::collections::BTreeSet;
use std::io::{self, Write};

use crate::config::ScanConfig;
use crate::scan::{Finding, IgnoredDir, ScanResult};

// =============================================================================
// JSON Format
// =============================================================================

/// JSON report structure.
#[derive(Serialize)]
pub struct JsonReport<'a> {
    pub version: &'static str,
    pub root: String,
    pub threshold: usize,
    pub ignore_dirs: &'a BTreeSet<String>,
    pub success: bool,
    pub files_scanned: usize,
    pub ignored_dirs: &'a [IgnoredDir],
    pub passed: &'a [Finding],
    pub failed: &'a [Finding],
}

impl<'a> JsonReport<'a> {
    pub fn new(config: &'a ScanConfig, result: &'a ScanResult) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            root: config.root.to_string_lossy().to_string(),
            threshold: result.threshold,
            ignore_dirs: &config.ignore_dirs,
            success: result.is_success(),
            files_scanned: result.files_scanned,
            ignored_dirs: &result.ignored_dirs,
            passed: &result.passed,
            failed: &result.failed,
        }
    }
}

/// Write results in JSON format.
pub fn write_json<W: Write>(
    out: &mut W,
    config: &ScanConfig,
    result: &ScanResult,
) -> anyhow::Result<()> {
    let report = JsonReport::new(config, result);
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}

// =============================================================================
// Pretty Format
// =============================================================================

/// Write results in pretty (human-readable) format.
///
/// Passed entries are blue when the gate fails and green when it passes;
/// failed entries are red.
pub fn write_pretty<W: Write>(
    out: &mut W,
    config: &ScanConfig,
    result: &ScanResult,
) -> io::Result<()> {
    write_params(out, config)?;
    for dir in &result.ignored_dirs {
        writeln!(out, "    {}", dir.to_string().yellow())?;
    }
    writeln!(out)?;

    let success = result.is_success();
    let passed_label = "Passed functions:";
    if success {
        writeln!(out, "  {}", passed_label.green().bold())?;
    } else {
        writeln!(out, "  {}", passed_label.blue().bold())?;
    }
    for finding in &result.passed {
        let line = finding.to_string();
        if success {
            writeln!(out, "    {}", line.green())?;
        } else {
            writeln!(out, "    {}", line.blue())?;
        }
    }

    if !success {
        writeln!(out)?;
        writeln!(out, "  {}", "Failed functions:".red().bold())?;
        for finding in &result.failed {
            writeln!(out, "    {}", finding.to_string().red())?;
        }
    }

    writeln!(out)?;
    write_summary(out, result)
}

fn write_params<W: Write>(out: &mut W, config: &ScanConfig) -> io::Result<()> {
    writeln!(
        out,
        "  {} v{}",
        "loopgate".cyan().bold(),
        env!("CARGO_PKG_VERSION")
    )?;
    writeln!(out, "  {}", "Parameters:".yellow())?;
    writeln!(
        out,
        "    {}",
        format!(
            "threshold: {}, root: {}",
            config.threshold,
            config.root.display()
        )
        .yellow()
    )?;
    let dirs: Vec<&str> = config.ignore_dirs.iter().map(String::as_str).collect();
    writeln!(
        out,
        "    {}",
        format!("ignore dirs: [{}]", dirs.join(", ")).yellow()
    )
}

fn write_summary<W: Write>(out: &mut W, result: &ScanResult) -> io::Result<()> {
    let counts = format!(
        "{} files, {} passed, {} failed, {} directories ignored",
        result.files_scanned,
        result.passed.len(),
        result.failed.len(),
        result.ignored_dirs.len()
    );
    writeln!(out, "  {}", counts.dimmed())?;

    if result.is_success() {
        writeln!(out, "  {}", "success...".green())
    } else {
        writeln!(
            out,
            "  {}",
            format!("FAILED: loop depth above {}", result.threshold).red()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (ScanConfig, ScanResult) {
        let config = ScanConfig::new("./svc")
            .with_threshold(2)
            .with_ignore_dirs(["vendor"]);
        let mut result = ScanResult::new(2);
        result.files_scanned = 2;
        result.record_function("A".to_string(), "./svc/a.go".to_string(), 1);
        result.record_function("B".to_string(), "./svc/a.go".to_string(), 3);
        result.record_parse_error(
            "./svc/b.go".to_string(),
            "expected 'package' clause".to_string(),
        );
        result.ignored_dirs.push(IgnoredDir {
            name: "vendor".to_string(),
            path: "./svc/vendor".to_string(),
        });
        (config, result)
    }

    #[test]
    fn test_pretty_lists_entries() {
        let (config, result) = sample();
        let mut buf = Vec::new();
        write_pretty(&mut buf, &config, &result).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("threshold: 2, root: ./svc"));
        assert!(text.contains("ignore dirs: [vendor]"));
        assert!(text.contains("ignore dir: vendor, path: ./svc/vendor"));
        assert!(text.contains("2 files, 1 passed, 2 failed, 1 directories ignored"));
        assert!(text.contains("Function A in file ./svc/a.go, loop depth: 1"));
        assert!(text.contains("Function B in file ./svc/a.go, loop depth: 3"));
        assert!(text.contains("Error in file ./svc/b.go: expected 'package' clause"));
        assert!(text.contains("Failed functions:"));
        assert!(!text.contains("success..."));

        let passed_at = text.find("Function A").unwrap();
        let failed_at = text.find("Function B").unwrap();
        assert!(passed_at < failed_at);
    }

    #[test]
    fn test_pretty_success() {
        let config = ScanConfig::new(".");
        let mut result = ScanResult::new(3);
        result.record_function("main".to_string(), "./main.go".to_string(), 0);

        let mut buf = Vec::new();
        write_pretty(&mut buf, &config, &result).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("success..."));
        assert!(!text.contains("Failed functions:"));
    }

    #[test]
    fn test_json_report() {
        let (config, result) = sample();
        let mut buf = Vec::new();
        write_json(&mut buf, &config, &result).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&buf).unwrap();

        assert_eq!(json["threshold"], 2);
        assert_eq!(json["root"], "./svc");
        assert_eq!(json["success"], false);
        assert_eq!(json["files_scanned"], 2);
        assert_eq!(json["ignore_dirs"][0], "vendor");
        assert_eq!(json["ignored_dirs"][0]["path"], "./svc/vendor");
        assert_eq!(json["passed"].as_array().unwrap().len(), 1);
        assert_eq!(json["failed"].as_array().unwrap().len(), 2);
        assert_eq!(json["failed"][0]["name"], "B");
        assert_eq!(json["failed"][1]["kind"], "parse_error");
    }
}
