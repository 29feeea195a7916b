//! Command-line interface for loopgate.

use clap::error::ErrorKind;
use clap::Parser;
use std::io;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::{self, ScanConfig};
use crate::frontend;
use crate::report;
use crate::scan::Scanner;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;

/// Quality gate for loop nesting depth in Go sources.
///
/// Scans a directory tree for Go files and fails when any function nests
/// loops deeper than the threshold.
#[derive(Parser, Debug)]
#[command(name = "loopgate")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Maximum allowed loop nesting depth (default: 3)
    #[arg(allow_negative_numbers = true)]
    pub threshold: Option<String>,

    /// Directory to scan (default: current directory)
    pub root: Option<String>,

    /// Directory names to skip, as a JSON array (e.g. '["vendor","testdata"]')
    pub ignore_dirs: Option<String>,

    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format: pretty or json
    #[arg(short, long, default_value = "pretty")]
    pub format: String,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Exit code for an argument error. Help and version output are not failures.
pub fn parse_error_exit_code(err: &clap::Error) -> i32 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => EXIT_SUCCESS,
        _ => EXIT_FAILED,
    }
}

/// Initialize logging to stderr. `RUST_LOG` takes precedence over `-v`.
pub fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

/// Build the scan configuration: defaults, then config file, then arguments.
pub fn resolve_config(cli: &Cli) -> ScanConfig {
    let config_path = cli
        .config
        .clone()
        .or_else(|| ScanConfig::discover("."));

    let mut config = match config_path {
        Some(path) => match ScanConfig::from_file(&path) {
            Ok(c) => {
                info!(path = %path.display(), "loaded config file");
                c
            }
            Err(e) => {
                warn!(error = %e, "ignoring config file");
                ScanConfig::default()
            }
        },
        None => ScanConfig::default(),
    };

    if let Some(threshold) = cli.threshold.as_deref().and_then(config::parse_threshold) {
        config.threshold = threshold;
    }
    if let Some(root) = cli.root.as_deref().filter(|r| !r.is_empty()) {
        config.root = PathBuf::from(root);
    }
    if let Some(raw) = &cli.ignore_dirs {
        config.ignore_dirs = config::parse_ignore_list(raw);
    }

    config
}

/// Run a scan and print the report.
pub fn run(cli: &Cli) -> anyhow::Result<i32> {
    if cli.no_color {
        colored::control::set_override(false);
    }

    if cli.format != "pretty" && cli.format != "json" {
        eprintln!(
            "Error: invalid format {:?}, must be 'pretty' or 'json'",
            cli.format
        );
        return Ok(EXIT_FAILED);
    }

    let config = resolve_config(cli);
    let frontend = frontend::default_frontend().ok_or_else(|| {
        anyhow::anyhow!("no language frontend available (enable the tree-sitter feature)")
    })?;

    let scanner = Scanner::new(config, frontend);
    let result = scanner.scan()?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.format.as_str() {
        "json" => report::write_json(&mut out, scanner.config(), &result)?,
        _ => report::write_pretty(&mut out, scanner.config(), &result)?,
    }

    if result.is_success() {
        Ok(EXIT_SUCCESS)
    } else {
        Ok(EXIT_FAILED)
    }
}
