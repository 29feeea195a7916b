//! Loopgate - loop nesting quality gate.
//!
//! Loopgate scans a directory tree of Go sources and measures, for every
//! function and method, how deeply loops are nested inside one another.
//! Functions nesting deeper than a threshold fail the gate, which makes the
//! tool usable as a CI step.
//!
//! # Architecture
//!
//! - `frontend`: language frontends that parse files into a `SourceTree`
//! - `tree`: the statement model shared by frontends and analysis
//! - `analysis`: loop depth per function body and per file
//! - `scan`: directory walk and pass/fail classification
//! - `config`: scan configuration (defaults, YAML file, arguments)
//! - `report`: output formatting (pretty, JSON)
//!
//! # Example
//!
//! ```no_run
//! use loopgate::{frontend, ScanConfig, Scanner};
//!
//! let frontend = frontend::default_frontend().expect("Go frontend");
//! let config = ScanConfig::new("./pkg").with_threshold(2);
//! let result = Scanner::new(config, frontend).scan().unwrap();
//! for line in result.failed_lines() {
//!     println!("{}", line);
//! }
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod frontend;
pub mod report;
pub mod scan;
pub mod tree;

pub use analysis::{analyze_file, analyze_tree, body_depth, function_depth, FunctionStats};
pub use config::ScanConfig;
pub use frontend::{Frontend, FrontendError};
pub use scan::{Finding, IgnoredDir, ScanError, ScanResult, Scanner};
pub use tree::{Body, FunctionDeclaration, LoopKind, SourceTree, Statement};
