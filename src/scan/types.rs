//! Core types for scan results.

use serde::Serialize;
use std::fmt;

/// A single report entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Finding {
    /// Loop depth measured for one function.
    Function {
        name: String,
        path: String,
        depth: usize,
    },
    /// A file that could not be parsed.
    ParseError { path: String, message: String },
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finding::Function { name, path, depth } => {
                write!(f, "Function {} in file {}, loop depth: {}", name, path, depth)
            }
            Finding::ParseError { path, message } => {
                write!(f, "Error in file {}: {}", path, message)
            }
        }
    }
}

/// A directory skipped through the ignore-list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IgnoredDir {
    pub name: String,
    pub path: String,
}

impl fmt::Display for IgnoredDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ignore dir: {}, path: {}", self.name, self.path)
    }
}

/// Results of scanning a directory tree.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanResult {
    /// Threshold the functions were classified against.
    pub threshold: usize,
    /// Functions at or below the threshold, in visit order.
    pub passed: Vec<Finding>,
    /// Functions above the threshold and unparsable files, in visit order.
    pub failed: Vec<Finding>,
    /// Number of source files visited.
    pub files_scanned: usize,
    /// Directories skipped through the ignore-list, in visit order.
    pub ignored_dirs: Vec<IgnoredDir>,
}

impl ScanResult {
    pub fn new(threshold: usize) -> Self {
        Self {
            threshold,
            ..Self::default()
        }
    }

    /// Classify a function depth against the threshold and record it.
    pub fn record_function(&mut self, name: String, path: String, depth: usize) {
        let finding = Finding::Function { name, path, depth };
        if crate::analysis::exceeds_threshold(depth, self.threshold) {
            self.failed.push(finding);
        } else {
            self.passed.push(finding);
        }
    }

    /// Record a file that could not be parsed. Always a failure.
    pub fn record_parse_error(&mut self, path: String, message: String) {
        self.failed.push(Finding::ParseError { path, message });
    }

    /// True iff nothing failed.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Passed entries as report lines.
    pub fn passed_lines(&self) -> Vec<String> {
        self.passed.iter().map(ToString::to_string).collect()
    }

    /// Failed entries as report lines.
    pub fn failed_lines(&self) -> Vec<String> {
        self.failed.iter().map(ToString::to_string).collect()
    }
}
