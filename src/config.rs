//! Scan configuration.
//!
//! Values come from three layers, later ones winning: built-in defaults, an
//! optional YAML file, and the positional command-line arguments. Malformed
//! values never abort a run; they are logged and the previous value is kept.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

/// Maximum loop depth allowed when nothing else is configured.
pub const DEFAULT_THRESHOLD: usize = 3;

/// Default config file names to search for.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["loopgate.yaml", ".loopgate.yaml"];

/// Errors loading a config file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("reading {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Everything the scanner needs to know.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Maximum allowed loop nesting depth; deeper functions fail.
    pub threshold: usize,
    /// Directory to scan.
    pub root: PathBuf,
    /// Directory basenames whose subtrees are skipped.
    pub ignore_dirs: BTreeSet<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            root: PathBuf::from("."),
            ignore_dirs: BTreeSet::new(),
        }
    }
}

impl ScanConfig {
    /// Default configuration scanning `root`.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_ignore_dirs<I, S>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore_dirs = dirs.into_iter().map(Into::into).collect();
        self
    }

    /// Parse a config from a YAML file. Missing keys keep their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse a config from YAML text.
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    /// Discover a config file in `dir`.
    pub fn discover<P: AsRef<Path>>(dir: P) -> Option<PathBuf> {
        DEFAULT_CONFIG_NAMES
            .iter()
            .map(|name| dir.as_ref().join(name))
            .find(|path| path.is_file())
    }

    /// Check if a directory basename is on the ignore-list. Exact match only.
    pub fn is_ignored_dir(&self, name: &str) -> bool {
        self.ignore_dirs.contains(name)
    }
}

/// Parse a threshold argument.
///
/// An empty argument returns None silently. Anything that is not a
/// non-negative integer is logged and also returns None.
pub fn parse_threshold(raw: &str) -> Option<usize> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.parse::<usize>() {
        Ok(threshold) => Some(threshold),
        Err(e) => {
            warn!(value = raw, error = %e, "invalid threshold, keeping configured value");
            None
        }
    }
}

/// Parse a JSON array of directory names.
///
/// Malformed input is logged and yields an empty set.
pub fn parse_ignore_list(raw: &str) -> BTreeSet<String> {
    if raw.trim().is_empty() {
        return BTreeSet::new();
    }
    match serde_json::from_str::<Vec<String>>(raw) {
        Ok(dirs) => dirs.into_iter().filter(|d| !d.is_empty()).collect(),
        Err(e) => {
            warn!(value = raw, error = %e, "invalid ignore-list, expected a JSON array of strings");
            BTreeSet::new()
        }
    }
}
