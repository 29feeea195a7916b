//! Directory scanner that runs the loop depth analysis over a tree of files.

use std::path::PathBuf;

use thiserror::Error;
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::analysis::{analyze_tree, FunctionStats};
use crate::config::ScanConfig;
use crate::frontend::{Frontend, FrontendError};

use super::{IgnoredDir, ScanResult};

/// Errors that abort a scan.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("root path {} does not exist", .0.display())]
    NotFound(PathBuf),
    #[error("walking directory: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Walks a directory tree and classifies every function it finds.
///
/// Files are visited in file-name order so repeated scans of the same tree
/// report in the same order.
pub struct Scanner<'f> {
    config: ScanConfig,
    frontend: &'f dyn Frontend,
}

impl<'f> Scanner<'f> {
    /// Create a new scanner.
    pub fn new(config: ScanConfig, frontend: &'f dyn Frontend) -> Self {
        Self { config, frontend }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Scan the configured root.
    ///
    /// Unparsable files become failure entries. Only a failure of the
    /// walk itself is returned as an error.
    pub fn scan(&self) -> Result<ScanResult, ScanError> {
        let root = &self.config.root;
        if !root.exists() {
            return Err(ScanError::NotFound(root.clone()));
        }

        let mut ignored = Vec::new();

        let walker = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| {
                if !e.file_type().is_dir() {
                    return true;
                }
                let name = e.file_name().to_string_lossy();
                if self.config.is_ignored_dir(&name) {
                    info!(dir = %name, path = %e.path().display(), "ignoring directory");
                    ignored.push(IgnoredDir {
                        name: name.to_string(),
                        path: e.path().display().to_string(),
                    });
                    return false;
                }
                true
            });

        let mut result = ScanResult::new(self.config.threshold);
        for entry in walker {
            let entry = entry?;
            if entry.file_type().is_dir() || !self.frontend.handles_file(entry.path()) {
                continue;
            }
            let path = entry.path();
            let outcome = self.frontend.parse_file(path).map(|tree| analyze_tree(&tree));
            record_outcome(&mut result, path.display().to_string(), outcome);
        }

        result.ignored_dirs = ignored;
        Ok(result)
    }
}

/// Record the functions of one file, or its parse error.
fn record_outcome(
    result: &mut ScanResult,
    file: String,
    outcome: Result<FunctionStats, FrontendError>,
) {
    result.files_scanned += 1;

    match outcome {
        Ok(stats) => {
            for (name, depth) in stats {
                result.record_function(name, file.clone(), depth);
            }
        }
        Err(e) => {
            warn!(file = %file, error = %e, "failed to parse file");
            result.record_parse_error(file, e.to_string());
        }
    }
}
