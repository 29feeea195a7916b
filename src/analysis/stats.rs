//! Per-file function statistics.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::debug;

use crate::frontend::{Frontend, FrontendError};
use crate::tree::SourceTree;

use super::function_depth;

/// Loop depth per function name.
///
/// Names are not qualified by receiver, so two methods with the same name
/// in one file share an entry and the later declaration wins.
pub type FunctionStats = BTreeMap<String, usize>;

/// Compute the loop depth of every function and method in a parsed file.
pub fn analyze_tree(tree: &SourceTree) -> FunctionStats {
    let mut stats = FunctionStats::new();
    for function in &tree.functions {
        stats.insert(function.name.clone(), function_depth(function));
    }
    debug!(file = %tree.path, functions = stats.len(), "analyzed file");
    stats
}

/// Parse a file with the given frontend and compute its statistics.
pub fn analyze_file<P: AsRef<Path>>(
    frontend: &dyn Frontend,
    path: P,
) -> Result<FunctionStats, FrontendError> {
    let tree = frontend.parse_file(path.as_ref())?;
    Ok(analyze_tree(&tree))
}

/// Whether a depth fails the gate. Equal to the threshold still passes.
pub fn exceeds_threshold(depth: usize, threshold: usize) -> bool {
    depth > threshold
}
