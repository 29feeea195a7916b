//! Loop nesting analysis.
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌───────────────┐
//! │ SourceTree  │────▶│ analyze_tree │────▶│ FunctionStats │
//! └─────────────┘     └──────────────┘     │ (name, depth) │
//!                            │             └───────────────┘
//!                            ▼
//!                     ┌──────────────┐
//!                     │ body_depth   │
//!                     └──────────────┘
//! ```

mod depth;
mod stats;

pub use depth::{body_depth, function_depth, statement_depth};
pub use stats::{analyze_file, analyze_tree, exceeds_threshold, FunctionStats};
