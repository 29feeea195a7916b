//! Directory scanning and pass/fail classification.

mod scanner;
mod types;

pub use scanner::{ScanError, Scanner};
pub use types::{Finding, IgnoredDir, ScanResult};
