//! Language frontends that turn source files into [`SourceTree`]s.
//!
//! A frontend owns everything language-specific: which files it accepts,
//! how to parse them and how to lower the concrete syntax tree into the
//! statement model used by the analysis.
//!
//! # Adding a New Language
//!
//! 1. Create a new module in `src/frontend/` (e.g., `rust_lang.rs`)
//! 2. Implement the `Frontend` trait
//! 3. Register it in `frontend_for_extension`
//!
//! See `go.rs` for a reference implementation.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::tree::SourceTree;

#[cfg(feature = "tree-sitter")]
mod go;

#[cfg(feature = "tree-sitter")]
pub use go::GoFrontend;

/// Errors raised while turning one file into a [`SourceTree`].
///
/// All of them are local to a single file; the scanner records them and
/// moves on.
#[derive(Error, Debug)]
pub enum FrontendError {
    #[error("reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("syntax error at line {line}, column {column}")]
    Syntax { line: usize, column: usize },
    #[error("expected 'package' clause")]
    MissingPackage,
    #[error("parser produced no tree")]
    Unparsed,
    #[cfg(feature = "tree-sitter")]
    #[error("loading grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),
    #[cfg(feature = "tree-sitter")]
    #[error("invalid query: {0}")]
    Query(#[from] tree_sitter::QueryError),
}

/// Language-specific frontend.
///
/// # Thread Safety
///
/// `tree_sitter::Parser` is not Sync, so implementations create a parser
/// per call.
pub trait Frontend: Send + Sync {
    /// Returns the language identifier (e.g., "go").
    fn language_id(&self) -> &'static str;

    /// Returns file extensions this frontend handles (without dot).
    fn file_extensions(&self) -> &'static [&'static str];

    /// Parse source code into a tree.
    ///
    /// Sources with syntax errors are rejected rather than partially lowered.
    fn parse(&self, path: &Path, source: &[u8]) -> Result<SourceTree, FrontendError>;

    /// Read and parse a file.
    fn parse_file(&self, path: &Path) -> Result<SourceTree, FrontendError> {
        let source = fs::read(path).map_err(|source| FrontendError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.parse(path, &source)
    }

    /// Check if the file name ends in one of the handled suffixes.
    fn handles_file(&self, path: &Path) -> bool {
        let name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name,
            None => return false,
        };
        self.file_extensions().iter().any(|ext| {
            name.len() > ext.len()
                && name.ends_with(ext)
                && name.as_bytes()[name.len() - ext.len() - 1] == b'.'
        })
    }
}

#[cfg(feature = "tree-sitter")]
static GO_FRONTEND: once_cell::sync::OnceCell<GoFrontend> = once_cell::sync::OnceCell::new();

/// Get a frontend for the given file extension (without dot).
///
/// Returns None if no frontend handles the extension.
pub fn frontend_for_extension(ext: &str) -> Option<&'static dyn Frontend> {
    match ext {
        #[cfg(feature = "tree-sitter")]
        "go" => Some(GO_FRONTEND.get_or_init(GoFrontend::new) as &'static dyn Frontend),
        _ => None,
    }
}

/// The frontend used when none is requested explicitly.
pub fn default_frontend() -> Option<&'static dyn Frontend> {
    frontend_for_extension("go")
}
