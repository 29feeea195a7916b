//! Go frontend using tree-sitter.
//!
//! Extracts function and method declarations and lowers their bodies into
//! the statement model:
//! - `if_statement` becomes `Statement::If`
//! - `block` becomes `Statement::Block`
//! - `for_statement` becomes `Statement::Loop` (range form when it has a `range_clause`)
//! - anything else becomes `Statement::Other`, keeping nested statements

use std::collections::HashSet;
use std::path::Path;

use streaming_iterator::StreamingIterator;
use tree_sitter::{Language, Node, Parser, Query, QueryCursor};

use crate::frontend::{Frontend, FrontendError};
use crate::tree::{Body, FunctionDeclaration, LoopKind, SourceTree, Statement};

/// Tree-sitter query for extracting Go functions and methods.
const DECLARATION_QUERY: &str = r#"
; Function declarations
(function_declaration
  name: (identifier) @func_name
) @function

; Method declarations, keyed by bare name
(method_declaration
  name: (field_identifier) @method_name
) @method
"#;

/// Go language frontend.
pub struct GoFrontend {
    language: Language,
}

impl GoFrontend {
    /// Create a new Go frontend.
    pub fn new() -> Self {
        Self {
            language: tree_sitter_go::LANGUAGE.into(),
        }
    }

    /// Create a new parser for this call.
    fn create_parser(&self) -> Result<Parser, FrontendError> {
        let mut parser = Parser::new();
        parser.set_language(&self.language)?;
        Ok(parser)
    }

    /// Extract declarations from a parsed tree, in source order.
    fn extract_functions(
        &self,
        root: Node,
        source: &[u8],
    ) -> Result<Vec<FunctionDeclaration>, FrontendError> {
        let query = Query::new(&self.language, DECLARATION_QUERY)?;
        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(&query, root, source);

        let mut found: Vec<(usize, FunctionDeclaration)> = Vec::new();
        let mut seen_positions = HashSet::new();

        while let Some(m) = matches.next() {
            let mut name = String::new();
            let mut decl_node = None;

            for capture in m.captures {
                let capture_name = query.capture_names()[capture.index as usize];
                match capture_name {
                    "func_name" | "method_name" => {
                        name = node_text(capture.node, source).to_string();
                    }
                    "function" | "method" => {
                        decl_node = Some(capture.node);
                    }
                    _ => {}
                }
            }

            let node = match decl_node {
                Some(node) if !name.is_empty() => node,
                _ => continue,
            };
            if !seen_positions.insert(node.start_byte()) {
                continue;
            }

            let body = node.child_by_field_name("body").map(lower_block);
            found.push((node.start_byte(), FunctionDeclaration::new(&name, body)));
        }

        // Sort by position for deterministic output
        found.sort_by_key(|(start, _)| *start);

        Ok(found.into_iter().map(|(_, decl)| decl).collect())
    }
}

impl Default for GoFrontend {
    fn default() -> Self {
        Self::new()
    }
}

impl Frontend for GoFrontend {
    fn language_id(&self) -> &'static str {
        "go"
    }

    fn file_extensions(&self) -> &'static [&'static str] {
        &["go"]
    }

    fn parse(&self, path: &Path, source: &[u8]) -> Result<SourceTree, FrontendError> {
        let mut parser = self.create_parser()?;
        let tree = parser.parse(source, None).ok_or(FrontendError::Unparsed)?;
        let root = tree.root_node();

        if root.has_error() {
            let (line, column) = first_error(root)
                .map(|n| (n.start_position().row + 1, n.start_position().column + 1))
                .unwrap_or((1, 1));
            return Err(FrontendError::Syntax { line, column });
        }

        let mut cursor = root.walk();
        let has_package = root
            .named_children(&mut cursor)
            .any(|n| n.kind() == "package_clause");
        if !has_package {
            return Err(FrontendError::MissingPackage);
        }

        let functions = self.extract_functions(root, source)?;
        Ok(SourceTree::new(&path.to_string_lossy(), functions))
    }
}

fn node_text<'s>(node: Node, source: &'s [u8]) -> &'s str {
    node.utf8_text(source).unwrap_or("")
}

/// First ERROR or MISSING node in document order.
fn first_error(root: Node) -> Option<Node> {
    let mut node = root;
    loop {
        if node.is_error() || node.is_missing() {
            return Some(node);
        }
        let mut cursor = node.walk();
        let next = node
            .children(&mut cursor)
            .find(|c| c.has_error() || c.is_missing());
        node = next?;
    }
}

/// Lower the statements of a block, case clause or statement list.
fn lower_block(node: Node) -> Body {
    lower_children(node, &[])
}

/// Lower the named children of `node`, skipping nodes whose id is in `skip`.
fn lower_children(node: Node, skip: &[usize]) -> Body {
    let mut body = Vec::new();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if skip.contains(&child.id()) {
            continue;
        }
        if child.kind() == "statement_list" {
            body.extend(lower_block(child));
        } else if let Some(stmt) = lower_node(child) {
            body.push(stmt);
        }
    }
    body
}

fn is_structural(kind: &str) -> bool {
    matches!(kind, "if_statement" | "for_statement" | "block")
}

/// Lower a single node. Returns None for subtrees without any nested statement.
fn lower_node(node: Node) -> Option<Statement> {
    match node.kind() {
        "comment" => None,
        "if_statement" => Some(lower_if(node)),
        "for_statement" => Some(lower_for(node)),
        "block" => Some(Statement::block(lower_block(node))),
        kind => {
            let nested = lower_nested(node);
            if nested.is_empty() {
                None
            } else {
                Some(Statement::other(kind, nested))
            }
        }
    }
}

/// Lower the outermost `if`, `for` and block nodes below `node`, in source order.
///
/// Everything in between (switch cases, expressions, function literal
/// signatures) is walked with a cursor, so expression depth does not grow
/// the call stack. Only statement nesting recurses.
fn lower_nested(node: Node) -> Body {
    let mut body = Vec::new();
    let mut cursor = node.walk();
    if !cursor.goto_first_child() {
        return body;
    }

    loop {
        let current = cursor.node();
        let descend = if is_structural(current.kind()) {
            body.extend(lower_node(current));
            false
        } else {
            current.kind() != "comment"
        };

        if descend && cursor.goto_first_child() {
            continue;
        }
        while !cursor.goto_next_sibling() {
            if !cursor.goto_parent() || cursor.node().id() == node.id() {
                return body;
            }
        }
    }
}

fn lower_if(node: Node) -> Statement {
    let consequence = node.child_by_field_name("consequence");
    let alternative = node.child_by_field_name("alternative");
    let skip: Vec<usize> = consequence
        .iter()
        .chain(alternative.iter())
        .map(|n| n.id())
        .collect();

    Statement::If {
        header: lower_children(node, &skip),
        body: consequence.map(lower_block).unwrap_or_default(),
        alternative: alternative.and_then(lower_node).map(Box::new),
    }
}

fn lower_for(node: Node) -> Statement {
    let body = node.child_by_field_name("body");
    let skip: Vec<usize> = body.iter().map(|n| n.id()).collect();

    let mut cursor = node.walk();
    let is_range = node
        .named_children(&mut cursor)
        .any(|n| n.kind() == "range_clause");
    let kind = if is_range { LoopKind::Range } else { LoopKind::For };

    Statement::Loop {
        kind,
        header: lower_children(node, &skip),
        body: body.map(lower_block).unwrap_or_default(),
    }
}
