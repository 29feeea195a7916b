//! Loop nesting depth of a function body.
//!
//! The depth of a body is the number of loops on its deepest
//! loop-within-loop chain. Conditionals, blocks and every other container
//! are transparent: they add nothing themselves, but loops found anywhere
//! beneath them still count, and a loop nested under them inside another
//! loop still nests.
//!
//! Sibling loops resolve to the maximum of their depths, never the sum.

use crate::tree::{FunctionDeclaration, Statement};

/// Maximum loop nesting depth of a body. An empty body has depth 0.
pub fn body_depth(body: &[Statement]) -> usize {
    body.iter().map(statement_depth).max().unwrap_or(0)
}

/// Maximum loop nesting depth reachable from a single statement.
pub fn statement_depth(statement: &Statement) -> usize {
    match statement {
        Statement::Loop { header, body, .. } => {
            // Header clauses run outside the loop, so they stay at this level.
            (body_depth(body) + 1).max(body_depth(header))
        }
        Statement::If {
            header,
            body,
            alternative,
        } => {
            let branch = alternative.as_deref().map_or(0, statement_depth);
            body_depth(header).max(body_depth(body)).max(branch)
        }
        Statement::Block { body } => body_depth(body),
        Statement::Other { nested, .. } => body_depth(nested),
    }
}

/// Loop nesting depth of a function. Declarations without a body have depth 0.
pub fn function_depth(function: &FunctionDeclaration) -> usize {
    function.body.as_deref().map_or(0, body_depth)
}
