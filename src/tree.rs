//! Syntax-tree model consumed by the loop depth analysis.
//!
//! A language frontend lowers its concrete syntax tree into these types.
//! Only the statement shapes that matter for loop nesting get their own
//! variant; everything else is kept as [`Statement::Other`] together with
//! whatever nested structure it still carries, so loops buried under a
//! `switch` case or a function literal are not lost.

/// An ordered sequence of statements.
pub type Body = Vec<Statement>;

/// The two loop forms a frontend reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoopKind {
    /// Counted or condition loop (`for i := 0; i < n; i++ {}`, `for {}`).
    For,
    /// Iteration loop (`for k, v := range m {}`).
    Range,
}

/// A statement, reduced to what loop counting needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// Conditional. `header` holds structure found in the initializer and
    /// condition (function literals), `alternative` is the `else` branch.
    If {
        header: Body,
        body: Body,
        alternative: Option<Box<Statement>>,
    },
    /// Bare nested block.
    Block { body: Body },
    /// Loop. `header` holds structure found in the loop clauses, which sits
    /// beside the loop rather than inside it.
    Loop {
        kind: LoopKind,
        header: Body,
        body: Body,
    },
    /// Any other node. `kind` is the frontend's node name, `nested` the
    /// statements reachable below it.
    Other { kind: String, nested: Body },
}

impl Statement {
    pub fn block(body: Body) -> Self {
        Statement::Block { body }
    }

    /// An opaque node of the given kind with nested statements.
    pub fn other(kind: &str, nested: Body) -> Self {
        Statement::Other {
            kind: kind.to_string(),
            nested,
        }
    }
}

#[cfg(test)]
impl Statement {
    /// A counted loop around `body`.
    pub(crate) fn for_loop(body: Body) -> Self {
        Statement::Loop {
            kind: LoopKind::For,
            header: Vec::new(),
            body,
        }
    }

    /// A range loop around `body`.
    pub(crate) fn range_loop(body: Body) -> Self {
        Statement::Loop {
            kind: LoopKind::Range,
            header: Vec::new(),
            body,
        }
    }

    /// A conditional without an `else` branch.
    pub(crate) fn if_then(body: Body) -> Self {
        Statement::If {
            header: Vec::new(),
            body,
            alternative: None,
        }
    }

    /// A conditional with an `else` branch.
    pub(crate) fn if_else(body: Body, alternative: Statement) -> Self {
        Statement::If {
            header: Vec::new(),
            body,
            alternative: Some(Box::new(alternative)),
        }
    }
}

/// A function or method declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDeclaration {
    /// The function name, without receiver.
    pub name: String,
    /// The body, absent for external declarations.
    pub body: Option<Body>,
}

impl FunctionDeclaration {
    pub fn new(name: &str, body: Option<Body>) -> Self {
        Self {
            name: name.to_string(),
            body,
        }
    }
}

/// Parsed form of a single source file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SourceTree {
    /// The file path (for reporting).
    pub path: String,
    /// Declarations in source order.
    pub functions: Vec<FunctionDeclaration>,
}

impl SourceTree {
    pub fn new(path: &str, functions: Vec<FunctionDeclaration>) -> Self {
        Self {
            path: path.to_string(),
            functions,
        }
    }
}
