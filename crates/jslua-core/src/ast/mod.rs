//! The JavaScript-shaped AST this backend consumes.
//!
//! The tree is produced once by an upstream parser and treated as read-only
//! input. Node kinds form a closed set; anything the generator cannot lower
//! is rejected with a typed error rather than silently skipped.

pub mod expression;
pub mod pattern;
pub mod statement;

use crate::span::Span;

/// Wrapper for AST nodes with span information
#[derive(Debug, Clone)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Spanned { node, span }
    }
}

/// Identifier
pub type Ident = Spanned<String>;

/// Top-level program
#[derive(Debug, Clone)]
pub struct Program {
    pub statements: Vec<statement::Statement>,
    pub span: Span,
}

impl Program {
    pub fn new(statements: Vec<statement::Statement>, span: Span) -> Self {
        Program { statements, span }
    }
}
