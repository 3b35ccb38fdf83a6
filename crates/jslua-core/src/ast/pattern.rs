use super::Ident;
use crate::span::Span;

/// Binding patterns in parameter lists.
#[derive(Debug, Clone)]
pub enum Pattern {
    Identifier(Ident),
    Array(ArrayPattern),
    Rest(RestElement),
}

#[derive(Debug, Clone)]
pub struct ArrayPattern {
    pub elements: Vec<Pattern>,
    pub span: Span,
}

/// `...name`. Emitted as the bound name directly; no vararg spreading.
#[derive(Debug, Clone)]
pub struct RestElement {
    pub argument: Ident,
    pub span: Span,
}
