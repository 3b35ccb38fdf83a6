use super::expression::Expression;
use super::pattern::Pattern;
use super::Ident;
use crate::span::Span;

#[derive(Debug, Clone)]
pub struct Statement {
    pub kind: StatementKind,
    pub span: Span,
}

impl Statement {
    pub fn new(kind: StatementKind, span: Span) -> Self {
        Statement { kind, span }
    }
}

#[derive(Debug, Clone)]
pub enum StatementKind {
    Expression(Expression),
    Variable(VariableDeclaration),
    Function(FunctionDeclaration),
    Return(Option<Expression>),
    If(IfStatement),
    While(WhileStatement),
    For(Box<ForStatement>),
    Block(Block),
    Break,
    Empty,
    // Handed over by upstream parsers but not lowered by this backend.
    Try(Box<TryStatement>),
    Throw(Expression),
}

#[derive(Debug, Clone)]
pub struct VariableDeclaration {
    pub kind: VariableKind,
    pub declarators: Vec<VariableDeclarator>,
    pub span: Span,
}

/// `var` / `let` / `const`. All three lower to `local`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableKind {
    Var,
    Let,
    Const,
}

#[derive(Debug, Clone)]
pub struct VariableDeclarator {
    pub id: Ident,
    pub init: Option<Expression>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct FunctionDeclaration {
    pub name: Ident,
    pub parameters: Vec<Pattern>,
    pub body: Block,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct IfStatement {
    pub test: Expression,
    pub consequent: Box<Statement>,
    pub alternate: Option<Box<Statement>>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct WhileStatement {
    pub test: Expression,
    pub body: Box<Statement>,
    pub span: Span,
}

/// C-style `for`. Lua has no direct equivalent; the generator lowers it to a
/// preceding init statement plus a `while` loop.
#[derive(Debug, Clone)]
pub struct ForStatement {
    pub init: Option<ForInit>,
    pub test: Option<Expression>,
    pub update: Option<Expression>,
    pub body: Box<Statement>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum ForInit {
    Declaration(VariableDeclaration),
    Expression(Expression),
}

#[derive(Debug, Clone)]
pub struct Block {
    pub statements: Vec<Statement>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct TryStatement {
    pub block: Block,
    pub handler: Option<Block>,
    pub finalizer: Option<Block>,
    pub span: Span,
}
