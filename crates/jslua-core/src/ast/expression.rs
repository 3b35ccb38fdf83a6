use super::pattern::Pattern;
use super::Ident;
use crate::span::Span;

use super::statement::Block;

#[derive(Debug, Clone)]
pub struct Expression {
    pub kind: ExpressionKind,
    pub span: Span,
}

impl Expression {
    pub fn new(kind: ExpressionKind, span: Span) -> Self {
        Expression { kind, span }
    }

    /// Whether this expression is syntactically a string literal.
    ///
    /// Drives the `+` resolution rule: concatenation is only chosen when an
    /// operand is a literal string at generation time. No type inference.
    pub fn is_string_literal(&self) -> bool {
        matches!(
            self.kind,
            ExpressionKind::Literal(Literal {
                value: LiteralValue::String(_),
                ..
            })
        )
    }
}

#[derive(Debug, Clone)]
pub enum ExpressionKind {
    Identifier(String),
    Literal(Literal),
    Binary(BinaryOp, Box<Expression>, Box<Expression>),
    Unary(UnaryOp, Box<Expression>),
    Update {
        op: UpdateOp,
        argument: Box<Expression>,
        prefix: bool,
    },
    Assignment(Box<Expression>, Box<Expression>),
    Call(Box<Expression>, Vec<Expression>),
    Member {
        object: Box<Expression>,
        property: Box<Expression>,
        computed: bool,
    },
    Object(Vec<ObjectProperty>),
    Arrow(ArrowFunction),
}

/// A literal together with the raw text the parser saw, so numbers round-trip
/// without reformatting.
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    pub value: LiteralValue,
    pub raw: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
}

impl Literal {
    pub fn null() -> Self {
        Literal {
            value: LiteralValue::Null,
            raw: "null".to_string(),
        }
    }

    pub fn boolean(value: bool) -> Self {
        Literal {
            value: LiteralValue::Boolean(value),
            raw: if value { "true" } else { "false" }.to_string(),
        }
    }

    pub fn number(value: f64, raw: impl Into<String>) -> Self {
        Literal {
            value: LiteralValue::Number(value),
            raw: raw.into(),
        }
    }

    pub fn string(value: impl Into<String>) -> Self {
        let value = value.into();
        // Lua short strings cannot span lines, so every control character
        // must be escaped, not just the quote and backslash.
        let mut raw = String::with_capacity(value.len() + 2);
        raw.push('"');
        for ch in value.chars() {
            match ch {
                '\\' => raw.push_str("\\\\"),
                '"' => raw.push_str("\\\""),
                '\n' => raw.push_str("\\n"),
                '\r' => raw.push_str("\\r"),
                '\t' => raw.push_str("\\t"),
                c if c.is_control() => raw.push_str(&format!("\\{}", c as u32)),
                c => raw.push(c),
            }
        }
        raw.push('"');
        Literal {
            value: LiteralValue::String(value),
            raw,
        }
    }
}

/// JS binary and logical operator tokens.
///
/// Covers everything the upstream parser can hand over, including operators
/// this backend refuses to lower (bitwise family, `in`, `instanceof`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Equal,
    StrictEqual,
    NotEqual,
    StrictNotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    And,
    Or,
    BitwiseAnd,
    BitwiseOr,
    BitwiseXor,
    ShiftLeft,
    ShiftRight,
    UnsignedShiftRight,
    In,
    Instanceof,
}

impl BinaryOp {
    /// The JS source token, used in diagnostics.
    pub fn js_token(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Modulo => "%",
            BinaryOp::Equal => "==",
            BinaryOp::StrictEqual => "===",
            BinaryOp::NotEqual => "!=",
            BinaryOp::StrictNotEqual => "!==",
            BinaryOp::LessThan => "<",
            BinaryOp::LessThanOrEqual => "<=",
            BinaryOp::GreaterThan => ">",
            BinaryOp::GreaterThanOrEqual => ">=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
            BinaryOp::BitwiseAnd => "&",
            BinaryOp::BitwiseOr => "|",
            BinaryOp::BitwiseXor => "^",
            BinaryOp::ShiftLeft => "<<",
            BinaryOp::ShiftRight => ">>",
            BinaryOp::UnsignedShiftRight => ">>>",
            BinaryOp::In => "in",
            BinaryOp::Instanceof => "instanceof",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
    Negate,
    Plus,
    TypeOf,
    Void,
    Delete,
    BitwiseNot,
}

impl UnaryOp {
    pub fn js_token(self) -> &'static str {
        match self {
            UnaryOp::Not => "!",
            UnaryOp::Negate => "-",
            UnaryOp::Plus => "+",
            UnaryOp::TypeOf => "typeof",
            UnaryOp::Void => "void",
            UnaryOp::Delete => "delete",
            UnaryOp::BitwiseNot => "~",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOp {
    Increment,
    Decrement,
}

#[derive(Debug, Clone)]
pub struct ObjectProperty {
    pub key: Ident,
    pub value: Expression,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ArrowFunction {
    pub parameters: Vec<Pattern>,
    pub body: ArrowBody,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum ArrowBody {
    Expression(Box<Expression>),
    Block(Block),
}
