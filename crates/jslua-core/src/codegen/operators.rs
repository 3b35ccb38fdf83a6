//! Pure JS-operator to Lua-operator resolution.
//!
//! Total over the supported set; anything else is a typed error so an
//! unrecognized token can never leak into the generated Lua unchanged.

use crate::ast::expression::{BinaryOp, UnaryOp, UpdateOp};
use crate::errors::{Result, TranspileError};
use crate::span::Span;

/// Resolve a binary or logical operator to its Lua token.
///
/// `+` is ambiguous in JS: it resolves to Lua concatenation `..` only when
/// either operand is syntactically a string literal, otherwise arithmetic
/// `+`. This is a static, syntax-only rule; two runtime-typed string
/// variables added together still resolve to `+`.
pub fn resolve_binary(
    op: BinaryOp,
    left_is_string: bool,
    right_is_string: bool,
    span: Span,
) -> Result<&'static str> {
    match op {
        BinaryOp::Add if left_is_string || right_is_string => Ok(".."),
        BinaryOp::Add => Ok("+"),
        BinaryOp::Subtract => Ok("-"),
        BinaryOp::Multiply => Ok("*"),
        BinaryOp::Divide => Ok("/"),
        BinaryOp::Modulo => Ok("%"),
        BinaryOp::Equal | BinaryOp::StrictEqual => Ok("=="),
        BinaryOp::NotEqual | BinaryOp::StrictNotEqual => Ok("~="),
        BinaryOp::LessThan => Ok("<"),
        BinaryOp::LessThanOrEqual => Ok("<="),
        BinaryOp::GreaterThan => Ok(">"),
        BinaryOp::GreaterThanOrEqual => Ok(">="),
        BinaryOp::And => Ok("and"),
        BinaryOp::Or => Ok("or"),
        BinaryOp::BitwiseAnd
        | BinaryOp::BitwiseOr
        | BinaryOp::BitwiseXor
        | BinaryOp::ShiftLeft
        | BinaryOp::ShiftRight
        | BinaryOp::UnsignedShiftRight
        | BinaryOp::In
        | BinaryOp::Instanceof => Err(TranspileError::UnsupportedOperator {
            token: op.js_token(),
            span,
        }),
    }
}

/// How a unary operator lowers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryLowering {
    /// Written before the operand (`not `, `-`).
    Prefix(&'static str),
    /// `typeof x` becomes `type(x)`.
    TypeOfCall,
    /// Unary `+` is a no-op and disappears.
    Dropped,
}

pub fn resolve_unary(op: UnaryOp, span: Span) -> Result<UnaryLowering> {
    match op {
        UnaryOp::Not => Ok(UnaryLowering::Prefix("not ")),
        UnaryOp::Negate => Ok(UnaryLowering::Prefix("-")),
        UnaryOp::Plus => Ok(UnaryLowering::Dropped),
        UnaryOp::TypeOf => Ok(UnaryLowering::TypeOfCall),
        UnaryOp::Void | UnaryOp::Delete | UnaryOp::BitwiseNot => {
            Err(TranspileError::UnsupportedOperator {
                token: op.js_token(),
                span,
            })
        }
    }
}

/// The arithmetic token behind `++` / `--`.
pub fn update_token(op: UpdateOp) -> &'static str {
    match op {
        UpdateOp::Increment => "+",
        UpdateOp::Decrement => "-",
    }
}
