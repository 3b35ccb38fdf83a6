use crate::span::Span;
use thiserror::Error;

/// Input errors surfaced to the caller. There is no best-effort fallback:
/// a shape the generator cannot lower is an error, never partial output.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TranspileError {
    #[error("unsupported AST node `{kind}` at {span}")]
    UnsupportedNode { kind: &'static str, span: Span },

    #[error("unsupported operator `{token}` at {span}")]
    UnsupportedOperator { token: &'static str, span: Span },

    #[error("malformed input: {reason}")]
    MalformedInput { reason: String },
}

pub type Result<T> = std::result::Result<T, TranspileError>;
