use crate::ast::Program;
use crate::errors::Result;

/// Produces the AST this backend consumes.
///
/// Lexing and parsing live upstream; the core never tokenizes JS itself.
/// Implementations report failures as `MalformedInput`.
pub trait Parser: Send + Sync {
    fn parse(&self, source: &str, filename: &str) -> Result<Program>;
}
