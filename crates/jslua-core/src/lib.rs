//! AST-to-Lua code generation with a content-addressed compilation cache.
//!
//! The backend half of a JS-to-Lua transpiler: it consumes a
//! JavaScript-shaped AST produced upstream and emits deterministic,
//! syntactically valid Lua, memoizing whole results keyed by a hash of
//! (source text, output-affecting options).

pub mod ast;
pub mod cache;
pub mod codegen;
pub mod config;
pub mod errors;
pub mod events;
pub mod formatter;
pub mod parser;
pub mod span;
pub mod transpiler;

pub use cache::{cache_key, CacheEntry, CacheKey, Stats, TranspilationCache};
pub use codegen::{CodeGenerator, SourceMap};
pub use config::{LuaTarget, TranspileOptions};
pub use errors::TranspileError;
pub use events::{CollectingEventSink, EventSink, NullEventSink, TranspileEvent};
pub use parser::Parser;
pub use span::Span;
pub use transpiler::Transpiler;
