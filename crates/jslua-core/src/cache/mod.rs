//! Content-addressed memoization of whole transpilation results.
//!
//! The cache is a pure optimization, never a correctness dependency: any
//! failure in this layer degrades to "recompute, skip cache".

mod error;
mod key;
mod store;

pub use error::{CacheError, Result};
pub use key::{cache_key, CacheKey};
pub use store::{CacheEntry, Stats, TranspilationCache};
