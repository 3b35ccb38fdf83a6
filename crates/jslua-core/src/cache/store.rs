use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::codegen::SourceMap;

use super::CacheKey;

/// Result of one whole-source transpilation, as stored in the cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub code: String,
    pub source_map: Option<SourceMap>,
    pub stats: Stats,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    /// Bytes of JS source handed in.
    pub original_size: usize,
    /// Bytes of Lua produced.
    pub transpiled: usize,
    /// Edits made by the whitespace normalization pass.
    pub optimizations: usize,
    pub filename: String,
}

/// In-memory, unbounded, last-write-wins store. The interior mutex makes
/// `get`/`set` safe from concurrent compilations sharing one cache.
#[derive(Debug, Default)]
pub struct TranspilationCache {
    entries: Mutex<FxHashMap<CacheKey, CacheEntry>>,
}

impl TranspilationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock the map, recovering from poison. Every mutation under the lock
    /// is a single map operation, so a panic elsewhere cannot leave a torn
    /// entry; the cache keeps serving later compilations.
    fn lock(&self) -> MutexGuard<'_, FxHashMap<CacheKey, CacheEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get(&self, key: &CacheKey) -> Option<CacheEntry> {
        self.lock().get(key).cloned()
    }

    /// Unconditional overwrite.
    pub fn set(&self, key: CacheKey, entry: CacheEntry) {
        self.lock().insert(key, entry);
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
