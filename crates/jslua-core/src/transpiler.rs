//! The memoized transpile pipeline: parse, generate, normalize, cache.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::cache::{cache_key, CacheEntry, Stats, TranspilationCache};
use crate::codegen::CodeGenerator;
use crate::config::TranspileOptions;
use crate::errors::Result;
use crate::events::{EventSink, NullEventSink};
use crate::formatter;
use crate::parser::Parser;

pub struct Transpiler {
    parser: Arc<dyn Parser>,
    cache: TranspilationCache,
    events: Arc<dyn EventSink>,
}

impl Transpiler {
    pub fn new(parser: Arc<dyn Parser>) -> Self {
        Self {
            parser,
            cache: TranspilationCache::new(),
            events: Arc::new(NullEventSink),
        }
    }

    pub fn with_events(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = events;
        self
    }

    pub fn cache(&self) -> &TranspilationCache {
        &self.cache
    }

    /// Transpile one JS source to Lua, serving from the cache when the same
    /// (source, options) pair has been compiled before. Byte-identical output
    /// whether cached or freshly generated.
    pub fn transpile(
        &self,
        source: &str,
        filename: &str,
        options: &TranspileOptions,
    ) -> Result<CacheEntry> {
        self.events.compile_start(filename);

        // A key failure only costs recomputation, never correctness.
        let key = match cache_key(source, options) {
            Ok(key) => Some(key),
            Err(e) => {
                warn!("cache key unavailable, recomputing: {e}");
                None
            }
        };

        if let Some(key) = &key {
            if let Some(entry) = self.cache.get(key) {
                debug!(%key, "cache hit");
                self.events.cache_hit(filename);
                return Ok(entry);
            }
            debug!(%key, "cache miss");
        }

        let entry = match self.compile(source, filename, options) {
            Ok(entry) => entry,
            Err(e) => {
                self.events.compile_error(filename, &e);
                return Err(e);
            }
        };

        if let Some(key) = key {
            self.cache.set(key, entry.clone());
        }
        self.events.compile_complete(filename, &entry.stats);
        Ok(entry)
    }

    fn compile(
        &self,
        source: &str,
        filename: &str,
        options: &TranspileOptions,
    ) -> Result<CacheEntry> {
        let program = self.parser.parse(source, filename)?;

        let mut generator = CodeGenerator::new();
        if options.source_map {
            generator = generator.with_source_map(filename.to_string());
        }
        let generated = generator.generate(&program)?;
        let source_map = generator.take_source_map();

        let (code, optimizations) = if options.optimize {
            formatter::normalize(&generated)
        } else {
            (generated, 0)
        };

        let stats = Stats {
            original_size: source.len(),
            transpiled: code.len(),
            optimizations,
            filename: filename.to_string(),
        };

        Ok(CacheEntry {
            code,
            source_map,
            stats,
        })
    }
}
