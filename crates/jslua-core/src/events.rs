//! Advisory observability hooks.
//!
//! Sinks receive compile lifecycle events; they are never required for
//! correctness and a sink that drops everything is the default.

use std::sync::Mutex;

use crate::cache::Stats;
use crate::errors::TranspileError;

#[derive(Debug, Clone, PartialEq)]
pub enum TranspileEvent {
    CompileStart { filename: String },
    CompileComplete { filename: String, stats: Stats },
    CompileError { filename: String, message: String },
    CacheHit { filename: String },
}

/// Trait for receiving transpile events
/// This allows for dependency injection and testing with mock sinks
pub trait EventSink: Send + Sync {
    fn record(&self, event: TranspileEvent);

    fn compile_start(&self, filename: &str) {
        self.record(TranspileEvent::CompileStart {
            filename: filename.to_string(),
        });
    }

    fn compile_complete(&self, filename: &str, stats: &Stats) {
        self.record(TranspileEvent::CompileComplete {
            filename: filename.to_string(),
            stats: stats.clone(),
        });
    }

    fn compile_error(&self, filename: &str, error: &TranspileError) {
        self.record(TranspileEvent::CompileError {
            filename: filename.to_string(),
            message: error.to_string(),
        });
    }

    fn cache_hit(&self, filename: &str) {
        self.record(TranspileEvent::CacheHit {
            filename: filename.to_string(),
        });
    }
}

/// Default sink that drops every event.
#[derive(Debug, Default)]
pub struct NullEventSink;

impl EventSink for NullEventSink {
    fn record(&self, _event: TranspileEvent) {}
}

/// Collecting sink for testing
/// Collects all events without acting on them
#[derive(Debug, Default)]
pub struct CollectingEventSink {
    events: Mutex<Vec<TranspileEvent>>,
}

impl CollectingEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<TranspileEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn cache_hits(&self) -> usize {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|event| matches!(event, TranspileEvent::CacheHit { .. }))
            .count()
    }
}

impl EventSink for CollectingEventSink {
    fn record(&self, event: TranspileEvent) {
        self.events.lock().unwrap().push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::Span;

    #[test]
    fn test_collecting_sink() {
        let sink = CollectingEventSink::new();

        sink.compile_start("a.js");
        sink.cache_hit("a.js");
        sink.cache_hit("a.js");

        assert_eq!(sink.events().len(), 3);
        assert_eq!(sink.cache_hits(), 2);
    }

    #[test]
    fn test_error_event_carries_message() {
        let sink = CollectingEventSink::new();
        let error = TranspileError::UnsupportedNode {
            kind: "TryStatement",
            span: Span::default(),
        };

        sink.compile_error("a.js", &error);

        match &sink.events()[0] {
            TranspileEvent::CompileError { message, .. } => {
                assert!(message.contains("TryStatement"));
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
