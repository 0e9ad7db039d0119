use std::sync::Mutex;

use overflow_types::{BoardEvent, EventEnvelope};

/// Receives every state change the session makes. Implementations can write
/// to tracing, keep events in memory, or discard them.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: BoardEvent);
}

/// Sink that logs each event as JSON through the `tracing` crate.
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: BoardEvent) {
        let kind = event.kind();
        let target = event.target().map(|t| t.to_string());
        match EventEnvelope::now(event).to_json() {
            Ok(json) => tracing::info!(kind, target = target.as_deref(), "{}", json),
            Err(e) => tracing::warn!(kind, "failed to encode board event: {}", e),
        }
    }
}

/// No-op sink that discards all events.
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: BoardEvent) {}
}

/// Sink that keeps events in order of emission.
#[derive(Default)]
pub struct MemorySink {
    events: Mutex<Vec<BoardEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<BoardEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }
}

impl EventSink for MemorySink {
    fn emit(&self, event: BoardEvent) {
        let mut events = self
            .events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        events.push(event);
    }
}
