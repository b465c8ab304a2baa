use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use tracing::{error, info};
use umrs_shared::{AuditEvent, AuditEventKind, AuditSink};

/// Writes every event to the `umrs::audit` tracing target as one JSON line.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn record(&self, event: AuditEvent) {
        match event.to_json_line() {
            Ok(line) => info!(target: "umrs::audit", kind = event.kind.as_str(), "{line}"),
            Err(err) => error!(
                target: "umrs::audit",
                kind = event.kind.as_str(),
                "unserializable audit event: {err}"
            ),
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NullAuditSink;

impl AuditSink for NullAuditSink {
    fn record(&self, _event: AuditEvent) {}
}

pub const DEFAULT_MEMORY_CAPACITY: usize = 1024;

/// Keeps the most recent events in memory, in arrival order. Once full, the
/// oldest event is dropped for each new one.
#[derive(Debug)]
pub struct MemoryAuditSink {
    capacity: usize,
    events: Mutex<VecDeque<AuditEvent>>,
}

impl MemoryAuditSink {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MEMORY_CAPACITY)
    }

    /// A capacity of zero is treated as one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            events: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn events(&self) -> Vec<AuditEvent> {
        self.events
            .lock()
            .map(|events| events.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Up to `limit` events, newest first.
    pub fn recent(&self, limit: usize) -> Vec<AuditEvent> {
        self.events
            .lock()
            .map(|events| events.iter().rev().take(limit).cloned().collect())
            .unwrap_or_default()
    }

    pub fn kinds(&self) -> Vec<AuditEventKind> {
        self.events().into_iter().map(|event| event.kind).collect()
    }
}

impl Default for MemoryAuditSink {
    fn default() -> Self {
        Self::new()
    }
}

impl AuditSink for MemoryAuditSink {
    fn record(&self, event: AuditEvent) {
        if let Ok(mut events) = self.events.lock() {
            if events.len() == self.capacity {
                events.pop_front();
            }
            events.push_back(event);
        }
    }
}

/// Fans an event out to several sinks.
pub struct TeeAuditSink {
    sinks: Vec<Arc<dyn AuditSink>>,
}

impl TeeAuditSink {
    pub fn new(sinks: Vec<Arc<dyn AuditSink>>) -> Self {
        Self { sinks }
    }
}

impl AuditSink for TeeAuditSink {
    fn record(&self, event: AuditEvent) {
        for sink in &self.sinks {
            sink.record(event.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use umrs_shared::{AuditEvent, AuditEventKind, AuditSink};

    use super::MemoryAuditSink;

    fn action(n: usize) -> AuditEvent {
        AuditEvent::new(AuditEventKind::ActionInvoked).detail("n", n.to_string())
    }

    #[test]
    fn memory_sink_drops_oldest_when_full() {
        let sink = MemoryAuditSink::with_capacity(3);
        for n in 0..5 {
            sink.record(action(n));
        }

        let kept: Vec<String> = sink
            .events()
            .iter()
            .map(|event| event.details["n"].clone())
            .collect();
        assert_eq!(kept, ["2", "3", "4"]);
    }

    #[test]
    fn recent_is_newest_first_and_limited() {
        let sink = MemoryAuditSink::new();
        for n in 0..4 {
            sink.record(action(n));
        }

        let recent: Vec<String> = sink
            .recent(2)
            .iter()
            .map(|event| event.details["n"].clone())
            .collect();
        assert_eq!(recent, ["3", "2"]);
        assert_eq!(sink.recent(10).len(), 4);
    }

    #[test]
    fn zero_capacity_still_keeps_latest() {
        let sink = MemoryAuditSink::with_capacity(0);
        sink.record(action(7));
        sink.record(action(8));
        assert_eq!(sink.capacity(), 1);
        assert_eq!(sink.events()[0].details["n"], "8");
    }
}
