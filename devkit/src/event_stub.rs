/*!
Recording event sink for development without a broker

Stores every emitted event so tests can assert on alert notifications, and
can simulate an unreachable transport.
*/

use clientstatus_core::{EventError, EventSink};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedEvent {
    pub name: String,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct RecordingEvents {
    emitted: Arc<Mutex<Vec<RecordedEvent>>>,
    failing: Arc<AtomicBool>,
}

impl RecordingEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject every emit while `failing` is set
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn events(&self) -> Vec<RecordedEvent> {
        self.emitted.lock().clone()
    }

    pub fn names(&self) -> Vec<String> {
        self.emitted.lock().iter().map(|e| e.name.clone()).collect()
    }

    pub fn find_by_name(&self, name: &str) -> Vec<RecordedEvent> {
        self.emitted
            .lock()
            .iter()
            .filter(|e| e.name == name)
            .cloned()
            .collect()
    }

    pub fn clear(&self) {
        self.emitted.lock().clear();
    }
}

impl EventSink for RecordingEvents {
    async fn emit(&self, name: &str, message: &str) -> Result<(), EventError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(EventError::new(name, "mock transport unavailable"));
        }

        self.emitted.lock().push(RecordedEvent {
            name: name.to_string(),
            message: message.to_string(),
        });
        tracing::info!("[MOCK] Emitted {}: {}", name, message);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_records_emitted_events() {
        let events = RecordingEvents::new();
        events.emit("no_clients_connected", "nobody home").await.unwrap();
        events.emit("clients_connected", "welcome back").await.unwrap();

        assert_eq!(events.names(), vec!["no_clients_connected", "clients_connected"]);
        assert_eq!(events.find_by_name("clients_connected")[0].message, "welcome back");

        events.clear();
        assert!(events.events().is_empty());
    }

    #[tokio::test]
    async fn test_failing_transport_records_nothing() {
        let events = RecordingEvents::new();
        events.set_failing(true);

        let err = events.emit("no_clients_connected", "x").await.unwrap_err();
        assert_eq!(err.event, "no_clients_connected");
        assert!(events.events().is_empty());
    }
}
