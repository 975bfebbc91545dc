//! Event publisher adapter for the pool ledger.
//!
//! Notifications are handed to the publisher strictly after the owning
//! state change has committed; implementations connect to the actual
//! delivery mechanism (bus, log, chain event stream).

use crate::events::LedgerEvent;

/// Publisher trait for ledger notifications.
pub trait LedgerEventPublisher: Send + Sync {
    /// Publishes one committed-state notification.
    fn publish(&self, event: LedgerEvent) -> Result<(), PublishError>;
}

/// Error type for publish operations.
#[derive(Debug, Clone)]
pub enum PublishError {
    /// The delivery mechanism is not connected.
    NotConnected,
    /// Failed to serialize the event.
    SerializationError(String),
    /// Internal error.
    Internal(String),
}

impl std::fmt::Display for PublishError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotConnected => write!(f, "Event sink not connected"),
            Self::SerializationError(e) => write!(f, "Serialization error: {}", e),
            Self::Internal(e) => write!(f, "Internal error: {}", e),
        }
    }
}

impl std::error::Error for PublishError {}

/// No-op publisher for wiring without a delivery mechanism.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpPublisher;

impl LedgerEventPublisher for NoOpPublisher {
    fn publish(&self, _event: LedgerEvent) -> Result<(), PublishError> {
        Ok(())
    }
}

/// Recording publisher for tests: keeps every published event in order.
#[derive(Debug, Default)]
pub struct RecordingPublisher {
    events: parking_lot::Mutex<Vec<LedgerEvent>>,
}

impl RecordingPublisher {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything published so far, in publish order.
    pub fn events(&self) -> Vec<LedgerEvent> {
        self.events.lock().clone()
    }

    /// Topics of everything published so far, in publish order.
    pub fn topics(&self) -> Vec<&'static str> {
        self.events.lock().iter().map(LedgerEvent::topic).collect()
    }
}

impl LedgerEventPublisher for RecordingPublisher {
    fn publish(&self, event: LedgerEvent) -> Result<(), PublishError> {
        self.events.lock().push(event);
        Ok(())
    }
}
