//! Emisión de eventos de observabilidad (fire-and-forget).

use std::cell::RefCell;

use chrono::{DateTime, Utc};
use log::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventSeverity {
    Normal,
    Warning,
}

#[derive(Debug, Clone)]
pub struct RecordedEvent {
    pub object: String,
    pub severity: EventSeverity,
    pub reason: String,
    pub message: String,
    pub ts: DateTime<Utc>,
}

/// Recorder de eventos adjuntos a un recurso. Fire-and-forget: los fallos
/// del backend de eventos se ignoran, nunca afectan la pasada.
pub trait EventRecorder {
    fn event(&self, object: &str, severity: EventSeverity, reason: &str, message: &str);
}

/// Recorder que delega en el log del proceso.
#[derive(Default)]
pub struct LogRecorder;

impl EventRecorder for LogRecorder {
    fn event(&self, object: &str, severity: EventSeverity, reason: &str, message: &str) {
        match severity {
            EventSeverity::Normal => info!("event {object} {reason}: {message}"),
            EventSeverity::Warning => warn!("event {object} {reason}: {message}"),
        }
    }
}

/// Recorder in-memory para tests y demos.
#[derive(Default)]
pub struct MemoryRecorder {
    pub events: RefCell<Vec<RecordedEvent>>,
}

impl MemoryRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warnings(&self) -> Vec<RecordedEvent> {
        self.events
            .borrow()
            .iter()
            .filter(|e| e.severity == EventSeverity::Warning)
            .cloned()
            .collect()
    }
}

impl EventRecorder for MemoryRecorder {
    fn event(&self, object: &str, severity: EventSeverity, reason: &str, message: &str) {
        self.events.borrow_mut().push(RecordedEvent { object: object.to_string(),
                                                      severity,
                                                      reason: reason.to_string(),
                                                      message: message.to_string(),
                                                      ts: Utc::now() });
    }
}
