use crate::core::event::EventKind;
use crate::core::types::MachineId;
use log::{debug, error, info, warn};
use std::cell::RefCell;
use std::fmt;

/// Non-functional notices produced while wiring and dispatching events.
///
/// None of these change what `publish` returns; they go to whichever
/// [`DiagnosticSink`] the bus was built with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    SubscriberAdded {
        kind: EventKind,
        subscriber: String,
    },
    SubscriberRemoved {
        kind: EventKind,
        subscriber: String,
    },
    NoSubscribers {
        kind: EventKind,
    },
    /// An event named a machine the repository does not hold; it was dropped
    EntityNotFound {
        kind: EventKind,
        machine_id: MachineId,
    },
    /// A subscriber failed while the bus was isolating faults
    HandlerFault {
        kind: EventKind,
        subscriber: String,
        error: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::SubscriberAdded { kind, subscriber } => {
                write!(f, "Subscriber '{}' added for event type '{}'", subscriber, kind)
            }
            Diagnostic::SubscriberRemoved { kind, subscriber } => {
                write!(f, "Subscriber '{}' removed for event type '{}'", subscriber, kind)
            }
            Diagnostic::NoSubscribers { kind } => {
                write!(f, "No subscribers for event type '{}'", kind)
            }
            Diagnostic::EntityNotFound { kind, machine_id } => {
                write!(f, "Dropped '{}' event: no machine '{}'", kind, machine_id)
            }
            Diagnostic::HandlerFault {
                kind,
                subscriber,
                error,
            } => write!(
                f,
                "Subscriber '{}' failed on '{}' event: {}",
                subscriber, kind, error
            ),
        }
    }
}

/// Side channel receiving bus diagnostics
pub trait DiagnosticSink {
    fn record(&self, diagnostic: Diagnostic);
}

/// Default sink: forwards every diagnostic to the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDiagnostics;

impl DiagnosticSink for LogDiagnostics {
    fn record(&self, diagnostic: Diagnostic) {
        match &diagnostic {
            Diagnostic::SubscriberAdded { .. } | Diagnostic::SubscriberRemoved { .. } => {
                debug!("{}", diagnostic)
            }
            Diagnostic::NoSubscribers { .. } => info!("{}", diagnostic),
            Diagnostic::EntityNotFound { .. } => warn!("{}", diagnostic),
            Diagnostic::HandlerFault { .. } => error!("{}", diagnostic),
        }
    }
}

/// Sink that keeps every diagnostic in memory, for inspection after a run
#[derive(Debug, Default)]
pub struct RecordingDiagnostics {
    entries: RefCell<Vec<Diagnostic>>,
}

impl RecordingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<Diagnostic> {
        self.entries.borrow().clone()
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}

impl DiagnosticSink for RecordingDiagnostics {
    fn record(&self, diagnostic: Diagnostic) {
        self.entries.borrow_mut().push(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_sink_keeps_order() {
        let sink = RecordingDiagnostics::new();
        sink.record(Diagnostic::NoSubscribers {
            kind: EventKind::Refill,
        });
        sink.record(Diagnostic::EntityNotFound {
            kind: EventKind::Sale,
            machine_id: "999".to_string(),
        });

        let entries = sink.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(
            entries[0],
            Diagnostic::NoSubscribers {
                kind: EventKind::Refill
            }
        );

        sink.clear();
        assert!(sink.entries().is_empty());
    }

    #[test]
    fn test_display_messages() {
        let diagnostic = Diagnostic::NoSubscribers {
            kind: EventKind::LowStockWarning,
        };
        assert_eq!(
            diagnostic.to_string(),
            "No subscribers for event type 'lowStockWarning'"
        );
    }
}
