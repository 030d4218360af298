use super::config::{BusConfig, DispatchPolicy};
use super::diagnostics::{Diagnostic, DiagnosticSink, LogDiagnostics};
use super::errors::DispatchError;
use super::subscriber::SubscriberRef;
use crate::core::event::{Event, EventKind};
use log::trace;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

/// Synchronous publish/subscribe bus keyed by [`EventKind`].
///
/// `publish` calls every subscriber of the event's kind in registration
/// order, on the caller's stack. Subscribers may publish again from inside
/// `handle`; the nested dispatch finishes before the outer handler resumes.
/// The registry is snapshotted at the start of each dispatch, so changes
/// made by a handler only apply to later publishes.
pub struct PubSub {
    subscriptions: RefCell<HashMap<EventKind, Vec<SubscriberRef>>>,
    diagnostics: Rc<dyn DiagnosticSink>,
    config: BusConfig,
    depth: Cell<usize>,
}

/// Restores the nesting counter when a dispatch level unwinds
struct DepthGuard<'a>(&'a Cell<usize>);

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        self.0.set(self.0.get().saturating_sub(1));
    }
}

impl PubSub {
    /// Create a bus with default config, logging diagnostics through `log`
    pub fn new() -> Self {
        Self::with_config(BusConfig::default())
    }

    pub fn with_config(config: BusConfig) -> Self {
        Self {
            subscriptions: RefCell::new(HashMap::new()),
            diagnostics: Rc::new(LogDiagnostics),
            config,
            depth: Cell::new(0),
        }
    }

    /// Replace the diagnostic sink
    pub fn with_diagnostics(mut self, diagnostics: Rc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn config(&self) -> &BusConfig {
        &self.config
    }

    /// Register `subscriber` for all future publishes of `kind`.
    ///
    /// Registering the same subscriber twice makes it run twice per event.
    pub fn subscribe(&self, kind: EventKind, subscriber: SubscriberRef) {
        let name = subscriber.name().to_string();
        self.subscriptions
            .borrow_mut()
            .entry(kind)
            .or_default()
            .push(subscriber);
        self.report(Diagnostic::SubscriberAdded {
            kind,
            subscriber: name,
        });
    }

    /// Remove the first registration of `subscriber` for `kind`, matched by identity.
    ///
    /// Returns false and does nothing if it was not registered.
    pub fn unsubscribe(&self, kind: EventKind, subscriber: &SubscriberRef) -> bool {
        let removed = {
            let mut subscriptions = self.subscriptions.borrow_mut();
            let Some(subscribers) = subscriptions.get_mut(&kind) else {
                return false;
            };
            subscribers
                .iter()
                .position(|s| Rc::ptr_eq(s, subscriber))
                .map(|index| subscribers.remove(index))
        };

        match removed {
            Some(subscriber) => {
                self.report(Diagnostic::SubscriberRemoved {
                    kind,
                    subscriber: subscriber.name().to_string(),
                });
                true
            }
            None => false,
        }
    }

    /// Number of registrations currently held for `kind`
    pub fn subscriber_count(&self, kind: EventKind) -> usize {
        self.subscriptions
            .borrow()
            .get(&kind)
            .map(Vec::len)
            .unwrap_or(0)
    }

    /// Deliver `event` to every subscriber of its kind.
    ///
    /// With no subscribers this records a `NoSubscribers` diagnostic and
    /// returns `Ok`, even past the nesting limit. Under [`DispatchPolicy::FailFast`] the first subscriber
    /// error stops delivery and is returned; under
    /// [`DispatchPolicy::Isolate`] it is recorded and delivery continues.
    pub fn publish(&self, event: Event) -> Result<(), DispatchError> {
        let kind = event.kind();
        let subscribers: Vec<SubscriberRef> = self
            .subscriptions
            .borrow()
            .get(&kind)
            .cloned()
            .unwrap_or_default();

        if subscribers.is_empty() {
            self.report(Diagnostic::NoSubscribers { kind });
            return Ok(());
        }

        // Only publishes that would actually dispatch count against the limit
        let depth = self.depth.get() + 1;
        if depth > self.config.max_publish_depth {
            return Err(DispatchError::DepthExceeded {
                kind,
                depth,
                limit: self.config.max_publish_depth,
            });
        }

        self.depth.set(depth);
        let _guard = DepthGuard(&self.depth);

        trace!(
            "Dispatching {} to {} subscriber(s) at depth {}",
            event,
            subscribers.len(),
            depth
        );

        for subscriber in subscribers {
            if let Err(source) = subscriber.handle(&event, self) {
                match self.config.dispatch_policy {
                    DispatchPolicy::FailFast => {
                        return Err(DispatchError::Handler {
                            kind,
                            subscriber: subscriber.name().to_string(),
                            source,
                        });
                    }
                    DispatchPolicy::Isolate => self.report(Diagnostic::HandlerFault {
                        kind,
                        subscriber: subscriber.name().to_string(),
                        error: source.to_string(),
                    }),
                }
            }
        }

        Ok(())
    }

    /// Send a diagnostic to this bus's sink
    pub fn report(&self, diagnostic: Diagnostic) {
        self.diagnostics.record(diagnostic);
    }
}

impl Default for PubSub {
    fn default() -> Self {
        Self::new()
    }
}
