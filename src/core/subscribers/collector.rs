use crate::core::bus::{PubSub, Subscriber, SubscriberError};
use crate::core::event::{Event, EventKind};
use std::cell::RefCell;

/// Records every event it is handed, in delivery order
#[derive(Debug, Default)]
pub struct EventCollector {
    events: RefCell<Vec<Event>>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    pub fn count(&self, kind: EventKind) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|event| event.kind() == kind)
            .count()
    }

    /// Machine ids of the collected events of `kind`
    pub fn machine_ids(&self, kind: EventKind) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .filter(|event| event.kind() == kind)
            .map(|event| event.machine_id().to_string())
            .collect()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

impl Subscriber for EventCollector {
    fn name(&self) -> &str {
        "collector"
    }

    fn handle(&self, event: &Event, _bus: &PubSub) -> Result<(), SubscriberError> {
        self.events.borrow_mut().push(event.clone());
        Ok(())
    }
}
