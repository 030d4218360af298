use super::errors::SubscriberError;
use super::pubsub::PubSub;
use crate::core::event::Event;
use std::rc::Rc;

/// A handler registered against one or more event kinds.
///
/// `handle` runs synchronously on the publishing thread. The bus that is
/// dispatching is passed in so a handler can publish derived events; such a
/// nested publish completes before `handle` continues.
pub trait Subscriber {
    /// Name used in diagnostics and errors
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    fn handle(&self, event: &Event, bus: &PubSub) -> Result<(), SubscriberError>;
}

/// Shared handle to a subscriber. Registration and removal compare these by
/// pointer identity.
pub type SubscriberRef = Rc<dyn Subscriber>;
