use crate::core::event::EventKind;

/// Failure raised by a subscriber while handling an event
#[derive(Debug, thiserror::Error)]
pub enum SubscriberError {
    /// The handler itself could not complete
    #[error("handler fault: {0}")]
    Fault(String),
    /// A derived event published from inside the handler failed
    #[error("nested publish failed: {0}")]
    Nested(#[source] Box<DispatchError>),
}

impl SubscriberError {
    pub fn fault(message: impl Into<String>) -> Self {
        SubscriberError::Fault(message.into())
    }
}

impl From<DispatchError> for SubscriberError {
    fn from(err: DispatchError) -> Self {
        SubscriberError::Nested(Box::new(err))
    }
}

/// Errors surfaced by [`PubSub::publish`](super::PubSub::publish)
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// A subscriber failed and the bus runs fail-fast
    #[error("subscriber '{subscriber}' failed on '{kind}' event: {source}")]
    Handler {
        kind: EventKind,
        subscriber: String,
        #[source]
        source: SubscriberError,
    },
    /// Derived events nested deeper than the configured limit
    #[error("publish of '{kind}' would nest {depth} levels deep (limit {limit})")]
    DepthExceeded {
        kind: EventKind,
        depth: usize,
        limit: usize,
    },
}

impl DispatchError {
    /// Innermost error in a chain of nested publishes
    pub fn root_cause(&self) -> &DispatchError {
        match self {
            DispatchError::Handler {
                source: SubscriberError::Nested(inner),
                ..
            } => inner.root_cause(),
            other => other,
        }
    }
}
