pub mod config;
pub mod diagnostics;
pub mod errors;
pub mod pubsub;
pub mod subscriber;

// Re-export commonly used types
pub use config::{BusConfig, DispatchPolicy};
pub use diagnostics::{Diagnostic, DiagnosticSink, LogDiagnostics, RecordingDiagnostics};
pub use errors::{DispatchError, SubscriberError};
pub use pubsub::PubSub;
pub use subscriber::{Subscriber, SubscriberRef};
