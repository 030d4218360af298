//! In-process simulation of a vending machine fleet.
//!
//! Sale and refill events go through a synchronous publish/subscribe bus
//! ([`PubSub`]). Subscribers update machines held in a shared [`Repository`]
//! and publish derived `LowStockWarning` / `StockLevelOk` events when a
//! machine crosses the low-stock threshold in either direction.
//!
//! ```
//! use vendsim::{run_simulation_with, SimulationConfig};
//!
//! let report = run_simulation_with(SimulationConfig::new().with_seed(42)).unwrap();
//! assert_eq!(report.events.len(), 5);
//! assert_eq!(report.final_machines.len(), 3);
//! ```
pub mod core;

// Re-export commonly used types
pub use crate::core::bus::{
    BusConfig, Diagnostic, DiagnosticSink, DispatchError, DispatchPolicy, PubSub,
    Subscriber, SubscriberError, SubscriberRef,
};
pub use crate::core::event::{Event, EventError, EventKind};
pub use crate::core::execution::{
    run_simulation, run_simulation_with, MachineSeed, Simulation, SimulationConfig,
    SimulationError, SimulationReport,
};
pub use crate::core::machine::{Machine, StockStatus};
pub use crate::core::repository::{Entity, Repository};
pub use crate::core::types::{EventId, MachineId, StockLevel};
