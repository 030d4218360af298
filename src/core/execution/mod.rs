pub mod config;
pub mod errors;
pub mod generator;
pub mod simulation_engine;

// Re-export commonly used types
pub use config::{MachineSeed, SimulationConfig};
pub use errors::SimulationError;
pub use generator::EventGenerator;
pub use simulation_engine::{run_simulation, run_simulation_with, Simulation, SimulationReport};
