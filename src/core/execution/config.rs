//! Configuration for a vending simulation run
//!
//! Controls which machines exist at setup, the low-stock threshold shared by
//! the subscribers, how many random events are generated and how the bus
//! dispatches them.

use super::errors::SimulationError;
use crate::core::bus::BusConfig;
use crate::core::subscribers::DEFAULT_LOW_STOCK_THRESHOLD;
use crate::core::types::{MachineId, StockLevel};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A machine to create at setup, with its starting stock
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineSeed {
    pub id: MachineId,
    pub stock_level: StockLevel,
}

impl MachineSeed {
    pub fn new(id: impl Into<MachineId>, stock_level: StockLevel) -> Self {
        Self {
            id: id.into(),
            stock_level,
        }
    }
}

/// Configuration for simulation execution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Machines created at setup, in insertion order
    pub machines: Vec<MachineSeed>,
    /// Stock level below which a machine is low on stock
    pub low_stock_threshold: StockLevel,
    /// Number of random sale/refill events generated per run
    pub event_count: usize,
    /// Seed for the event generator. `None` seeds from entropy.
    pub random_seed: Option<u64>,
    pub bus: BusConfig,
}

impl SimulationConfig {
    /// Create a new simulation configuration with default values
    ///
    /// Machines `001`, `002`, `003` start at 3, 5 and 1; threshold 3; five
    /// events; unseeded.
    pub fn new() -> Self {
        Self {
            machines: vec![
                MachineSeed::new("001", 3),
                MachineSeed::new("002", 5),
                MachineSeed::new("003", 1),
            ],
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
            event_count: 5,
            random_seed: None,
            bus: BusConfig::default(),
        }
    }

    /// Set the machines created at setup
    ///
    /// # Arguments
    /// * `machines` - Seeds in insertion order; ids must be unique
    ///
    /// # Returns
    /// A new configuration with the specified machines
    pub fn with_machines(mut self, machines: Vec<MachineSeed>) -> Self {
        self.machines = machines;
        self
    }

    /// Set the low-stock threshold shared by the sale and refill subscribers
    ///
    /// # Arguments
    /// * `threshold` - Stock level below which a machine warns
    ///
    /// # Returns
    /// A new configuration with the specified threshold
    pub fn with_threshold(mut self, threshold: StockLevel) -> Self {
        self.low_stock_threshold = threshold;
        self
    }

    /// Set how many random events a run generates
    ///
    /// # Arguments
    /// * `count` - Number of sale/refill events; must be greater than zero
    ///
    /// # Returns
    /// A new configuration with the specified event count
    pub fn with_event_count(mut self, count: usize) -> Self {
        self.event_count = count;
        self
    }

    /// Fix the generator seed so runs are reproducible
    ///
    /// # Arguments
    /// * `seed` - Seed for the event generator's `StdRng`
    ///
    /// # Returns
    /// A new configuration with the specified seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Set how the bus dispatches events
    ///
    /// # Arguments
    /// * `bus` - Dispatch policy and nesting limit for the run's bus
    ///
    /// # Returns
    /// A new configuration with the specified bus settings
    pub fn with_bus(mut self, bus: BusConfig) -> Self {
        self.bus = bus;
        self
    }

    /// Ids of the seeded machines, in order
    pub fn machine_ids(&self) -> Vec<MachineId> {
        self.machines.iter().map(|seed| seed.id.clone()).collect()
    }

    /// Reject configs that cannot produce a run
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.machines.is_empty() {
            return Err(SimulationError::InvalidConfig(
                "at least one machine is required".to_string(),
            ));
        }
        if self.event_count == 0 {
            return Err(SimulationError::InvalidConfig(
                "event_count must be greater than zero".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for seed in &self.machines {
            if !seen.insert(seed.id.as_str()) {
                return Err(SimulationError::InvalidConfig(format!(
                    "duplicate machine id '{}'",
                    seed.id
                )));
            }
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::new()
    }
}
