use super::repository::Entity;
use super::types::{MachineId, StockLevel};
use serde::{Deserialize, Serialize};

/// Derived per-machine state: `Ok` until a sale crosses below the threshold,
/// `LowStock` until a refill brings the machine back to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StockStatus {
    Ok,
    LowStock,
}

/// A vending machine record. The repository holds the canonical copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Machine {
    pub id: MachineId,
    pub stock_level: StockLevel,
    #[serde(default)]
    pub has_low_stock_warning: bool,
}

impl Machine {
    /// Create a machine with no active warning
    pub fn new(id: impl Into<MachineId>, stock_level: StockLevel) -> Self {
        Self {
            id: id.into(),
            stock_level,
            has_low_stock_warning: false,
        }
    }

    pub fn with_low_stock_warning(mut self, active: bool) -> Self {
        self.has_low_stock_warning = active;
        self
    }

    pub fn stock_status(&self) -> StockStatus {
        if self.has_low_stock_warning {
            StockStatus::LowStock
        } else {
            StockStatus::Ok
        }
    }
}

impl Entity for Machine {
    fn id(&self) -> &str {
        &self.id
    }
}
