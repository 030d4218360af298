use super::types::{EventId, MachineId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;

/// Tag identifying which variant an event is. The bus keys its registry on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    Sale,
    Refill,
    LowStockWarning,
    StockLevelOk,
}

impl EventKind {
    /// All kinds, in declaration order
    pub const ALL: [EventKind; 4] = [
        EventKind::Sale,
        EventKind::Refill,
        EventKind::LowStockWarning,
        EventKind::StockLevelOk,
    ];

    /// Wire/display tag for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Sale => "sale",
            EventKind::Refill => "refill",
            EventKind::LowStockWarning => "lowStockWarning",
            EventKind::StockLevelOk => "stockLevelOk",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rejected event construction
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EventError {
    #[error("'{0}' event needs a positive quantity")]
    ZeroQuantity(EventKind),
}

/// Items sold from a machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleEvent {
    id: EventId,
    machine_id: MachineId,
    quantity: NonZeroU32,
}

impl SaleEvent {
    pub fn new(machine_id: impl Into<MachineId>, quantity: NonZeroU32) -> Self {
        Self {
            id: format!("sale_{}", uuid::Uuid::new_v4()),
            machine_id: machine_id.into(),
            quantity,
        }
    }

    pub fn machine_id(&self) -> &str {
        &self.machine_id
    }

    pub fn quantity(&self) -> u32 {
        self.quantity.get()
    }
}

/// Items loaded into a machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefillEvent {
    id: EventId,
    machine_id: MachineId,
    quantity: NonZeroU32,
}

impl RefillEvent {
    pub fn new(machine_id: impl Into<MachineId>, quantity: NonZeroU32) -> Self {
        Self {
            id: format!("refill_{}", uuid::Uuid::new_v4()),
            machine_id: machine_id.into(),
            quantity,
        }
    }

    pub fn machine_id(&self) -> &str {
        &self.machine_id
    }

    pub fn quantity(&self) -> u32 {
        self.quantity.get()
    }
}

/// Derived event: a machine dropped below the low-stock threshold
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LowStockWarningEvent {
    id: EventId,
    machine_id: MachineId,
}

impl LowStockWarningEvent {
    pub fn new(machine_id: impl Into<MachineId>) -> Self {
        Self {
            id: format!("low_stock_warning_{}", uuid::Uuid::new_v4()),
            machine_id: machine_id.into(),
        }
    }

    pub fn machine_id(&self) -> &str {
        &self.machine_id
    }
}

/// Derived event: a machine with an active warning is back at or above threshold
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockLevelOkEvent {
    id: EventId,
    machine_id: MachineId,
}

impl StockLevelOkEvent {
    pub fn new(machine_id: impl Into<MachineId>) -> Self {
        Self {
            id: format!("stock_level_ok_{}", uuid::Uuid::new_v4()),
            machine_id: machine_id.into(),
        }
    }

    pub fn machine_id(&self) -> &str {
        &self.machine_id
    }
}

/// Closed set of events carried by the bus.
///
/// Events are immutable once built; every accessor borrows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Sale(SaleEvent),
    Refill(RefillEvent),
    LowStockWarning(LowStockWarningEvent),
    StockLevelOk(StockLevelOkEvent),
}

impl Event {
    /// Build a `Sale`, rejecting a zero quantity
    pub fn sale(machine_id: impl Into<MachineId>, quantity: u32) -> Result<Self, EventError> {
        let quantity =
            NonZeroU32::new(quantity).ok_or(EventError::ZeroQuantity(EventKind::Sale))?;
        Ok(Event::Sale(SaleEvent::new(machine_id, quantity)))
    }

    /// Build a `Refill`, rejecting a zero quantity
    pub fn refill(machine_id: impl Into<MachineId>, quantity: u32) -> Result<Self, EventError> {
        let quantity =
            NonZeroU32::new(quantity).ok_or(EventError::ZeroQuantity(EventKind::Refill))?;
        Ok(Event::Refill(RefillEvent::new(machine_id, quantity)))
    }

    pub fn low_stock_warning(machine_id: impl Into<MachineId>) -> Self {
        Event::LowStockWarning(LowStockWarningEvent::new(machine_id))
    }

    pub fn stock_level_ok(machine_id: impl Into<MachineId>) -> Self {
        Event::StockLevelOk(StockLevelOkEvent::new(machine_id))
    }

    pub fn kind(&self) -> EventKind {
        match self {
            Event::Sale(_) => EventKind::Sale,
            Event::Refill(_) => EventKind::Refill,
            Event::LowStockWarning(_) => EventKind::LowStockWarning,
            Event::StockLevelOk(_) => EventKind::StockLevelOk,
        }
    }

    pub fn id(&self) -> &EventId {
        match self {
            Event::Sale(e) => &e.id,
            Event::Refill(e) => &e.id,
            Event::LowStockWarning(e) => &e.id,
            Event::StockLevelOk(e) => &e.id,
        }
    }

    pub fn machine_id(&self) -> &str {
        match self {
            Event::Sale(e) => e.machine_id(),
            Event::Refill(e) => e.machine_id(),
            Event::LowStockWarning(e) => e.machine_id(),
            Event::StockLevelOk(e) => e.machine_id(),
        }
    }

    /// Quantity carried by `Sale` and `Refill`; `None` for derived events
    pub fn quantity(&self) -> Option<u32> {
        match self {
            Event::Sale(e) => Some(e.quantity()),
            Event::Refill(e) => Some(e.quantity()),
            Event::LowStockWarning(_) | Event::StockLevelOk(_) => None,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.quantity() {
            Some(quantity) => write!(
                f,
                "{}(machine='{}', quantity={})",
                self.kind(),
                self.machine_id(),
                quantity
            ),
            None => write!(f, "{}(machine='{}')", self.kind(), self.machine_id()),
        }
    }
}
