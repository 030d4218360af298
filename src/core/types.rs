/// Identifier of a vending machine, e.g. `"001"`
pub type MachineId = String;

/// Unique identifier attached to every constructed event
pub type EventId = String;

/// Stock level of a machine. Signed because oversell is permitted.
pub type StockLevel = i64;
