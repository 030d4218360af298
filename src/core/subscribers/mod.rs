pub mod collector;
pub mod refill;
pub mod sale;
pub mod stock_level_ok;
pub mod stock_warning;

// Re-export commonly used types
pub use collector::EventCollector;
pub use refill::MachineRefillSubscriber;
pub use sale::MachineSaleSubscriber;
pub use stock_level_ok::StockLevelOkSubscriber;
pub use stock_warning::StockWarningSubscriber;

use crate::core::machine::Machine;
use crate::core::repository::Repository;
use crate::core::types::StockLevel;
use std::rc::Rc;

/// Repository handle shared by every machine subscriber
pub type MachineRepository = Rc<Repository<Machine>>;

/// Stock level below which a machine is considered low on stock
pub const DEFAULT_LOW_STOCK_THRESHOLD: StockLevel = 3;
