use super::MachineRepository;
use crate::core::bus::{Diagnostic, PubSub, Subscriber, SubscriberError};
use crate::core::event::Event;
use log::{debug, warn};

/// Marks a machine as having an active low-stock warning. Idempotent.
pub struct StockWarningSubscriber {
    machines: MachineRepository,
}

impl StockWarningSubscriber {
    pub fn new(machines: MachineRepository) -> Self {
        Self { machines }
    }
}

impl Subscriber for StockWarningSubscriber {
    fn name(&self) -> &str {
        "stock_warning"
    }

    fn handle(&self, event: &Event, bus: &PubSub) -> Result<(), SubscriberError> {
        let Event::LowStockWarning(warning) = event else {
            return Ok(());
        };

        match self.machines.get_by_id(warning.machine_id()) {
            Some(machine) if machine.has_low_stock_warning => {
                debug!("Machine '{}' already has a low stock warning", machine.id);
            }
            Some(mut machine) => {
                warn!(
                    "Low stock warning for machine '{}' (stock level '{}')",
                    machine.id, machine.stock_level
                );
                machine.has_low_stock_warning = true;
                self.machines.update(machine);
            }
            None => bus.report(Diagnostic::EntityNotFound {
                kind: event.kind(),
                machine_id: warning.machine_id().to_string(),
            }),
        }
        Ok(())
    }
}
