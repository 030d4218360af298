use super::MachineRepository;
use crate::core::bus::{Diagnostic, PubSub, Subscriber, SubscriberError};
use crate::core::event::Event;
use crate::core::types::StockLevel;
use log::info;

/// Applies `Sale` events and raises a low-stock warning on the first crossing
/// below the threshold.
pub struct MachineSaleSubscriber {
    machines: MachineRepository,
    threshold: StockLevel,
}

impl MachineSaleSubscriber {
    pub fn new(machines: MachineRepository, threshold: StockLevel) -> Self {
        Self {
            machines,
            threshold,
        }
    }
}

impl Subscriber for MachineSaleSubscriber {
    fn name(&self) -> &str {
        "machine_sale"
    }

    fn handle(&self, event: &Event, bus: &PubSub) -> Result<(), SubscriberError> {
        let Event::Sale(sale) = event else {
            return Ok(());
        };

        let Some(mut machine) = self.machines.get_by_id(sale.machine_id()) else {
            bus.report(Diagnostic::EntityNotFound {
                kind: event.kind(),
                machine_id: sale.machine_id().to_string(),
            });
            return Ok(());
        };

        // No floor: overselling leaves a negative stock level, pinned at i64::MIN
        machine.stock_level = machine
            .stock_level
            .saturating_sub(StockLevel::from(sale.quantity()));
        info!(
            "Sold '{}' from machine '{}', stock level is now '{}'",
            sale.quantity(),
            machine.id,
            machine.stock_level
        );

        let crossed = machine.stock_level < self.threshold && !machine.has_low_stock_warning;
        // Persist before publishing so the warning handler sees the new level
        self.machines.update(machine);

        if crossed {
            bus.publish(Event::low_stock_warning(sale.machine_id()))?;
        }
        Ok(())
    }
}
