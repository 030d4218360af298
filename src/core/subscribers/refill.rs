use super::MachineRepository;
use crate::core::bus::{Diagnostic, PubSub, Subscriber, SubscriberError};
use crate::core::event::Event;
use crate::core::types::StockLevel;
use log::info;

/// Applies `Refill` events and clears an active warning once the machine is
/// back at or above the threshold.
pub struct MachineRefillSubscriber {
    machines: MachineRepository,
    threshold: StockLevel,
}

impl MachineRefillSubscriber {
    pub fn new(machines: MachineRepository, threshold: StockLevel) -> Self {
        Self {
            machines,
            threshold,
        }
    }
}

impl Subscriber for MachineRefillSubscriber {
    fn name(&self) -> &str {
        "machine_refill"
    }

    fn handle(&self, event: &Event, bus: &PubSub) -> Result<(), SubscriberError> {
        let Event::Refill(refill) = event else {
            return Ok(());
        };

        let Some(mut machine) = self.machines.get_by_id(refill.machine_id()) else {
            bus.report(Diagnostic::EntityNotFound {
                kind: event.kind(),
                machine_id: refill.machine_id().to_string(),
            });
            return Ok(());
        };

        machine.stock_level = machine
            .stock_level
            .saturating_add(StockLevel::from(refill.quantity()));
        info!(
            "Refilled machine '{}' with '{}', stock level is now '{}'",
            machine.id,
            refill.quantity(),
            machine.stock_level
        );

        let recovered = machine.stock_level >= self.threshold && machine.has_low_stock_warning;
        if recovered {
            machine.has_low_stock_warning = false;
        }
        self.machines.update(machine);

        if recovered {
            bus.publish(Event::stock_level_ok(refill.machine_id()))?;
        }
        Ok(())
    }
}
