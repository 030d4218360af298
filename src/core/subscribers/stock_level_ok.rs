use super::MachineRepository;
use crate::core::bus::{Diagnostic, PubSub, Subscriber, SubscriberError};
use crate::core::event::Event;
use log::{debug, info};

/// Clears a machine's low-stock warning. Idempotent.
pub struct StockLevelOkSubscriber {
    machines: MachineRepository,
}

impl StockLevelOkSubscriber {
    pub fn new(machines: MachineRepository) -> Self {
        Self { machines }
    }
}

impl Subscriber for StockLevelOkSubscriber {
    fn name(&self) -> &str {
        "stock_level_ok"
    }

    fn handle(&self, event: &Event, bus: &PubSub) -> Result<(), SubscriberError> {
        let Event::StockLevelOk(ok) = event else {
            return Ok(());
        };

        match self.machines.get_by_id(ok.machine_id()) {
            Some(machine) if !machine.has_low_stock_warning => {
                debug!("Machine '{}' has no active warning to clear", machine.id);
            }
            Some(mut machine) => {
                info!("Stock level ok for machine '{}'", machine.id);
                machine.has_low_stock_warning = false;
                self.machines.update(machine);
            }
            None => bus.report(Diagnostic::EntityNotFound {
                kind: event.kind(),
                machine_id: ok.machine_id().to_string(),
            }),
        }
        Ok(())
    }
}
