use super::errors::SimulationError;
use crate::core::event::{Event, RefillEvent, SaleEvent};
use crate::core::types::MachineId;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::num::NonZeroU32;

const fn quantity(n: u32) -> NonZeroU32 {
    match NonZeroU32::new(n) {
        Some(q) => q,
        None => panic!("generated quantities are positive"),
    }
}

const SALE_QUANTITIES: [NonZeroU32; 2] = [quantity(1), quantity(2)];
const REFILL_QUANTITIES: [NonZeroU32; 2] = [quantity(3), quantity(5)];

/// Random source of `Sale` and `Refill` events for a fixed set of machines.
///
/// Each event is a sale of 1 or 2 or a refill of 3 or 5, with even odds,
/// aimed at a machine picked uniformly. The stream never ends; use
/// [`generate`](Self::generate) or `take` to bound it.
pub struct EventGenerator {
    rng: StdRng,
    machine_ids: Vec<MachineId>,
}

impl EventGenerator {
    pub fn new(machine_ids: Vec<MachineId>, seed: Option<u64>) -> Result<Self, SimulationError> {
        if machine_ids.is_empty() {
            return Err(SimulationError::InvalidConfig(
                "event generator needs at least one machine id".to_string(),
            ));
        }

        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self { rng, machine_ids })
    }

    fn pick_machine(&mut self) -> MachineId {
        let index = self.rng.gen_range(0..self.machine_ids.len());
        self.machine_ids[index].clone()
    }

    /// Produce the next random event
    pub fn next_event(&mut self) -> Event {
        let is_sale = self.rng.gen_bool(0.5);
        let index = usize::from(self.rng.gen_bool(0.5));
        let machine_id = self.pick_machine();

        if is_sale {
            Event::Sale(SaleEvent::new(machine_id, SALE_QUANTITIES[index]))
        } else {
            Event::Refill(RefillEvent::new(machine_id, REFILL_QUANTITIES[index]))
        }
    }

    /// Produce `count` events in order
    pub fn generate(&mut self, count: usize) -> Vec<Event> {
        self.by_ref().take(count).collect()
    }
}

impl Iterator for EventGenerator {
    type Item = Event;

    fn next(&mut self) -> Option<Event> {
        Some(self.next_event())
    }
}
