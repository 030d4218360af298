use super::config::SimulationConfig;
use super::errors::SimulationError;
use super::generator::EventGenerator;
use crate::core::bus::{DiagnosticSink, LogDiagnostics, PubSub};
use crate::core::event::{Event, EventKind};
use crate::core::machine::Machine;
use crate::core::repository::Repository;
use crate::core::subscribers::{
    EventCollector, MachineRefillSubscriber, MachineRepository, MachineSaleSubscriber,
    StockLevelOkSubscriber, StockWarningSubscriber,
};
use log::{debug, info};
use std::rc::Rc;

/// Outcome of one simulation run
#[derive(Debug, Clone)]
pub struct SimulationReport {
    /// Machines as seeded, before any event
    pub initial_machines: Vec<Machine>,
    /// Sale/refill events published, in order
    pub events: Vec<Event>,
    /// Low-stock and stock-ok events raised by the subscribers, in order
    pub derived_events: Vec<Event>,
    /// Repository snapshot after the last event
    pub final_machines: Vec<Machine>,
}

impl SimulationReport {
    pub fn final_machine(&self, id: &str) -> Option<&Machine> {
        self.final_machines.iter().find(|machine| machine.id == id)
    }
}

/// A bus, a machine repository and the subscribers wired between them
pub struct Simulation {
    bus: PubSub,
    machines: MachineRepository,
    derived: Rc<EventCollector>,
    config: SimulationConfig,
}

impl Simulation {
    /// Seed the machines and wire the subscribers, logging diagnostics via `log`
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        Self::with_diagnostics(config, Rc::new(LogDiagnostics))
    }

    /// Like [`Simulation::new`] but sending bus diagnostics to `diagnostics`
    pub fn with_diagnostics(
        config: SimulationConfig,
        diagnostics: Rc<dyn DiagnosticSink>,
    ) -> Result<Self, SimulationError> {
        config.validate()?;

        let bus = PubSub::with_config(config.bus.clone()).with_diagnostics(diagnostics);
        let machines: MachineRepository = Rc::new(
            config
                .machines
                .iter()
                .map(|seed| Machine::new(seed.id.clone(), seed.stock_level))
                .collect::<Repository<Machine>>(),
        );
        let threshold = config.low_stock_threshold;

        bus.subscribe(
            EventKind::Sale,
            Rc::new(MachineSaleSubscriber::new(machines.clone(), threshold)),
        );
        bus.subscribe(
            EventKind::Refill,
            Rc::new(MachineRefillSubscriber::new(machines.clone(), threshold)),
        );
        bus.subscribe(
            EventKind::LowStockWarning,
            Rc::new(StockWarningSubscriber::new(machines.clone())),
        );
        bus.subscribe(
            EventKind::StockLevelOk,
            Rc::new(StockLevelOkSubscriber::new(machines.clone())),
        );

        let derived = Rc::new(EventCollector::new());
        bus.subscribe(EventKind::LowStockWarning, derived.clone());
        bus.subscribe(EventKind::StockLevelOk, derived.clone());

        Ok(Self {
            bus,
            machines,
            derived,
            config,
        })
    }

    pub fn bus(&self) -> &PubSub {
        &self.bus
    }

    pub fn machines(&self) -> &MachineRepository {
        &self.machines
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Derived events observed so far
    pub fn derived_events(&self) -> Vec<Event> {
        self.derived.events()
    }

    /// Publish a single event on the wired bus
    pub fn publish(&self, event: Event) -> Result<(), SimulationError> {
        self.bus.publish(event)?;
        Ok(())
    }

    /// Generate `config.event_count` random events, publish them in order and
    /// report the resulting machine states
    pub fn run(&self) -> Result<SimulationReport, SimulationError> {
        let initial_machines = self.machines.get_all();
        info!("Initial machine stock levels: {:?}", initial_machines);

        let mut generator =
            EventGenerator::new(self.config.machine_ids(), self.config.random_seed)?;
        let events = generator.generate(self.config.event_count);

        for event in &events {
            debug!(
                "Generated event of type '{}' for machine '{}'",
                event.kind(),
                event.machine_id()
            );
            self.bus.publish(event.clone())?;
        }

        let final_machines = self.machines.get_all();
        info!("Final machine stock levels: {:?}", final_machines);

        Ok(SimulationReport {
            initial_machines,
            events,
            derived_events: self.derived.events(),
            final_machines,
        })
    }
}

/// Run one simulation with the default setup
pub fn run_simulation() -> Result<SimulationReport, SimulationError> {
    run_simulation_with(SimulationConfig::default())
}

pub fn run_simulation_with(config: SimulationConfig) -> Result<SimulationReport, SimulationError> {
    Simulation::new(config)?.run()
}
