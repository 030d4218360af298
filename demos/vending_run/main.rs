use vendsim::{run_simulation_with, SimulationConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .format_timestamp(None)
        .init();

    // Optional first argument: generator seed
    let mut config = SimulationConfig::default();
    if let Some(seed) = std::env::args().nth(1) {
        config = config.with_seed(seed.parse()?);
    }

    println!("Starting vending simulation");
    println!(
        "Configuration: {} machines, threshold={}, events={}, seed={:?}",
        config.machines.len(),
        config.low_stock_threshold,
        config.event_count,
        config.random_seed
    );

    let report = run_simulation_with(config)?;

    println!("\nEvents:");
    for event in &report.events {
        println!("  {}", event);
    }

    println!("\nDerived events:");
    if report.derived_events.is_empty() {
        println!("  (none)");
    }
    for event in &report.derived_events {
        println!("  {}", event);
    }

    println!("\n{:<8} {:>8} {:>8}  {}", "machine", "before", "after", "status");
    for machine in &report.final_machines {
        let before = report
            .initial_machines
            .iter()
            .find(|m| m.id == machine.id)
            .map(|m| m.stock_level)
            .unwrap_or_default();
        println!(
            "{:<8} {:>8} {:>8}  {:?}",
            machine.id,
            before,
            machine.stock_level,
            machine.stock_status()
        );
    }

    println!("\nSimulation completed");
    Ok(())
}
