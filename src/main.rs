//! Roto Box headless driver
//!
//! Runs the simulation at its fixed timestep without wall-clock pacing and
//! logs the tag counters once per simulated second. Pass a JSON config path
//! as the first argument to override the reference setup.

use roto_box::extract::counter_lines;
use roto_box::{ConfigError, SimConfig, Simulation};

/// One minute of simulated time at 50 Hz
const RUN_TICKS: u64 = 3000;

fn main() {
    env_logger::init();
    log::info!("Roto Box (headless) starting...");

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), ConfigError> {
    let config = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading config from {path}");
            SimConfig::load(path)?
        }
        None => SimConfig::default(),
    };

    let mut sim = Simulation::new(config)?;
    let ticks_per_second = (1.0 / sim.config().dt).round().max(1.0) as u64;

    for _ in 0..RUN_TICKS {
        sim.step();

        let stats = sim.last_tick();
        log::debug!(
            "tick {}: {} wall hits, {} obstacle hits",
            sim.ticks(),
            stats.wall_hits,
            stats.obstacle_hits
        );

        if sim.ticks() % ticks_per_second == 0 {
            let line = counter_lines(&sim.tag_counts())
                .into_iter()
                .map(|(_, text)| text)
                .collect::<Vec<_>>()
                .join("  ");
            log::info!("t={:>4.1}s  {line}", sim.ticks() as f32 * sim.config().dt);
        }
    }

    log::info!("Finished {} ticks, theta = {:.3} rad", sim.ticks(), sim.theta());
    Ok(())
}
