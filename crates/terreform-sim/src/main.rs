//! Headless Terreform: builds a ring of procedural biomes and cycles through them.
//!
//! Stands in for the browser render loop. Every frame ticks the biome manager
//! against an in-memory scene, and "next biome" is pressed on a fixed interval.
//!
//! Run with: `cargo run -p terreform-sim -- --frames 600 --seed 7`

mod assets;
mod error;
mod settings;
mod sim;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use terreform_config::{CliArgs, Config, default_config_dir};
use tracing::{error, info};

use crate::error::SimError;
use crate::sim::Simulation;

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let (config, config_dir) = match load_config(&args) {
        Ok(loaded) => loaded,
        Err(e) => {
            terreform_log::init_logging(None, false, None);
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let log_dir = config_dir.join("logs");
    terreform_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(args: &CliArgs) -> Result<(Config, PathBuf), SimError> {
    let config_dir = match &args.config {
        Some(dir) => dir.clone(),
        None => default_config_dir()?,
    };
    let mut config = Config::load_or_create(&config_dir)?;
    config.apply_cli_overrides(args);
    Ok((config, config_dir))
}

fn run(config: &Config) -> Result<(), SimError> {
    let seed = config.sim.seed.unwrap_or_else(rand::random);
    info!(seed, frames = config.sim.frames, frame_ms = config.sim.frame_ms, "Terreform starting");

    let mut sim = Simulation::new(config, seed)?;
    let stats = sim.run(config.sim.frames)?;

    info!(
        frames = stats.frames,
        presses = stats.presses,
        transitions = stats.transitions,
        visited = ?stats.visited,
        nodes = sim.scene().len(),
        current = sim.manager().current().name(),
        "run complete"
    );
    Ok(())
}
