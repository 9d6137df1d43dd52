//! Configuration for the Terreform biome viewer.
//!
//! Settings persist to disk as RON files. CLI flags (clap) override loaded values, and
//! [`Config::reload`] detects edits for hot-reload. Every section is `#[serde(default)]`
//! so older or partial files keep loading.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    AmbientConfig, Config, DebugConfig, FlockConfig, ScatterConfig, SimConfig, TransitionConfig,
    default_config_dir,
};
pub use error::ConfigError;
