//! Command-line arguments for the headless biome viewer.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Terreform command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "terreform", about = "Headless Terreform biome simulation")]
pub struct CliArgs {
    /// Number of frames to simulate.
    #[arg(long)]
    pub frames: Option<u64>,

    /// Simulated milliseconds per frame.
    #[arg(long)]
    pub frame_ms: Option<u64>,

    /// Master RNG seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Press "next biome" every N milliseconds (0 disables).
    #[arg(long)]
    pub rotate_every_ms: Option<u64>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(frames) = args.frames {
            self.sim.frames = frames;
        }
        if let Some(ms) = args.frame_ms {
            self.sim.frame_ms = ms;
        }
        if let Some(seed) = args.seed {
            self.sim.seed = Some(seed);
        }
        if let Some(ms) = args.rotate_every_ms {
            self.sim.rotate_every_ms = ms;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs::parse_from(["terreform", "--frames", "120", "--seed", "7", "--log-level", "debug"]);
        config.apply_cli_overrides(&args);
        assert_eq!(config.sim.frames, 120);
        assert_eq!(config.sim.seed, Some(7));
        assert_eq!(config.debug.log_level, "debug");
        // Non-overridden fields retain defaults
        assert_eq!(config.sim.frame_ms, 16);
        assert_eq!(config.sim.rotate_every_ms, 1500);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_config_dir_flag() {
        let args = CliArgs::parse_from(["terreform", "--config", "/tmp/terreform-test"]);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/terreform-test")));
    }
}
