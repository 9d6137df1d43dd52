//! Tracing setup for the Terreform binaries.
//!
//! Console output always; a JSON log file as well in debug builds. Library crates
//! emit through the `log` facade, which the subscriber picks up via `tracing-log`.

use std::path::{Path, PathBuf};

use terreform_config::Config;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when neither `RUST_LOG` nor the config sets one.
pub const DEFAULT_FILTER: &str = "info";

/// Name of the JSON log written in debug builds.
pub const LOG_FILE_NAME: &str = "terreform.log";

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` wins over the config's `debug.log_level`, which wins over
/// [`DEFAULT_FILTER`]. In debug builds with a `log_dir`, records are also written as
/// JSON to [`LOG_FILE_NAME`] there. Returns the log file path when one was opened.
///
/// # Examples
///
/// ```no_run
/// use terreform_config::Config;
/// use terreform_log::init_logging;
///
/// let config = Config::default();
/// init_logging(Some(std::path::Path::new("./logs")), cfg!(debug_assertions), Some(&config));
/// ```
pub fn init_logging(log_dir: Option<&Path>, debug_build: bool, config: Option<&Config>) -> Option<PathBuf> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(config)));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if debug_build
        && let Some(log_dir) = log_dir
        && std::fs::create_dir_all(log_dir).is_ok()
        && let Ok(log_file) = std::fs::File::create(log_dir.join(LOG_FILE_NAME))
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();

        subscriber.with(file_layer).init();
        let path = log_dir.join(LOG_FILE_NAME);
        tracing::debug!(path = %path.display(), "file logging enabled");
        return Some(path);
    }

    subscriber.init();
    None
}

/// An `EnvFilter` built from [`DEFAULT_FILTER`].
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new(DEFAULT_FILTER)
}

/// The filter string the config asks for, or [`DEFAULT_FILTER`].
fn filter_directive(config: Option<&Config>) -> String {
    match config {
        Some(config) if !config.debug.log_level.trim().is_empty() => config.debug.log_level.clone(),
        _ => DEFAULT_FILTER.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_level() {
        assert!(default_env_filter().to_string().contains("info"));
    }

    #[test]
    fn test_filter_directive_prefers_config() {
        let mut config = Config::default();
        config.debug.log_level = "debug,terreform_flock=trace".to_string();
        assert_eq!(filter_directive(Some(&config)), "debug,terreform_flock=trace");
    }

    #[test]
    fn test_filter_directive_falls_back() {
        let mut config = Config::default();
        config.debug.log_level = "  ".to_string();
        assert_eq!(filter_directive(Some(&config)), DEFAULT_FILTER);
        assert_eq!(filter_directive(None), DEFAULT_FILTER);
    }

    #[test]
    fn test_crate_filters_parse() {
        for directive in [
            "info",
            "debug,terreform_biome=trace",
            "warn,terreform_scatter=debug,terreform_flock=trace",
        ] {
            assert!(EnvFilter::try_new(directive).is_ok(), "failed to parse {directive}");
        }
    }

    // The only test that installs the global subscriber.
    #[test]
    fn test_debug_build_opens_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let log_dir = dir.path().join("logs");
        let path = init_logging(Some(&log_dir), true, Some(&Config::default()));
        assert_eq!(path.as_deref(), Some(log_dir.join(LOG_FILE_NAME).as_path()));
        assert!(log_dir.join(LOG_FILE_NAME).is_file());
    }
}
