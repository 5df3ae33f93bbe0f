//! Structured logging for the wingrig character rig.
//!
//! Installs a `tracing` subscriber with console output (uptime timestamps,
//! module targets) and, in debug builds, a JSON log file for replaying a
//! take-off or landing sequence after the fact. The filter comes from
//! `RUST_LOG` when set, otherwise from the rig configuration.

use std::fs::File;
use std::path::Path;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use wingrig_config::RigConfig;

/// Filter used when neither `RUST_LOG` nor the config provide one.
pub const DEFAULT_FILTER: &str = "info";

/// Name of the JSON log file written in debug builds.
pub const LOG_FILE_NAME: &str = "wingrig.log";

/// Resolve the filter string from an optional config.
///
/// An empty `debug.log_level` falls back to [`DEFAULT_FILTER`].
pub fn filter_directive(config: Option<&RigConfig>) -> String {
    match config {
        Some(config) if !config.debug.log_level.is_empty() => config.debug.log_level.clone(),
        _ => DEFAULT_FILTER.to_string(),
    }
}

/// Initialize the global tracing subscriber.
///
/// * `log_dir` - Optional directory for the JSON log file (debug builds only)
/// * `debug_build` - Whether file logging should be attempted
/// * `config` - Optional configuration supplying the log level
///
/// ```no_run
/// use wingrig_config::RigConfig;
/// use wingrig_log::init_logging;
///
/// let config = RigConfig::default();
/// init_logging(None, false, Some(&config));
/// ```
pub fn init_logging(log_dir: Option<&Path>, debug_build: bool, config: Option<&RigConfig>) {
    let filter_str = filter_directive(config);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_names(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    let Some(log_file) = log_dir.filter(|_| debug_build).and_then(open_log_file) else {
        subscriber.init();
        return;
    };
    subscriber
        .with(
            fmt::layer()
                .json()
                .with_writer(log_file)
                .with_ansi(false)
                .with_current_span(false)
                .with_timer(fmt::time::uptime()),
        )
        .init();
}

/// Create `log_dir` if needed and truncate the log file inside it.
/// Failures leave the rig logging to the console only.
fn open_log_file(log_dir: &Path) -> Option<File> {
    std::fs::create_dir_all(log_dir).ok()?;
    File::create(log_dir.join(LOG_FILE_NAME)).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_from_config() {
        let mut config = RigConfig::default();
        config.debug.log_level = "warn,wingrig_player=trace".to_string();
        assert_eq!(filter_directive(Some(&config)), "warn,wingrig_player=trace");
    }

    #[test]
    fn test_empty_config_level_falls_back() {
        let mut config = RigConfig::default();
        config.debug.log_level.clear();
        assert_eq!(filter_directive(Some(&config)), DEFAULT_FILTER);
        assert_eq!(filter_directive(None), DEFAULT_FILTER);
    }

    #[test]
    fn test_subsystem_filter_parses() {
        for filter_str in ["info", "debug,wingrig_player=trace", "warn,wingrig_input=debug"] {
            assert!(
                EnvFilter::try_new(filter_str).is_ok(),
                "Failed to parse filter: {filter_str}"
            );
        }
    }

    #[test]
    fn test_log_file_created_in_nested_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("logs").join("session");
        assert!(open_log_file(&nested).is_some());
        assert!(nested.join("wingrig.log").is_file());
    }
}
