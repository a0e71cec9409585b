//! Structured logging setup
//!
//! Initializes a `tracing` subscriber writing to stderr, so stdout stays free
//! for command output. The level comes from the CLI flags, the
//! `REGISTRY_LOG_LEVEL` environment variable, or `RUST_LOG` for fine-grained
//! filtering. Initialization happens at most once per process.
//!
//! # Example
//!
//! ```no_run
//! use uiregistry::util::{init_logging, LoggingConfig};
//! use tracing::Level;
//!
//! init_logging(LoggingConfig::with_level(Level::DEBUG));
//! tracing::info!(items = 12, "Registry written");
//! ```

use std::env;
use std::io;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Ensures logging is only initialized once
static INIT: Once = Once::new();

const CRATE_TARGET: &str = "uiregistry";

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum log level to display
    pub level: Level,

    /// Emit one JSON object per event instead of human-readable lines
    pub use_json: bool,

    /// Include the module target (e.g. `uiregistry::scan`) in logs
    pub include_target: bool,

    /// Include file and line number information
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            use_json: false,
            include_target: false,
            include_location: false,
        }
    }
}

impl LoggingConfig {
    pub fn with_level(level: Level) -> Self {
        Self {
            level,
            ..Default::default()
        }
    }

    /// Level from command-line flags.
    ///
    /// An explicit level wins; otherwise `-q` drops to errors only and each
    /// `-v` raises the base level one step (info, debug, trace).
    pub fn from_flags(explicit: Option<&str>, verbose: u8, quiet: bool) -> Self {
        let level = match explicit.and_then(parse_level) {
            Some(level) => level,
            None if quiet => Level::ERROR,
            None => match verbose {
                0 => Level::INFO,
                1 => Level::DEBUG,
                _ => Level::TRACE,
            },
        };
        Self::with_level(level)
    }

    /// Enables detailed output: targets and source locations
    pub fn detailed(mut self) -> Self {
        self.include_target = true;
        self.include_location = true;
        self
    }
}

/// Parses a log level, case-insensitively
pub fn parse_level(level_str: &str) -> Option<Level> {
    match level_str.to_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        _ => None,
    }
}

fn build_filter(level: Level) -> EnvFilter {
    let base = if env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new("warn")
    };

    match format!("{}={}", CRATE_TARGET, level).parse() {
        Ok(directive) => base.add_directive(directive),
        Err(_) => base,
    }
}

/// Installs the global subscriber. Later calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = build_filter(config.level);

        if config.use_json {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_writer(io::stderr)
                        .with_target(config.include_target)
                        .with_file(config.include_location)
                        .with_line_number(config.include_location),
                )
                .init();
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_writer(io::stderr)
                        .with_target(config.include_target)
                        .with_file(config.include_location)
                        .with_line_number(config.include_location),
                )
                .init();
        }
    });
}

/// Reads `REGISTRY_LOG_LEVEL` and `REGISTRY_LOG_JSON`
pub fn config_from_env() -> LoggingConfig {
    let level = env::var("REGISTRY_LOG_LEVEL")
        .ok()
        .and_then(|v| parse_level(&v))
        .unwrap_or(Level::INFO);

    let use_json = env::var("REGISTRY_LOG_JSON")
        .ok()
        .and_then(|v| v.parse::<bool>().ok())
        .unwrap_or(false);

    LoggingConfig {
        level,
        use_json,
        ..Default::default()
    }
}

pub fn init_from_env() {
    init_logging(config_from_env());
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use yare::parameterized;

    #[parameterized(
        trace = { "trace", Some(Level::TRACE) },
        debug_upper = { "DEBUG", Some(Level::DEBUG) },
        info_mixed = { "Info", Some(Level::INFO) },
        warn = { "warn", Some(Level::WARN) },
        error = { "error", Some(Level::ERROR) },
        invalid = { "loud", None },
        empty = { "", None },
    )]
    fn test_parse_level(input: &str, expected: Option<Level>) {
        assert_eq!(parse_level(input), expected);
    }

    #[parameterized(
        default = { None, 0, false, Level::INFO },
        one_verbose = { None, 1, false, Level::DEBUG },
        many_verbose = { None, 3, false, Level::TRACE },
        quiet = { None, 0, true, Level::ERROR },
        explicit_wins = { Some("warn"), 2, true, Level::WARN },
        invalid_explicit_ignored = { Some("loud"), 1, false, Level::DEBUG },
    )]
    fn test_from_flags(explicit: Option<&str>, verbose: u8, quiet: bool, expected: Level) {
        assert_eq!(LoggingConfig::from_flags(explicit, verbose, quiet).level, expected);
    }

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, Level::INFO);
        assert!(!config.use_json);
        assert!(!config.include_location);
    }

    #[test]
    fn test_detailed() {
        let config = LoggingConfig::with_level(Level::DEBUG).detailed();
        assert!(config.include_target);
        assert!(config.include_location);
    }

    #[test]
    #[serial]
    fn test_config_from_env() {
        std::env::set_var("REGISTRY_LOG_LEVEL", "debug");
        std::env::set_var("REGISTRY_LOG_JSON", "true");

        let config = config_from_env();

        std::env::remove_var("REGISTRY_LOG_LEVEL");
        std::env::remove_var("REGISTRY_LOG_JSON");

        assert_eq!(config.level, Level::DEBUG);
        assert!(config.use_json);
    }

    #[test]
    #[serial]
    fn test_config_from_env_defaults() {
        std::env::remove_var("REGISTRY_LOG_LEVEL");
        std::env::remove_var("REGISTRY_LOG_JSON");

        let config = config_from_env();
        assert_eq!(config.level, Level::INFO);
        assert!(!config.use_json);
    }
}
