//! Structured logging setup
//!
//! Logs go to stderr so that command output on stdout stays clean. The
//! subscriber is installed once per process; later calls are ignored.
//!
//! Environment:
//! - `PROMPTPIPE_LOG_LEVEL`: trace, debug, info, warn or error
//! - `PROMPTPIPE_LOG_JSON`: `true` for one JSON object per line
//! - `RUST_LOG`: full filter directives, overrides the level when set
//!
//! ```no_run
//! use promptpipe::util::logging;
//!
//! logging::init_from_env();
//! tracing::info!(config = "conf.yaml", "Starting run");
//! ```

use std::env;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

pub const LOG_LEVEL_ENV: &str = "PROMPTPIPE_LOG_LEVEL";
pub const LOG_JSON_ENV: &str = "PROMPTPIPE_LOG_JSON";

/// Crates whose chatter is capped at `warn` unless `RUST_LOG` says otherwise
const NOISY_TARGETS: &[&str] = &["h2", "hyper", "hyper_util", "reqwest", "genai"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: Level,
    pub use_json: bool,
    /// Include the module path (e.g. `promptpipe::pipeline`) in each line
    pub include_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            use_json: false,
            include_target: true,
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

    /// Reads `PROMPTPIPE_LOG_LEVEL` and `PROMPTPIPE_LOG_JSON`
    pub fn from_env() -> Self {
        let level = env::var(LOG_LEVEL_ENV)
            .map(|value| parse_level(&value))
            .unwrap_or(Level::INFO);

        let use_json = env::var(LOG_JSON_ENV)
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(false);

        Self {
            level,
            use_json,
            ..Default::default()
        }
    }

    /// Applies command-line flags on top of the environment settings.
    /// An explicit level wins over `verbose`, which wins over `quiet`.
    pub fn from_cli(log_level: Option<&str>, verbose: bool, quiet: bool) -> Self {
        let mut config = Self::from_env();
        if let Some(level) = log_level {
            config.level = parse_level(level);
        } else if verbose {
            config.level = Level::DEBUG;
        } else if quiet {
            config.level = Level::ERROR;
        }
        config
    }

    fn filter(&self) -> EnvFilter {
        if env::var("RUST_LOG").is_ok() {
            return EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(self.level.as_str()));
        }

        let mut directives = vec![format!("promptpipe={}", self.level)];
        directives.extend(NOISY_TARGETS.iter().map(|target| format!("{}=warn", target)));
        EnvFilter::new(format!("{},{}", Level::WARN, directives.join(",")))
    }
}

/// Parses a level name case-insensitively, falling back to `info`
pub fn parse_level(level_str: &str) -> Level {
    match level_str.trim().to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" | "warning" => Level::WARN,
        "error" => Level::ERROR,
        _ => {
            eprintln!(
                "Invalid log level '{}', defaulting to INFO. Valid levels: trace, debug, info, warn, error",
                level_str
            );
            Level::INFO
        }
    }
}

pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = config.filter();

        if config.use_json {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_target(config.include_target)
                        .with_writer(std::io::stderr),
                )
                .init();
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_target(config.include_target)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    });
}

pub fn init_from_env() {
    init_logging(LoggingConfig::from_env());
}
