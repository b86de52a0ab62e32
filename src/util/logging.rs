//! Structured logging setup
//!
//! Initialization for the `tracing` ecosystem: stderr output so generated
//! artifacts and reports on stdout stay clean, `RUST_LOG` respected when
//! set, and a process-wide guard so repeated init calls are harmless.

use std::env;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

/// Configuration for logging initialization.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: Level,
    /// JSON output for production log pipelines.
    pub use_json: bool,
    /// Include the module target (e.g., dockgen::detect) in log lines.
    pub with_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            use_json: false,
            with_target: true,
        }
    }
}

/// Initialize logging with defaults. Safe to call more than once.
pub fn init_default() {
    init_logging(LoggingConfig::default());
}

/// Initialize from `DOCKGEN_LOG_LEVEL` / `DOCKGEN_LOG_JSON`.
pub fn init_from_env() {
    let level = env::var("DOCKGEN_LOG_LEVEL")
        .map(|v| parse_level(&v))
        .unwrap_or(Level::INFO);
    let use_json = env::var("DOCKGEN_LOG_JSON")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    init_logging(LoggingConfig {
        level,
        use_json,
        ..Default::default()
    });
}

pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut filter = EnvFilter::from_default_env();
        if env::var("RUST_LOG").is_err() {
            filter = filter
                .add_directive(format!("dockgen={}", config.level).parse().unwrap())
                .add_directive("hyper=warn".parse().unwrap())
                .add_directive("reqwest=warn".parse().unwrap());
        }

        if config.use_json {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_target(config.with_target)
                        .with_writer(std::io::stderr),
                )
                .init();
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_target(config.with_target)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    });
}

/// Parse a level string, falling back to INFO with a notice on stderr.
pub fn parse_level(level_str: &str) -> Level {
    match level_str.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
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
