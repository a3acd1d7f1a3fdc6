//! Logging setup for the `gridline` binary
//!
//! Events go to stderr so stdout only carries the rendered grid (or its
//! JSON form). `RUST_LOG` takes precedence over the configured filter.

use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Emit one JSON object per event instead of human-readable lines
    pub json: bool,

    /// Whether to include file/line information in logs
    pub include_location: bool,

    /// Filter used when `RUST_LOG` is not set
    pub default_filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            json: false,
            include_location: false,
            default_filter: "warn".to_string(),
        }
    }
}

impl LoggingConfig {
    /// `-v` raises the grid crates to debug
    pub fn verbose() -> Self {
        Self {
            include_location: cfg!(debug_assertions),
            default_filter: "info,gridline_cli=debug,gridline_engine=debug,gridline_core=debug"
                .to_string(),
            ..Self::default()
        }
    }
}

/// Install the global subscriber
pub fn init(config: LoggingConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.default_filter))?;

    let layer = if config.json {
        fmt::layer()
            .with_target(true)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .with_span_events(FmtSpan::NONE)
            .with_ansi(false)
            .json()
            .with_writer(std::io::stderr)
            .with_filter(env_filter)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .with_span_events(FmtSpan::NONE)
            .with_writer(std::io::stderr)
            .with_filter(env_filter)
            .boxed()
    };

    tracing_subscriber::registry().with(layer).try_init()?;

    tracing::debug!(
        filter = %config.default_filter,
        json = config.json,
        "Logging initialized"
    );
    Ok(())
}
