use tracing::subscriber;
use tracing_subscriber::{EnvFilter, Layer, filter::Directive, layer::SubscriberExt};

use crate::{EngineResult, LogFormat, error::EngineError};

/// Crates whose verbosity `JQ_LOG_LEVEL` controls.
const LOG_TARGETS: &[&str] = &["join_query", "join_query_engine"];

/// An installer for a global logger. Logs go to stderr, stdout carries the rewritten context.
#[derive(Debug, Clone)]
pub struct Logger {
    log_format: LogFormat,
    log_level: Option<String>,
}

impl Logger {
    /// Initialize a new global logger installer.
    pub fn new() -> Self {
        Self {
            log_format: LogFormat::Json,
            log_level: std::env::var("JQ_LOG_LEVEL").ok(),
        }
    }

    /// Sets the STDERR log output format. Default: Json.
    pub fn log_format(&mut self, log_format: LogFormat) {
        self.log_format = log_format;
    }

    /// Overrides the level read from `JQ_LOG_LEVEL`.
    pub fn log_level(&mut self, log_level: impl Into<String>) {
        self.log_level = Some(log_level.into());
    }

    /// Install logger as a global. Can be called only once per application instance.
    pub fn install(&self) -> EngineResult<()> {
        let filter = create_env_filter(self.log_level.as_deref())?;

        let fmt_layer = match self.log_format {
            LogFormat::Text => tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(filter)
                .boxed(),
            LogFormat::Json => tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_filter(filter)
                .boxed(),
        };

        let subscriber = tracing_subscriber::registry().with(fmt_layer);

        subscriber::set_global_default(subscriber).map_err(EngineError::configuration)
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

fn create_env_filter(log_level: Option<&str>) -> EngineResult<EnvFilter> {
    let mut filter = EnvFilter::from_default_env();

    if let Some(level) = log_level {
        for target in LOG_TARGETS {
            let directive: Directive = format!("{target}={level}")
                .parse()
                .map_err(|err| EngineError::configuration(format!("Invalid JQ_LOG_LEVEL `{level}`: {err}")))?;

            filter = filter.add_directive(directive);
        }
    }

    Ok(filter)
}
