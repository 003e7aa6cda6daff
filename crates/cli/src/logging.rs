//! Log output for the command line tool.
//!
//! Logs go to stderr so stdout only carries the generation report.

use std::io;
use tracing_subscriber::{fmt::Layer, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is not set, e.g. `scaffold=info`
    pub env_filter: String,
    /// Emit one JSON object per event instead of plain text
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: "scaffold=info,scaffold_codegen=info,scaffold_core=warn".to_string(),
            json_format: false,
        }
    }
}

impl LoggingConfig {
    /// `--verbose` turns on per-action decisions
    pub fn verbose() -> Self {
        Self {
            env_filter: "scaffold=debug,scaffold_codegen=debug,scaffold_core=debug".to_string(),
            ..Self::default()
        }
    }

    /// `--quiet` keeps warnings and errors only
    pub fn quiet() -> Self {
        Self {
            env_filter: "warn".to_string(),
            ..Self::default()
        }
    }

    pub fn with_json(mut self, json_format: bool) -> Self {
        self.json_format = json_format;
        self
    }
}

pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.env_filter))?;

    if config.json_format {
        tracing_subscriber::registry()
            .with(filter)
            .with(Layer::new().with_writer(io::stderr).json())
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(Layer::new().with_writer(io::stderr).with_target(false))
            .try_init()?;
    }

    tracing::debug!(filter = %config.env_filter, json = config.json_format, "logging initialized");
    Ok(())
}
