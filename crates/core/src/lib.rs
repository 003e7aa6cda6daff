pub mod config;
pub mod errors;
pub mod specs;

pub use config::{ConfigError, ConfigSource, ConfigSources, ScaffoldConfig};
pub use errors::{CoreError, ScaffoldError};
pub use specs::{Manifest, ModelEntry, ModelRegistry, ModelSpec, PolicyRegistry, PolicySpec};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get the generator version
pub fn version() -> &'static str {
    VERSION
}
