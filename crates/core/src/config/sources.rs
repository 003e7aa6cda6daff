use std::collections::BTreeMap;

/// Where a configuration value came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Built-in default
    Default,
    /// Loaded from a YAML configuration file
    File(String),
    /// Overridden by an environment variable
    EnvVar(String),
}

impl ConfigSource {
    pub fn is_default(&self) -> bool {
        matches!(self, ConfigSource::Default)
    }

    pub fn is_env_var(&self) -> bool {
        matches!(self, ConfigSource::EnvVar(_))
    }

    pub fn description(&self) -> String {
        match self {
            ConfigSource::Default => "default".to_string(),
            ConfigSource::File(path) => format!("file {}", path),
            ConfigSource::EnvVar(var) => format!("environment variable {}", var),
        }
    }
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Per-field source record. Fields never recorded are reported as defaults.
#[derive(Debug, Clone, Default)]
pub struct ConfigSources {
    entries: BTreeMap<&'static str, ConfigSource>,
}

impl ConfigSources {
    pub fn record(&mut self, field: &'static str, source: ConfigSource) {
        self.entries.insert(field, source);
    }

    pub fn get(&self, field: &str) -> ConfigSource {
        self.entries
            .get(field)
            .cloned()
            .unwrap_or(ConfigSource::Default)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &ConfigSource)> {
        self.entries.iter().map(|(field, source)| (*field, source))
    }
}
