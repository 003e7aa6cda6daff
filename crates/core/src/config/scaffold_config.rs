use crate::config::{validate_namespace, ConfigError, ConfigSource, ConfigSources};
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

/// Generator configuration.
///
/// Namespaces are stored as written by the user; use [`ScaffoldConfig::qualify`]
/// (or the `*_base` helpers) to get them fully qualified under the root
/// namespace.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScaffoldConfig {
    /// Root application namespace, e.g. `App`
    pub root_namespace: String,
    /// Base namespace for web request classes
    pub request_namespace: String,
    /// Base namespace for API request classes
    pub api_request_namespace: String,
    /// Namespace bare model names are resolved against
    pub model_namespace: String,
    /// Project root that namespace directories are created under
    pub base_path: PathBuf,
    /// Extension of generated files, without the dot
    pub file_extension: String,
    /// Optional directory with template overrides
    pub template_path: Option<PathBuf>,

    #[serde(skip)]
    sources: ConfigSources,
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            root_namespace: "App".to_string(),
            request_namespace: "Http\\Requests".to_string(),
            api_request_namespace: "Http\\Requests\\Api".to_string(),
            model_namespace: "Models".to_string(),
            base_path: PathBuf::from("."),
            file_extension: "php".to_string(),
            template_path: None,
            sources: ConfigSources::default(),
        }
    }
}

const ENV_ROOT_NAMESPACE: &str = "SCAFFOLD_ROOT_NAMESPACE";
const ENV_REQUEST_NAMESPACE: &str = "SCAFFOLD_REQUEST_NAMESPACE";
const ENV_API_REQUEST_NAMESPACE: &str = "SCAFFOLD_API_REQUEST_NAMESPACE";
const ENV_MODEL_NAMESPACE: &str = "SCAFFOLD_MODEL_NAMESPACE";
const ENV_BASE_PATH: &str = "SCAFFOLD_BASE_PATH";
const ENV_FILE_EXTENSION: &str = "SCAFFOLD_FILE_EXTENSION";
const ENV_TEMPLATE_PATH: &str = "SCAFFOLD_TEMPLATE_PATH";

impl ScaffoldConfig {
    /// Load configuration from defaults plus `SCAFFOLD_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from YAML. Missing keys keep their defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a YAML file and apply environment overrides on top of it
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = serde_yaml::from_str(&content)?;

        let origin = path.display().to_string();
        let value: serde_yaml::Value = serde_yaml::from_str(&content)?;
        if let Some(map) = value.as_mapping() {
            for field in Self::FIELDS.iter().copied() {
                if map.contains_key(field) {
                    config.sources.record(field, ConfigSource::File(origin.clone()));
                }
            }
        }

        config.apply_env();
        config.validate()?;
        tracing::debug!(path = %origin, "loaded scaffold configuration");
        for (field, source) in config.sources.iter() {
            tracing::debug!(field, source = %source, "configuration override");
        }
        Ok(config)
    }

    const FIELDS: &'static [&'static str] = &[
        "root_namespace",
        "request_namespace",
        "api_request_namespace",
        "model_namespace",
        "base_path",
        "file_extension",
        "template_path",
    ];

    fn apply_env(&mut self) {
        if let Some(value) = read_env(ENV_ROOT_NAMESPACE) {
            self.root_namespace = value;
            self.sources.record("root_namespace", ConfigSource::EnvVar(ENV_ROOT_NAMESPACE.into()));
        }
        if let Some(value) = read_env(ENV_REQUEST_NAMESPACE) {
            self.request_namespace = value;
            self.sources.record("request_namespace", ConfigSource::EnvVar(ENV_REQUEST_NAMESPACE.into()));
        }
        if let Some(value) = read_env(ENV_API_REQUEST_NAMESPACE) {
            self.api_request_namespace = value;
            self.sources.record(
                "api_request_namespace",
                ConfigSource::EnvVar(ENV_API_REQUEST_NAMESPACE.into()),
            );
        }
        if let Some(value) = read_env(ENV_MODEL_NAMESPACE) {
            self.model_namespace = value;
            self.sources.record("model_namespace", ConfigSource::EnvVar(ENV_MODEL_NAMESPACE.into()));
        }
        if let Some(value) = read_env(ENV_BASE_PATH) {
            self.base_path = PathBuf::from(value);
            self.sources.record("base_path", ConfigSource::EnvVar(ENV_BASE_PATH.into()));
        }
        if let Some(value) = read_env(ENV_FILE_EXTENSION) {
            self.file_extension = value;
            self.sources.record("file_extension", ConfigSource::EnvVar(ENV_FILE_EXTENSION.into()));
        }
        if let Some(value) = read_env(ENV_TEMPLATE_PATH) {
            self.template_path = Some(PathBuf::from(value));
            self.sources.record("template_path", ConfigSource::EnvVar(ENV_TEMPLATE_PATH.into()));
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let root = trim_namespace(&self.root_namespace);
        if root.is_empty() {
            return Err(ConfigError::missing_required(
                "root_namespace",
                "Set root_namespace (e.g. App) or SCAFFOLD_ROOT_NAMESPACE",
            ));
        }
        validate_namespace("root_namespace", &self.root_namespace)?;
        validate_namespace("request_namespace", &self.request_namespace)?;
        validate_namespace("api_request_namespace", &self.api_request_namespace)?;
        validate_namespace("model_namespace", &self.model_namespace)?;

        if self.request_base(false) == self.request_base(true) {
            return Err(ConfigError::validation_failed(format!(
                "request_namespace and api_request_namespace both resolve to {}",
                self.request_base(false)
            )));
        }

        if self.file_extension.is_empty() {
            return Err(ConfigError::missing_required(
                "file_extension",
                "Set file_extension (e.g. php) or SCAFFOLD_FILE_EXTENSION",
            ));
        }
        if !self.file_extension.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ConfigError::invalid_value(
                "file_extension",
                &self.file_extension,
                "an alphanumeric extension without a leading dot",
            ));
        }

        if let Some(path) = &self.template_path {
            if !path.is_dir() {
                return Err(ConfigError::invalid_value(
                    "template_path",
                    path.display().to_string(),
                    "an existing directory",
                ));
            }
        }

        Ok(())
    }

    /// Source of each configuration field
    pub fn config_sources(&self) -> &ConfigSources {
        &self.sources
    }

    /// The root namespace without surrounding separators
    pub fn root(&self) -> String {
        trim_namespace(&self.root_namespace)
    }

    /// Qualify a namespace under the root namespace.
    ///
    /// `Http\Requests` becomes `App\Http\Requests`; a namespace already under
    /// the root is returned trimmed. `/` is accepted as a separator.
    pub fn qualify(&self, namespace: &str) -> String {
        let root = self.root();
        let ns = trim_namespace(namespace);

        if ns.is_empty() || ns == root {
            return root;
        }
        if ns.starts_with(&format!("{}\\", root)) {
            return ns;
        }
        format!("{}\\{}", root, ns)
    }

    /// Fully qualified base namespace for request classes
    pub fn request_base(&self, api: bool) -> String {
        if api {
            self.qualify(&self.api_request_namespace)
        } else {
            self.qualify(&self.request_namespace)
        }
    }

    /// Fully qualified namespace for models
    pub fn model_base(&self) -> String {
        self.qualify(&self.model_namespace)
    }

    /// Override the project root, e.g. from a command line flag
    pub fn with_base_path(mut self, base_path: impl Into<PathBuf>) -> Self {
        self.base_path = base_path.into();
        self
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Normalize separators to `\` and strip leading/trailing ones
pub fn trim_namespace(namespace: &str) -> String {
    namespace
        .trim()
        .trim_matches(|c| c == '\\' || c == '/')
        .replace('/', "\\")
}
