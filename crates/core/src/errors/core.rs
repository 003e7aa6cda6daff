use crate::config::ConfigError;
use thiserror::Error;

/// Core error type for the scaffold generator
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Codegen error: {message}")]
    Codegen { message: String },

    #[error("Template error: {message}")]
    Template { message: String },

    #[error("Model not found: {identifier}")]
    ModelNotFound {
        identifier: String,
        hint: Option<String>,
    },
}

impl CoreError {
    /// Create a new validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a new codegen error
    pub fn codegen(message: impl Into<String>) -> Self {
        Self::Codegen {
            message: message.into(),
        }
    }

    /// Create a new template error
    pub fn template(message: impl Into<String>) -> Self {
        Self::Template {
            message: message.into(),
        }
    }

    /// Create a new model-not-found error
    pub fn model_not_found(identifier: impl Into<String>) -> Self {
        Self::ModelNotFound {
            identifier: identifier.into(),
            hint: None,
        }
    }

    /// Add a hint to a model-not-found error
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        if let Self::ModelNotFound { hint: ref mut h, .. } = self {
            *h = Some(hint.into());
        }
        self
    }

    /// Hint attached to the error, if any
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::ModelNotFound { hint, .. } => hint.as_deref(),
            _ => None,
        }
    }

    /// Check if the error is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Check if the error is a configuration error
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }

    /// Check if the error came from the filesystem
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}

impl From<ConfigError> for CoreError {
    fn from(error: ConfigError) -> Self {
        match error {
            ConfigError::Io(e) => Self::Io(e),
            other => Self::configuration(other.to_string()),
        }
    }
}

/// Error type shared by the scaffold crates
pub type ScaffoldError = CoreError;
