use thiserror::Error;

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required field: {field}. {hint}")]
    MissingRequired { field: String, hint: String },

    #[error("Invalid value for field '{field}': '{value}'. Expected: {expected}")]
    InvalidValue {
        field: String,
        value: String,
        expected: String,
    },

    #[error("Configuration validation failed: {message}")]
    ValidationFailed { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl ConfigError {
    /// Create a missing required field error
    pub fn missing_required(field: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::MissingRequired {
            field: field.into(),
            hint: hint.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(
        field: impl Into<String>,
        value: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            field: field.into(),
            value: value.into(),
            expected: expected.into(),
        }
    }

    /// Create a validation failed error
    pub fn validation_failed(message: impl Into<String>) -> Self {
        Self::ValidationFailed {
            message: message.into(),
        }
    }
}

/// Check that a namespace is made of `\`-separated identifier segments.
///
/// Leading and trailing separators are tolerated, since they are trimmed
/// before use.
pub fn validate_namespace(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim_matches(|c| c == '\\' || c == '/');
    if trimmed.is_empty() {
        return Ok(());
    }

    let valid = trimmed
        .split(['\\', '/'])
        .all(is_identifier);

    if valid {
        Ok(())
    } else {
        Err(ConfigError::invalid_value(
            field,
            value,
            "namespace segments made of letters, digits and underscores",
        ))
    }
}

/// True when `segment` could be a PHP class or namespace segment
pub fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_namespace() {
        assert!(validate_namespace("ns", "Http\\Requests").is_ok());
        assert!(validate_namespace("ns", "/Http/Requests/").is_ok());
        assert!(validate_namespace("ns", "").is_ok());
        assert!(validate_namespace("ns", "Http\\\\Requests").is_err());
        assert!(validate_namespace("ns", "Http\\9Requests").is_err());
        assert!(validate_namespace("ns", "Http Requests").is_err());
    }

    #[test]
    fn test_invalid_value_message() {
        let err = ConfigError::invalid_value("file_extension", ".php", "an extension without a dot");
        assert_eq!(
            err.to_string(),
            "Invalid value for field 'file_extension': '.php'. Expected: an extension without a dot"
        );
    }
}
