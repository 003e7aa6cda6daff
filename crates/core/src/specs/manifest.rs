use crate::config::is_identifier;
use crate::specs::{ModelRegistry, ModelSpec, PolicyRegistry, PolicySpec};
use crate::CoreError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// YAML description of the application's models and their policies
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub models: Vec<ModelEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelEntry {
    #[serde(flatten)]
    pub model: ModelSpec,
    #[serde(default)]
    pub policy: Option<PolicySpec>,
}

impl Manifest {
    pub fn from_yaml(yaml: &str) -> Result<Self, CoreError> {
        let manifest: Self = serde_yaml::from_str(yaml)?;
        manifest.validate()?;
        Ok(manifest)
    }

    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let content = std::fs::read_to_string(path)?;
        let manifest = Self::from_yaml(&content)?;
        tracing::debug!(
            path = %path.display(),
            models = manifest.models.len(),
            "loaded model manifest"
        );
        Ok(manifest)
    }

    /// Reject entries that could not name a class or a table, and duplicates
    pub fn validate(&self) -> Result<(), CoreError> {
        let mut seen = HashSet::new();

        for entry in &self.models {
            let class = entry.model.class_name.trim_start_matches('\\');
            if class.is_empty() || !class.split('\\').all(is_identifier) {
                return Err(CoreError::validation(format!(
                    "Invalid model class name: '{}'",
                    entry.model.class_name
                )));
            }
            if entry.model.table.trim().is_empty() {
                return Err(CoreError::validation(format!(
                    "Model '{}' has no table",
                    class
                )));
            }
            if !seen.insert(class.to_string()) {
                return Err(CoreError::validation(format!(
                    "Model '{}' is declared more than once",
                    class
                )));
            }
        }

        Ok(())
    }

    /// Split the manifest into the model and policy lookups the generator uses
    pub fn registries(&self) -> (ModelRegistry, PolicyRegistry) {
        let mut models = ModelRegistry::new();
        let mut policies = PolicyRegistry::new();

        for entry in &self.models {
            let model = ModelSpec::new(&entry.model.class_name, &entry.model.table);
            if let Some(policy) = &entry.policy {
                policies.register(
                    model.class_name(),
                    PolicySpec::new(&policy.class_name, policy.abilities.iter().cloned()),
                );
            }
            models.register(model);
        }

        (models, policies)
    }
}
