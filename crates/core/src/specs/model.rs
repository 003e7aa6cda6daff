use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A data model the generator scaffolds requests for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSpec {
    /// Fully qualified class name, e.g. `App\Models\Post`
    #[serde(rename = "class")]
    pub class_name: String,
    /// Backing table, e.g. `posts`
    pub table: String,
}

impl ModelSpec {
    pub fn new(class_name: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            class_name: normalize_class(&class_name.into()),
            table: table.into(),
        }
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn table_name(&self) -> &str {
        &self.table
    }

    /// Class name without its namespace (`App\Models\Post` → `Post`)
    pub fn short_name(&self) -> &str {
        self.class_name
            .rsplit('\\')
            .next()
            .unwrap_or(&self.class_name)
    }

    /// Route parameter the model is bound to (`Post` → `post`)
    pub fn route_key(&self) -> String {
        self.short_name().to_lowercase()
    }
}

pub(crate) fn normalize_class(class_name: &str) -> String {
    class_name.trim().trim_start_matches('\\').to_string()
}

/// Known models keyed by fully qualified class name
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    models: BTreeMap<String, ModelSpec>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a model, replacing any previous entry for the same class
    pub fn register(&mut self, model: ModelSpec) {
        self.models.insert(model.class_name.clone(), model);
    }

    pub fn get(&self, class_name: &str) -> Option<&ModelSpec> {
        self.models.get(&normalize_class(class_name))
    }

    /// Resolve a fully qualified class name, or a bare name relative to
    /// `model_namespace`. Returns `None` when neither is registered.
    pub fn resolve(&self, identifier: &str, model_namespace: &str) -> Option<&ModelSpec> {
        let identifier = normalize_class(identifier);
        if identifier.is_empty() {
            return None;
        }

        self.models.get(&identifier).or_else(|| {
            let namespace = model_namespace.trim_matches('\\');
            let qualified = if namespace.is_empty() {
                identifier.clone()
            } else {
                format!("{}\\{}", namespace, identifier)
            };
            self.models.get(&qualified)
        })
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

impl FromIterator<ModelSpec> for ModelRegistry {
    fn from_iter<I: IntoIterator<Item = ModelSpec>>(iter: I) -> Self {
        let mut registry = Self::new();
        for model in iter {
            registry.register(model);
        }
        registry
    }
}
