use crate::specs::model::normalize_class;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Capability descriptor of an authorization policy: the policy class and
/// the permission-check methods (abilities) it declares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicySpec {
    #[serde(rename = "class")]
    pub class_name: String,
    #[serde(default)]
    pub abilities: BTreeSet<String>,
}

impl PolicySpec {
    pub fn new<I, S>(class_name: impl Into<String>, abilities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            class_name: normalize_class(&class_name.into()),
            abilities: abilities.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether the policy has a permission check named `ability`
    pub fn declares(&self, ability: &str) -> bool {
        self.abilities.contains(ability)
    }
}

/// Policies keyed by the class name of the model they guard
#[derive(Debug, Clone, Default)]
pub struct PolicyRegistry {
    policies: BTreeMap<String, PolicySpec>,
}

impl PolicyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, model_class: &str, policy: PolicySpec) {
        self.policies.insert(normalize_class(model_class), policy);
    }

    pub fn policy_for(&self, model_class: &str) -> Option<&PolicySpec> {
        self.policies.get(&normalize_class(model_class))
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }
}
