//! Permission-check expressions embedded in generated `authorize()` methods.

use scaffold_core::{ModelSpec, PolicySpec};

/// Expression used when no permission check applies
pub const ALLOW_ALL: &str = "true";

/// Abilities checked against the model class rather than a routed instance
pub const COLLECTION_ABILITIES: [&str; 3] = ["index", "create", "store"];

/// Build the authorization expression for `ability`.
///
/// Falls back to [`ALLOW_ALL`] when there is no policy or the policy does not
/// declare the ability. Collection abilities check against the model class;
/// every other ability checks against the instance bound to the route under
/// the model's lower-cased short name.
pub fn resolve(ability: &str, policy: Option<&PolicySpec>, model: &ModelSpec) -> String {
    match policy {
        Some(policy) if policy.declares(ability) => {
            let subject = if is_collection_ability(ability) {
                format!("\\{}::class", model.class_name())
            } else {
                format!("$this->route('{}')", model.route_key())
            };
            format!("auth()->user()->can('{}', {})", ability, subject)
        }
        _ => ALLOW_ALL.to_string(),
    }
}

pub fn is_collection_ability(ability: &str) -> bool {
    COLLECTION_ABILITIES.contains(&ability)
}

/// Borrowed model/policy pair, so callers resolve several abilities without
/// threading both through every call.
#[derive(Debug, Clone, Copy)]
pub struct AuthorizationResolver<'a> {
    model: &'a ModelSpec,
    policy: Option<&'a PolicySpec>,
}

impl<'a> AuthorizationResolver<'a> {
    pub fn new(model: &'a ModelSpec, policy: Option<&'a PolicySpec>) -> Self {
        Self { model, policy }
    }

    pub fn resolve(&self, ability: &str) -> String {
        resolve(ability, self.policy, self.model)
    }
}
