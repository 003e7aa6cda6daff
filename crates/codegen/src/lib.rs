pub mod actions;
pub mod authorization;
pub mod context;
pub mod namespace;
pub mod naming;
pub mod request;
pub mod request_set;
pub mod templates;
pub mod writer;

pub use actions::{ability_for, parse_actions, DEFAULT_ACTIONS};
pub use authorization::{AuthorizationResolver, ALLOW_ALL};
pub use context::GenerationContext;
pub use namespace::Namespace;
pub use request::RequestFile;
pub use request_set::{RequestSet, RequestSetOptions};
pub use templates::{TemplateContext, TemplateEngine, TemplateId, TemplateKind, Variant};
pub use writer::{CodeWriter, GenerationReport, WriteOutcome};

use scaffold_core::{CoreError, Manifest, ModelRegistry, PolicyRegistry, ScaffoldConfig};

/// Entry point used by the command layer: resolves models from the manifest
/// and generates their request sets.
pub struct RequestGenerator {
    context: GenerationContext,
    models: ModelRegistry,
    policies: PolicyRegistry,
}

impl RequestGenerator {
    pub fn new(config: ScaffoldConfig, manifest: &Manifest) -> Result<Self, CoreError> {
        let (models, policies) = manifest.registries();
        Self::from_registries(config, models, policies)
    }

    pub fn from_registries(
        config: ScaffoldConfig,
        models: ModelRegistry,
        policies: PolicyRegistry,
    ) -> Result<Self, CoreError> {
        Ok(Self {
            context: GenerationContext::new(config)?,
            models,
            policies,
        })
    }

    pub fn context(&self) -> &GenerationContext {
        &self.context
    }

    pub fn models(&self) -> &ModelRegistry {
        &self.models
    }

    pub fn policies(&self) -> &PolicyRegistry {
        &self.policies
    }

    /// Build the request set for a model given by full or bare class name
    pub fn request_set(
        &self,
        identifier: &str,
        options: RequestSetOptions,
    ) -> Result<RequestSet<'_>, CoreError> {
        let model_namespace = self.context.config().model_base();
        let model = self
            .models
            .resolve(identifier, &model_namespace)
            .ok_or_else(|| {
                CoreError::model_not_found(identifier).with_hint(format!(
                    "Declare it in the model manifest, or use a name under {}",
                    model_namespace
                ))
            })?;
        let policy = self.policies.policy_for(model.class_name()).cloned();

        Ok(RequestSet::new(&self.context, model.clone(), policy, options))
    }

    pub fn generate(
        &self,
        identifier: &str,
        options: RequestSetOptions,
    ) -> Result<GenerationReport, CoreError> {
        self.request_set(identifier, options)?.save()
    }
}
