use crate::actions::{ability_for, DEFAULT_ACTIONS};
use crate::authorization::AuthorizationResolver;
use crate::context::GenerationContext;
use crate::namespace::Namespace;
use crate::naming::to_pascal_case;
use crate::request::RequestFile;
use crate::templates::{TemplateContext, TemplateId, TemplateKind, Variant};
use crate::writer::GenerationReport;
use scaffold_core::{CoreError, ModelRegistry, ModelSpec, PolicyRegistry, PolicySpec};
use std::path::PathBuf;

/// What to generate for a model: which actions, which variant, which folder
#[derive(Debug, Clone, Default)]
pub struct RequestSetOptions {
    pub actions: Vec<String>,
    pub api: bool,
    pub folder: Option<String>,
}

impl RequestSetOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn only<I, S>(mut self, actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.actions = actions.into_iter().map(Into::into).collect();
        self
    }

    pub fn api(mut self, api: bool) -> Self {
        self.api = api;
        self
    }

    pub fn folder(mut self, folder: impl Into<String>) -> Self {
        self.folder = Some(folder.into());
        self
    }
}

/// The request classes of one model, one per action.
///
/// Namespace and folder are fixed at construction; [`RequestSet::save`]
/// writes every class whose file does not exist yet.
pub struct RequestSet<'a> {
    ctx: &'a GenerationContext,
    model: ModelSpec,
    policy: Option<PolicySpec>,
    actions: Vec<String>,
    variant: Variant,
    folder_name: String,
    namespace: Namespace,
}

impl<'a> RequestSet<'a> {
    pub fn new(
        ctx: &'a GenerationContext,
        model: ModelSpec,
        policy: Option<PolicySpec>,
        options: RequestSetOptions,
    ) -> Self {
        let actions = if options.actions.is_empty() {
            DEFAULT_ACTIONS.iter().map(|action| action.to_string()).collect()
        } else {
            options.actions
        };

        let folder_name = options
            .folder
            .filter(|folder| !folder.trim().is_empty())
            .unwrap_or_else(|| model.table_name().to_string());

        let namespace = ctx
            .request_namespace(options.api)
            .child(to_pascal_case(&folder_name));

        Self {
            ctx,
            model,
            policy,
            actions,
            variant: Variant::from_api(options.api),
            folder_name,
            namespace,
        }
    }

    /// Rebind to another model, looked up by fully qualified class name or by
    /// bare name under the configured model namespace. The policy is looked
    /// up again for the new model.
    ///
    /// An unknown identifier leaves the set unchanged. Namespace and folder
    /// keep the values computed at construction.
    pub fn with_model(
        mut self,
        identifier: &str,
        models: &ModelRegistry,
        policies: &PolicyRegistry,
    ) -> Self {
        if identifier.trim().is_empty() {
            return self;
        }

        let model_namespace = self.ctx.config().model_base();
        match models.resolve(identifier, &model_namespace) {
            Some(model) => {
                self.policy = policies.policy_for(model.class_name()).cloned();
                self.model = model.clone();
            }
            None => {
                tracing::warn!(
                    identifier,
                    model_namespace = %model_namespace,
                    "model not found, keeping {}",
                    self.model.class_name()
                );
            }
        }
        self
    }

    pub fn model(&self) -> &ModelSpec {
        &self.model
    }

    pub fn policy(&self) -> Option<&PolicySpec> {
        self.policy.as_ref()
    }

    pub fn actions(&self) -> &[String] {
        &self.actions
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn folder_name(&self) -> &str {
        &self.folder_name
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// Directory all classes of the set are written to
    pub fn directory(&self) -> PathBuf {
        self.namespace.to_path(&self.ctx.config().base_path)
    }

    /// Authorization expression for a policy ability
    pub fn authorization(&self, ability: &str) -> String {
        AuthorizationResolver::new(&self.model, self.policy.as_ref()).resolve(ability)
    }

    /// Render a class from the variant's generic template
    pub fn render(&self, class_name: &str, authorization: &str) -> Result<String, CoreError> {
        let context = TemplateContext::new(self.namespace.to_string(), class_name, authorization);
        self.ctx
            .engine()
            .render(TemplateId::new(self.variant, TemplateKind::Generic), &context)
    }

    pub fn save(&self) -> Result<GenerationReport, CoreError> {
        self.ctx.writer().ensure_dir(&self.directory())?;
        let mut report = GenerationReport::default();

        for action in &self.actions {
            let class_name = to_pascal_case(action);
            if class_name.is_empty() {
                tracing::warn!(action = %action, "action has no usable class name, skipping");
                continue;
            }

            let path = self.ctx.class_path(&self.namespace, &class_name);
            if path.exists() {
                tracing::debug!(action = %action, path = %path.display(), "request exists, skipping");
                report.skipped.push(path);
                continue;
            }

            let ability = ability_for(action);
            let authorization = self.authorization(ability);
            tracing::debug!(
                action = %action,
                ability,
                authorization = %authorization,
                "resolved authorization"
            );

            let outcome = match action.as_str() {
                "store" | "update" => {
                    let sub_path = format!("{}/{}", to_pascal_case(&self.folder_name), class_name);
                    RequestFile::new(self.ctx, &self.model, &sub_path, self.variant.is_api())
                        .with_authorization(authorization)
                        .save()?
                }
                _ => {
                    let content = self.render(&class_name, &authorization)?;
                    self.ctx.writer().write_new(&path, &content)?
                }
            };
            report.record(path, outcome);
        }

        tracing::info!(
            model = self.model.class_name(),
            namespace = %self.namespace,
            written = report.written.len(),
            skipped = report.skipped.len(),
            "request generation finished"
        );
        Ok(report)
    }
}
