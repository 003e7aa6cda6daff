use crate::authorization::ALLOW_ALL;
use crate::context::GenerationContext;
use crate::namespace::Namespace;
use crate::naming::to_pascal_case;
use crate::templates::{TemplateContext, TemplateId, TemplateKind, Variant};
use crate::writer::WriteOutcome;
use scaffold_core::{CoreError, ModelSpec};
use std::path::PathBuf;

/// A single request class, addressed by a sub-path such as `Posts/Store`.
///
/// Leading segments of the sub-path become namespace segments under the
/// request base namespace; the last one is the class name.
pub struct RequestFile<'a> {
    ctx: &'a GenerationContext,
    model: &'a ModelSpec,
    namespace: Namespace,
    class_name: String,
    variant: Variant,
    authorization: String,
}

impl<'a> RequestFile<'a> {
    pub fn new(ctx: &'a GenerationContext, model: &'a ModelSpec, sub_path: &str, api: bool) -> Self {
        let mut segments: Vec<String> = sub_path
            .split(['/', '\\'])
            .map(to_pascal_case)
            .filter(|segment| !segment.is_empty())
            .collect();
        let class_name = segments.pop().unwrap_or_default();
        let namespace = segments
            .into_iter()
            .fold(ctx.request_namespace(api), |ns, segment| ns.child(segment));

        Self {
            ctx,
            model,
            namespace,
            class_name,
            variant: Variant::from_api(api),
            authorization: ALLOW_ALL.to_string(),
        }
    }

    pub fn with_authorization(mut self, expression: impl Into<String>) -> Self {
        self.set_authorization(expression);
        self
    }

    pub fn set_authorization(&mut self, expression: impl Into<String>) {
        self.authorization = expression.into();
    }

    pub fn authorization(&self) -> &str {
        &self.authorization
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    pub fn path(&self) -> PathBuf {
        self.ctx.class_path(&self.namespace, &self.class_name)
    }

    pub fn template_id(&self) -> TemplateId {
        TemplateId::new(self.variant, TemplateKind::for_class(&self.class_name))
    }

    /// Render the class source without touching the filesystem
    pub fn render(&self) -> Result<String, CoreError> {
        let context = TemplateContext::new(
            self.namespace.to_string(),
            self.class_name.clone(),
            self.authorization.clone(),
        );
        self.ctx.engine().render(self.template_id(), &context)
    }

    /// Render and write the class unless its file already exists
    pub fn save(&self) -> Result<WriteOutcome, CoreError> {
        if self.class_name.is_empty() {
            return Err(CoreError::codegen(format!(
                "Cannot derive a class name for model {}",
                self.model.class_name()
            )));
        }

        let path = self.path();
        if path.exists() {
            tracing::debug!(path = %path.display(), "request exists, skipping");
            return Ok(WriteOutcome::Skipped);
        }

        let content = self.render()?;
        tracing::debug!(
            model = self.model.class_name(),
            class = %self.class_name,
            template = %self.template_id(),
            "writing request"
        );
        self.ctx.writer().write_new(&path, &content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scaffold_core::ScaffoldConfig;
    use tempfile::TempDir;

    fn context(dir: &TempDir) -> GenerationContext {
        GenerationContext::new(ScaffoldConfig::default().with_base_path(dir.path())).unwrap()
    }

    #[test]
    fn test_sub_path_sets_namespace_and_class() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir);
        let model = ModelSpec::new("App\\Models\\Post", "posts");

        let file = RequestFile::new(&ctx, &model, "blog_posts/store", true);
        assert_eq!(file.class_name(), "Store");
        assert_eq!(file.namespace().to_string(), "App\\Http\\Requests\\Api\\BlogPosts");
        assert_eq!(
            file.path(),
            dir.path().join("app/Http/Requests/Api/BlogPosts/Store.php")
        );
        assert_eq!(file.template_id().kind, TemplateKind::Store);
        assert_eq!(file.authorization(), "true");
    }

    #[test]
    fn test_save_writes_once() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir);
        let model = ModelSpec::new("App\\Models\\Post", "posts");

        let file = RequestFile::new(&ctx, &model, "Posts/Update", false)
            .with_authorization("auth()->user()->can('update', $this->route('post'))");
        assert_eq!(file.save().unwrap(), WriteOutcome::Written);

        let written = std::fs::read_to_string(file.path()).unwrap();
        assert!(written.contains("namespace App\\Http\\Requests\\Posts;"));
        assert!(written.contains("class Update extends FormRequest"));
        assert!(written.contains("authorized to update"));
        assert!(written.contains("can('update', $this->route('post'))"));

        let mut again = RequestFile::new(&ctx, &model, "Posts/Update", false);
        again.set_authorization("false");
        assert_eq!(again.save().unwrap(), WriteOutcome::Skipped);
        assert_eq!(std::fs::read_to_string(file.path()).unwrap(), written);
    }

    #[test]
    fn test_empty_sub_path_is_rejected() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir);
        let model = ModelSpec::new("App\\Models\\Post", "posts");

        let file = RequestFile::new(&ctx, &model, "/", false);
        assert!(matches!(file.save(), Err(CoreError::Codegen { .. })));
    }
}
