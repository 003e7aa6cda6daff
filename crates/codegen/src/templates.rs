use scaffold_core::CoreError;
use serde::Serialize;
use std::fmt;
use std::path::Path;
use tera::{Context, Tera};

/// Flavour of request class: plain web form requests or JSON API requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Web,
    Api,
}

impl Variant {
    pub fn from_api(api: bool) -> Self {
        if api {
            Variant::Api
        } else {
            Variant::Web
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Web => "web",
            Variant::Api => "api",
        }
    }

    pub fn is_api(&self) -> bool {
        matches!(self, Variant::Api)
    }
}

/// Which template of a variant to render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    /// Shared by index, show, create, edit, destroy and custom actions
    Generic,
    Store,
    Update,
}

impl TemplateKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateKind::Generic => "template",
            TemplateKind::Store => "store",
            TemplateKind::Update => "update",
        }
    }

    /// Kind for a generated class name; only `Store` and `Update` have their
    /// own templates.
    pub fn for_class(class_name: &str) -> Self {
        match class_name {
            "Store" => TemplateKind::Store,
            "Update" => TemplateKind::Update,
            _ => TemplateKind::Generic,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateId {
    pub variant: Variant,
    pub kind: TemplateKind,
}

impl TemplateId {
    pub fn new(variant: Variant, kind: TemplateKind) -> Self {
        Self { variant, kind }
    }

    pub fn all() -> impl Iterator<Item = TemplateId> {
        [Variant::Web, Variant::Api].into_iter().flat_map(|variant| {
            [TemplateKind::Generic, TemplateKind::Store, TemplateKind::Update]
                .into_iter()
                .map(move |kind| TemplateId::new(variant, kind))
        })
    }

    /// Registered name, also the override file path relative to the
    /// template directory (plus `.txt`)
    pub fn name(&self) -> String {
        format!("request/{}/{}", self.variant.as_str(), self.kind.as_str())
    }

    fn builtin(&self) -> &'static str {
        match (self.variant, self.kind) {
            (Variant::Web, TemplateKind::Generic) => WEB_TEMPLATE,
            (Variant::Web, TemplateKind::Store) => WEB_STORE_TEMPLATE,
            (Variant::Web, TemplateKind::Update) => WEB_UPDATE_TEMPLATE,
            (Variant::Api, TemplateKind::Generic) => API_TEMPLATE,
            (Variant::Api, TemplateKind::Store) => API_STORE_TEMPLATE,
            (Variant::Api, TemplateKind::Update) => API_UPDATE_TEMPLATE,
        }
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Placeholder values substituted into a request template
#[derive(Debug, Clone, Serialize)]
pub struct TemplateContext {
    pub namespace: String,
    #[serde(rename = "requestClassName")]
    pub request_class_name: String,
    pub authorization: String,
    pub rules: String,
}

impl TemplateContext {
    pub fn new(
        namespace: impl Into<String>,
        request_class_name: impl Into<String>,
        authorization: impl Into<String>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            request_class_name: request_class_name.into(),
            authorization: authorization.into(),
            // no rules are inferred yet; the generated class starts empty
            rules: String::new(),
        }
    }
}

/// Renders request templates. Built-in templates are always registered;
/// files under an override directory replace them one by one.
pub struct TemplateEngine {
    tera: Tera,
}

impl TemplateEngine {
    pub fn new() -> Result<Self, CoreError> {
        let mut tera = Tera::default();
        for id in TemplateId::all() {
            tera.add_raw_template(&id.name(), id.builtin())
                .map_err(|e| CoreError::template(format!("Failed to register {}: {}", id, error_chain(&e))))?;
        }
        Ok(Self { tera })
    }

    /// Built-ins plus any `request/<variant>/<kind>.txt` found in `dir`
    pub fn with_overrides(dir: &Path) -> Result<Self, CoreError> {
        let mut engine = Self::new()?;

        for id in TemplateId::all() {
            let path = dir.join(format!("{}.txt", id.name()));
            if !path.is_file() {
                continue;
            }
            let content = std::fs::read_to_string(&path)?;
            engine
                .tera
                .add_raw_template(&id.name(), &content)
                .map_err(|e| {
                    CoreError::template(format!(
                        "Failed to register override {}: {}",
                        path.display(),
                        error_chain(&e)
                    ))
                })?;
            tracing::debug!(template = %id, path = %path.display(), "using template override");
        }

        Ok(engine)
    }

    pub fn render(&self, id: TemplateId, context: &TemplateContext) -> Result<String, CoreError> {
        let context = Context::from_serialize(context)
            .map_err(|e| CoreError::template(format!("Invalid template context: {}", error_chain(&e))))?;
        self.tera
            .render(&id.name(), &context)
            .map_err(|e| CoreError::template(format!("Failed to render {}: {}", id, error_chain(&e))))
    }
}

/// `error` followed by each of its sources, joined with `: `
fn error_chain(error: &tera::Error) -> String {
    let mut message = error.to_string();
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

pub static WEB_TEMPLATE: &str = r#"<?php

namespace {{ namespace }};

use Illuminate\Foundation\Http\FormRequest;

class {{ requestClassName }} extends FormRequest
{
    /**
     * Determine if the user is authorized to make this request.
     *
     * @return bool
     */
    public function authorize()
    {
        return {{ authorization }};
    }

    /**
     * Get the validation rules that apply to the request.
     *
     * @return array
     */
    public function rules()
    {
        return [
            {{ rules }}
        ];
    }
}
"#;

pub static WEB_STORE_TEMPLATE: &str = r#"<?php

namespace {{ namespace }};

use Illuminate\Foundation\Http\FormRequest;

class {{ requestClassName }} extends FormRequest
{
    /**
     * Determine if the user is authorized to create this resource.
     *
     * @return bool
     */
    public function authorize()
    {
        return {{ authorization }};
    }

    /**
     * Get the validation rules for a new resource.
     *
     * @return array
     */
    public function rules()
    {
        return [
            {{ rules }}
        ];
    }
}
"#;

pub static WEB_UPDATE_TEMPLATE: &str = r#"<?php

namespace {{ namespace }};

use Illuminate\Foundation\Http\FormRequest;

class {{ requestClassName }} extends FormRequest
{
    /**
     * Determine if the user is authorized to update this resource.
     *
     * @return bool
     */
    public function authorize()
    {
        return {{ authorization }};
    }

    /**
     * Get the validation rules for updating the resource.
     *
     * @return array
     */
    public function rules()
    {
        return [
            {{ rules }}
        ];
    }
}
"#;

pub static API_TEMPLATE: &str = r#"<?php

namespace {{ namespace }};

use Illuminate\Contracts\Validation\Validator;
use Illuminate\Foundation\Http\FormRequest;
use Illuminate\Http\Exceptions\HttpResponseException;

class {{ requestClassName }} extends FormRequest
{
    /**
     * Determine if the user is authorized to make this request.
     *
     * @return bool
     */
    public function authorize()
    {
        return {{ authorization }};
    }

    /**
     * Get the validation rules that apply to the request.
     *
     * @return array
     */
    public function rules()
    {
        return [
            {{ rules }}
        ];
    }

    /**
     * Respond with JSON instead of redirecting when validation fails.
     */
    protected function failedValidation(Validator $validator)
    {
        throw new HttpResponseException(response()->json([
            'message' => 'The given data was invalid.',
            'errors' => $validator->errors(),
        ], 422));
    }
}
"#;

pub static API_STORE_TEMPLATE: &str = r#"<?php

namespace {{ namespace }};

use Illuminate\Contracts\Validation\Validator;
use Illuminate\Foundation\Http\FormRequest;
use Illuminate\Http\Exceptions\HttpResponseException;

class {{ requestClassName }} extends FormRequest
{
    /**
     * Determine if the user is authorized to create this resource.
     *
     * @return bool
     */
    public function authorize()
    {
        return {{ authorization }};
    }

    /**
     * Get the validation rules for a new resource.
     *
     * @return array
     */
    public function rules()
    {
        return [
            {{ rules }}
        ];
    }

    /**
     * Respond with JSON instead of redirecting when validation fails.
     */
    protected function failedValidation(Validator $validator)
    {
        throw new HttpResponseException(response()->json([
            'message' => 'The given data was invalid.',
            'errors' => $validator->errors(),
        ], 422));
    }
}
"#;

pub static API_UPDATE_TEMPLATE: &str = r#"<?php

namespace {{ namespace }};

use Illuminate\Contracts\Validation\Validator;
use Illuminate\Foundation\Http\FormRequest;
use Illuminate\Http\Exceptions\HttpResponseException;

class {{ requestClassName }} extends FormRequest
{
    /**
     * Determine if the user is authorized to update this resource.
     *
     * @return bool
     */
    public function authorize()
    {
        return {{ authorization }};
    }

    /**
     * Get the validation rules for updating the resource.
     *
     * @return array
     */
    public function rules()
    {
        return [
            {{ rules }}
        ];
    }

    /**
     * Respond with JSON instead of redirecting when validation fails.
     */
    protected function failedValidation(Validator $validator)
    {
        throw new HttpResponseException(response()->json([
            'message' => 'The given data was invalid.',
            'errors' => $validator->errors(),
        ], 422));
    }
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn context() -> TemplateContext {
        TemplateContext::new(
            "App\\Http\\Requests\\Posts",
            "Edit",
            "auth()->user()->can('update', $this->route('post'))",
        )
    }

    #[test]
    fn test_template_names() {
        let names: Vec<String> = TemplateId::all().map(|id| id.name()).collect();
        assert_eq!(
            names,
            vec![
                "request/web/template",
                "request/web/store",
                "request/web/update",
                "request/api/template",
                "request/api/store",
                "request/api/update",
            ]
        );
        assert_eq!(TemplateKind::for_class("Store"), TemplateKind::Store);
        assert_eq!(TemplateKind::for_class("Edit"), TemplateKind::Generic);
    }

    #[test]
    fn test_render_substitutes_without_escaping() {
        let engine = TemplateEngine::new().unwrap();
        let output = engine
            .render(TemplateId::new(Variant::Web, TemplateKind::Generic), &context())
            .unwrap();

        assert!(output.contains("namespace App\\Http\\Requests\\Posts;"));
        assert!(output.contains("class Edit extends FormRequest"));
        assert!(output.contains("return auth()->user()->can('update', $this->route('post'));"));
        assert!(!output.contains("{{"));
        assert!(!output.contains("&#x27;"));
    }

    #[test]
    fn test_api_variant_responds_with_json() {
        let engine = TemplateEngine::new().unwrap();
        let output = engine
            .render(TemplateId::new(Variant::Api, TemplateKind::Store), &context())
            .unwrap();
        assert!(output.contains("failedValidation"));
        assert!(output.contains("authorized to create"));
    }

    #[test]
    fn test_override_replaces_only_matching_template() {
        let dir = TempDir::new().unwrap();
        let web_dir = dir.path().join("request").join("web");
        std::fs::create_dir_all(&web_dir).unwrap();
        std::fs::write(
            web_dir.join("template.txt"),
            "{{ requestClassName }}|{{ authorization }}",
        )
        .unwrap();

        let engine = TemplateEngine::with_overrides(dir.path()).unwrap();
        let generic = engine
            .render(TemplateId::new(Variant::Web, TemplateKind::Generic), &context())
            .unwrap();
        assert_eq!(
            generic,
            "Edit|auth()->user()->can('update', $this->route('post'))"
        );

        let store = engine
            .render(TemplateId::new(Variant::Web, TemplateKind::Store), &context())
            .unwrap();
        assert!(store.starts_with("<?php"));
    }

    #[test]
    fn test_broken_override_is_a_template_error() {
        let dir = TempDir::new().unwrap();
        let api_dir = dir.path().join("request").join("api");
        std::fs::create_dir_all(&api_dir).unwrap();
        std::fs::write(api_dir.join("update.txt"), "{{ unclosed").unwrap();

        let result = TemplateEngine::with_overrides(dir.path());
        assert!(matches!(result, Err(CoreError::Template { .. })));
    }

    #[test]
    fn test_render_error_names_the_undefined_variable() {
        let dir = TempDir::new().unwrap();
        let web_dir = dir.path().join("request").join("web");
        std::fs::create_dir_all(&web_dir).unwrap();
        std::fs::write(web_dir.join("template.txt"), "{{ missing_var }}").unwrap();

        let engine = TemplateEngine::with_overrides(dir.path()).unwrap();
        let err = engine
            .render(TemplateId::new(Variant::Web, TemplateKind::Generic), &context())
            .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("request/web/template"), "{}", message);
        assert!(message.contains("missing_var"), "{}", message);
    }
}
