use crate::namespace::Namespace;
use crate::templates::TemplateEngine;
use crate::writer::CodeWriter;
use scaffold_core::{CoreError, ScaffoldConfig};
use std::path::PathBuf;

/// Everything shared by the files of one generation run: configuration,
/// the template engine and the writer.
pub struct GenerationContext {
    config: ScaffoldConfig,
    engine: TemplateEngine,
    writer: CodeWriter,
}

impl GenerationContext {
    pub fn new(config: ScaffoldConfig) -> Result<Self, CoreError> {
        let engine = match &config.template_path {
            Some(dir) => TemplateEngine::with_overrides(dir)?,
            None => TemplateEngine::new()?,
        };

        Ok(Self {
            config,
            engine,
            writer: CodeWriter::new(),
        })
    }

    pub fn config(&self) -> &ScaffoldConfig {
        &self.config
    }

    pub fn engine(&self) -> &TemplateEngine {
        &self.engine
    }

    pub fn writer(&self) -> &CodeWriter {
        &self.writer
    }

    /// Base namespace request classes are generated under
    pub fn request_namespace(&self, api: bool) -> Namespace {
        Namespace::parse(&self.config.request_base(api))
    }

    /// Path of the file holding `class_name` in `namespace`
    pub fn class_path(&self, namespace: &Namespace, class_name: &str) -> PathBuf {
        namespace
            .to_path(&self.config.base_path)
            .join(format!("{}.{}", class_name, self.config.file_extension))
    }
}
