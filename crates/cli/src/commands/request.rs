use anyhow::Context;
use scaffold_codegen::{parse_actions, GenerationReport, RequestGenerator, RequestSetOptions};
use scaffold_core::{Manifest, ScaffoldConfig, ScaffoldError};
use std::path::{Path, PathBuf};

/// Arguments of `scaffold request`
#[derive(Debug, Clone)]
pub struct RequestArgs {
    pub model: String,
    pub only: Option<String>,
    pub api: bool,
    pub name: Option<String>,
    pub manifest: PathBuf,
    pub json: bool,
}

impl RequestArgs {
    fn options(&self) -> RequestSetOptions {
        let mut options = RequestSetOptions::new().api(self.api);
        if let Some(only) = &self.only {
            options = options.only(parse_actions(only));
        }
        if let Some(name) = &self.name {
            options = options.folder(name.clone());
        }
        options
    }
}

/// Generate the request classes of one model and return what was touched
pub fn generate(args: &RequestArgs, config: ScaffoldConfig) -> anyhow::Result<GenerationReport> {
    let manifest = load_manifest(&args.manifest)?;
    let generator = RequestGenerator::new(config, &manifest)?;

    generator
        .generate(&args.model, args.options())
        .map_err(with_hint)
}

/// Attach the error's hint as anyhow context
fn with_hint(error: ScaffoldError) -> anyhow::Error {
    let hint = error.hint().map(str::to_string);
    let error = anyhow::Error::new(error);
    match hint {
        Some(hint) => error.context(hint),
        None => error,
    }
}

pub fn run(args: &RequestArgs, config: ScaffoldConfig) -> anyhow::Result<()> {
    let report = generate(args, config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if report.is_noop() {
        println!("Nothing to do: all request classes for {} already exist", args.model);
    } else {
        println!(
            "✓ Generated {} request class{} for {}",
            report.written.len(),
            if report.written.len() == 1 { "" } else { "es" },
            args.model
        );
    }
    for path in &report.written {
        println!("  + {}", path.display());
    }
    for path in &report.skipped {
        println!("  = {} (exists)", path.display());
    }

    Ok(())
}

fn load_manifest(path: &Path) -> anyhow::Result<Manifest> {
    Manifest::load(path).with_context(|| format!("Failed to load model manifest {}", path.display()))
}
