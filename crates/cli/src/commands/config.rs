use scaffold_core::ScaffoldConfig;

/// Lines describing the effective configuration and where each value came from
pub fn describe(config: &ScaffoldConfig) -> Vec<String> {
    let sources = config.config_sources();
    let template_path = config
        .template_path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(built-in)".to_string());

    let rows = [
        ("root_namespace", config.root()),
        ("request_namespace", config.request_base(false)),
        ("api_request_namespace", config.request_base(true)),
        ("model_namespace", config.model_base()),
        ("base_path", config.base_path.display().to_string()),
        ("file_extension", config.file_extension.clone()),
        ("template_path", template_path),
    ];

    rows.iter()
        .map(|(field, value)| format!("{:<22} {:<32} [{}]", field, value, sources.get(field)))
        .collect()
}

pub fn run(config: &ScaffoldConfig) {
    for line in describe(config) {
        println!("{}", line);
    }
}
