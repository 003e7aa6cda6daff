use scaffold_codegen::{
    GenerationContext, RequestGenerator, RequestSet, RequestSetOptions, WriteOutcome,
};
use scaffold_core::{CoreError, Manifest, ModelSpec, PolicySpec, ScaffoldConfig};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const MANIFEST: &str = r#"
models:
  - class: App\Models\Post
    table: posts
    policy:
      class: App\Policies\PostPolicy
      abilities: [index, create, view, update, delete]
  - class: App\Models\Tag
    table: tags
"#;

fn config(dir: &Path) -> ScaffoldConfig {
    ScaffoldConfig::default().with_base_path(dir)
}

fn post() -> ModelSpec {
    ModelSpec::new("App\\Models\\Post", "posts")
}

fn read(dir: &Path, class: &str) -> String {
    fs::read_to_string(dir.join(format!("{}.php", class))).unwrap()
}

#[test]
fn test_post_without_policy_writes_seven_allow_all_requests() {
    let dir = TempDir::new().unwrap();
    let ctx = GenerationContext::new(config(dir.path())).unwrap();
    let set = RequestSet::new(&ctx, post(), None, RequestSetOptions::new());

    let report = set.save().unwrap();
    assert_eq!(report.written.len(), 7);
    assert!(report.skipped.is_empty());

    let out = dir.path().join("app/Http/Requests/Posts");
    for class in ["Index", "Show", "Create", "Store", "Edit", "Update", "Destroy"] {
        let content = read(&out, class);
        assert!(content.contains("namespace App\\Http\\Requests\\Posts;"), "{}", class);
        assert!(content.contains(&format!("class {} extends FormRequest", class)));
        assert!(content.contains("return true;"), "{} should allow all", class);
        assert!(!content.contains("failedValidation"));
    }

    let rerun = set.save().unwrap();
    assert!(rerun.is_noop());
    assert_eq!(rerun.skipped.len(), 7);
}

#[test]
fn test_second_run_leaves_existing_files_untouched() {
    let dir = TempDir::new().unwrap();
    let ctx = GenerationContext::new(config(dir.path())).unwrap();
    let set = RequestSet::new(&ctx, post(), None, RequestSetOptions::new());
    set.save().unwrap();

    let show = dir.path().join("app/Http/Requests/Posts/Show.php");
    fs::write(&show, "<?php // customised").unwrap();

    let report = set.save().unwrap();
    assert!(report.written.is_empty());
    assert!(report.skipped.contains(&show));
    assert_eq!(fs::read_to_string(&show).unwrap(), "<?php // customised");
}

#[test]
fn test_instance_actions_check_the_routed_post_in_api_mode() {
    let dir = TempDir::new().unwrap();
    let ctx = GenerationContext::new(config(dir.path())).unwrap();
    let policy = PolicySpec::new("App\\Policies\\PostPolicy", ["update", "delete"]);
    let options = RequestSetOptions::new().only(["edit", "destroy"]).api(true);

    let report = RequestSet::new(&ctx, post(), Some(policy), options)
        .save()
        .unwrap();
    assert_eq!(report.written.len(), 2);

    let out = dir.path().join("app/Http/Requests/Api/Posts");
    let edit = read(&out, "Edit");
    assert!(edit.contains("return auth()->user()->can('update', $this->route('post'));"));
    assert!(edit.contains("failedValidation"));

    let destroy = read(&out, "Destroy");
    assert!(destroy.contains("return auth()->user()->can('delete', $this->route('post'));"));

    assert!(!out.join("Index.php").exists());
}

#[test]
fn test_collection_actions_check_the_model_class() {
    let dir = TempDir::new().unwrap();
    let manifest = Manifest::from_yaml(MANIFEST).unwrap();
    let generator = RequestGenerator::new(config(dir.path()), &manifest).unwrap();

    generator
        .generate("Post", RequestSetOptions::new())
        .unwrap();

    let out = dir.path().join("app/Http/Requests/Posts");
    assert!(read(&out, "Index")
        .contains("return auth()->user()->can('index', \\App\\Models\\Post::class);"));
    assert!(read(&out, "Create")
        .contains("return auth()->user()->can('create', \\App\\Models\\Post::class);"));
    // store checks `create`
    let store = read(&out, "Store");
    assert!(store.contains("return auth()->user()->can('create', \\App\\Models\\Post::class);"));
    assert!(store.contains("authorized to create"));

    assert!(read(&out, "Show").contains("can('view', $this->route('post'))"));
    assert!(read(&out, "Edit").contains("can('update', $this->route('post'))"));
    let update = read(&out, "Update");
    assert!(update.contains("can('update', $this->route('post'))"));
    assert!(update.contains("authorized to update"));
    assert!(read(&out, "Destroy").contains("can('delete', $this->route('post'))"));
}

#[test]
fn test_folder_name_sets_namespace_segment() {
    let dir = TempDir::new().unwrap();
    let manifest = Manifest::from_yaml(MANIFEST).unwrap();
    let generator = RequestGenerator::new(config(dir.path()), &manifest).unwrap();

    let options = RequestSetOptions::new().folder("blog_post").only(["store"]);
    let set = generator.request_set("App\\Models\\Tag", options).unwrap();
    assert_eq!(set.namespace().to_string(), "App\\Http\\Requests\\BlogPost");

    let report = set.save().unwrap();
    let store = dir.path().join("app/Http/Requests/BlogPost/Store.php");
    assert_eq!(report.written, vec![store.clone()]);
    let content = fs::read_to_string(store).unwrap();
    assert!(content.contains("namespace App\\Http\\Requests\\BlogPost;"));
    assert!(content.contains("return true;"));
}

#[test]
fn test_unknown_model_is_reported_with_hint() {
    let dir = TempDir::new().unwrap();
    let manifest = Manifest::from_yaml(MANIFEST).unwrap();
    let generator = RequestGenerator::new(config(dir.path()), &manifest).unwrap();

    let err = generator
        .generate("Comment", RequestSetOptions::new())
        .unwrap_err();
    assert!(matches!(err, CoreError::ModelNotFound { .. }));
    assert!(err.hint().unwrap().contains("App\\Models"));
}

#[test]
fn test_directory_failure_propagates() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("app"), "a file where a directory should be").unwrap();

    let ctx = GenerationContext::new(config(dir.path())).unwrap();
    let result = RequestSet::new(&ctx, post(), None, RequestSetOptions::new()).save();
    assert!(matches!(result, Err(CoreError::Io(_))));
}

#[test]
fn test_render_failure_keeps_requests_written_before_it() {
    let dir = TempDir::new().unwrap();
    let templates = dir.path().join("stubs");
    fs::create_dir_all(templates.join("request/web")).unwrap();
    fs::write(templates.join("request/web/store.txt"), "{{ missing_var }}").unwrap();

    let mut config = config(dir.path());
    config.template_path = Some(templates);
    let ctx = GenerationContext::new(config).unwrap();

    let err = RequestSet::new(&ctx, post(), None, RequestSetOptions::new())
        .save()
        .unwrap_err();
    assert!(matches!(err, CoreError::Template { .. }));
    assert!(err.to_string().contains("missing_var"), "{}", err);

    let out = dir.path().join("app/Http/Requests/Posts");
    for class in ["Index", "Show", "Create"] {
        assert!(out.join(format!("{}.php", class)).is_file(), "{} should be kept", class);
    }
    for class in ["Store", "Edit"] {
        assert!(!out.join(format!("{}.php", class)).exists(), "{} should not exist", class);
    }
}

#[test]
fn test_template_overrides_from_config() {
    let dir = TempDir::new().unwrap();
    let templates = dir.path().join("stubs");
    fs::create_dir_all(templates.join("request/web")).unwrap();
    fs::write(
        templates.join("request/web/template.txt"),
        "{{ namespace }}::{{ requestClassName }}::{{ authorization }}",
    )
    .unwrap();

    let mut config = config(dir.path());
    config.template_path = Some(templates);
    config.file_extension = "txt".to_string();
    let ctx = GenerationContext::new(config).unwrap();
    let set = RequestSet::new(&ctx, post(), None, RequestSetOptions::new().only(["show", "store"]));
    set.save().unwrap();

    let out = dir.path().join("app/Http/Requests/Posts");
    assert_eq!(
        fs::read_to_string(out.join("Show.txt")).unwrap(),
        "App\\Http\\Requests\\Posts::Show::true"
    );
    // store has its own template, which was not overridden
    assert!(fs::read_to_string(out.join("Store.txt"))
        .unwrap()
        .starts_with("<?php"));
}

#[test]
fn test_request_file_matches_store_path() {
    let dir = TempDir::new().unwrap();
    let ctx = GenerationContext::new(config(dir.path())).unwrap();
    let model = post();

    let file = scaffold_codegen::RequestFile::new(&ctx, &model, "Posts/Store", false);
    assert_eq!(file.save().unwrap(), WriteOutcome::Written);

    let set = RequestSet::new(&ctx, post(), None, RequestSetOptions::new().only(["store"]));
    let report = set.save().unwrap();
    assert_eq!(report.skipped, vec![file.path()]);
}
