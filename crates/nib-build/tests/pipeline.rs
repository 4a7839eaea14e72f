use async_trait::async_trait;
use nib_build::{
    react_app_preset, web_app_preset, BuildError, BuildPaths, BuildPipeline, BuildRequest,
    BuildStep, Bundler, BundlerError, Environment,
};
use nib_config::{ConfigArgs, ConfigError, ConfigLoader, LoadOptions, MigrationWarnings};
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Stands in for the real bundler: records what it was given and writes the
/// files a successful bundle would leave behind.
#[derive(Default)]
struct FakeBundler {
    fail: bool,
    calls: Mutex<Vec<(Value, Environment)>>,
}

impl FakeBundler {
    fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    fn last_call(&self) -> (Value, Environment) {
        self.calls.lock().unwrap().last().cloned().expect("bundler was called")
    }
}

#[async_trait]
impl Bundler for FakeBundler {
    async fn bundle(&self, config: &Value, environment: Environment) -> Result<(), BundlerError> {
        self.calls
            .lock()
            .unwrap()
            .push((config.clone(), environment));
        if self.fail {
            return Err(BundlerError::Custom("Module not found: ./App".to_string()));
        }

        let out = PathBuf::from(config["output"]["path"].as_str().unwrap());
        fs::write(
            out.join("index.html"),
            "<html><head><title>app</title></head><body></body></html>",
        )
        .unwrap();
        fs::write(out.join("manifest.js"), "// comment\nCONTENT").unwrap();
        fs::write(out.join("manifest.js.map"), "{}").unwrap();
        fs::write(out.join("app.12345678.js"), "app()").unwrap();
        Ok(())
    }
}

fn create_project() -> TempDir {
    let dir = TempDir::new().expect("temp dir");
    let public = dir.path().join("public");
    fs::create_dir_all(&public).unwrap();
    fs::write(public.join("robots.txt"), "User-agent: *").unwrap();
    fs::write(public.join(".gitkeep"), "").unwrap();
    dir
}

fn write_config(root: &Path, content: &str) {
    fs::write(root.join("nib.config.toml"), content).unwrap();
}

fn production() -> BuildRequest {
    BuildRequest::default()
}

fn with_env(node_env: &str) -> BuildRequest {
    BuildRequest {
        node_env: Some(node_env.to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn successful_build_inlines_manifest() {
    let project = create_project();
    let bundler = Arc::new(FakeBundler::default());

    let report = BuildPipeline::new(project.path(), bundler.clone())
        .run(&production(), web_app_preset, &mut MigrationWarnings::new())
        .await
        .unwrap();

    assert_eq!(report.completed, BuildStep::ALL.to_vec());
    assert_eq!(report.environment, Environment::Production);
    assert_eq!(report.assets_copied, 1);

    let dist = project.path().join("dist");
    assert_eq!(
        fs::read_to_string(dist.join("index.html")).unwrap(),
        "<html><head><title>app</title><script>CONTENT</script></head><body></body></html>"
    );
    assert!(!dist.join("manifest.js").exists());
    assert!(!dist.join("manifest.js.map").exists());
    assert!(dist.join("robots.txt").exists());
    assert!(!dist.join(".gitkeep").exists());
}

#[tokio::test]
async fn previous_output_is_cleaned() {
    let project = create_project();
    let dist = project.path().join("dist");
    fs::create_dir_all(&dist).unwrap();
    fs::write(dist.join("app.old.js"), "stale").unwrap();

    BuildPipeline::new(project.path(), Arc::new(FakeBundler::default()))
        .run(&production(), web_app_preset, &mut MigrationWarnings::new())
        .await
        .unwrap();

    assert!(!dist.join("app.old.js").exists());
}

#[tokio::test]
async fn bundler_failure_stops_the_build() {
    let project = create_project();
    let dist = project.path().join("dist");
    fs::create_dir_all(&dist).unwrap();
    fs::write(dist.join("index.html"), "<head></head>").unwrap();

    let pipeline = BuildPipeline::new(project.path(), Arc::new(FakeBundler::failing()))
        .with_paths(BuildPaths::default());
    let err = pipeline
        .run(&production(), web_app_preset, &mut MigrationWarnings::new())
        .await
        .unwrap_err();

    assert!(matches!(err, BuildError::Bundler(BundlerError::Custom(_))));
    assert_eq!(err.step(), Some(BuildStep::Bundle));
    assert_eq!(err.to_string(), "Module not found: ./App");
    // Cleaned and copied, nothing rolled back, nothing inlined.
    assert!(!dist.join("index.html").exists());
    assert!(dist.join("robots.txt").exists());
}

#[tokio::test]
async fn bundler_failure_leaves_existing_html_untouched() {
    struct FailAfterHtml;

    #[async_trait]
    impl Bundler for FailAfterHtml {
        async fn bundle(&self, config: &Value, _: Environment) -> Result<(), BundlerError> {
            let out = PathBuf::from(config["output"]["path"].as_str().unwrap());
            fs::write(out.join("index.html"), "<head></head>").unwrap();
            fs::write(out.join("manifest.js"), "CONTENT").unwrap();
            Err(BundlerError::Custom("half done".to_string()))
        }
    }

    let project = create_project();
    let err = BuildPipeline::new(project.path(), Arc::new(FailAfterHtml))
        .run(&production(), web_app_preset, &mut MigrationWarnings::new())
        .await
        .unwrap_err();

    assert_eq!(err.step(), Some(BuildStep::Bundle));
    let dist = project.path().join("dist");
    assert_eq!(fs::read_to_string(dist.join("index.html")).unwrap(), "<head></head>");
    assert!(dist.join("manifest.js").exists());
}

#[tokio::test]
async fn missing_manifest_is_reported_separately() {
    struct NoManifest;

    #[async_trait]
    impl Bundler for NoManifest {
        async fn bundle(&self, config: &Value, _: Environment) -> Result<(), BundlerError> {
            let out = PathBuf::from(config["output"]["path"].as_str().unwrap());
            fs::write(out.join("index.html"), "<head></head>").unwrap();
            Ok(())
        }
    }

    let project = create_project();
    let err = BuildPipeline::new(project.path(), Arc::new(NoManifest))
        .run(&production(), web_app_preset, &mut MigrationWarnings::new())
        .await
        .unwrap_err();

    assert!(matches!(err, BuildError::ManifestInline { .. }));
    assert_eq!(err.step(), Some(BuildStep::InlineManifest));
}

#[tokio::test]
async fn missing_source_map_fails_inline_step() {
    struct NoSourceMap;

    #[async_trait]
    impl Bundler for NoSourceMap {
        async fn bundle(&self, config: &Value, _: Environment) -> Result<(), BundlerError> {
            let out = PathBuf::from(config["output"]["path"].as_str().unwrap());
            fs::write(out.join("index.html"), "<head></head>").unwrap();
            fs::write(out.join("manifest.js"), "CONTENT").unwrap();
            Ok(())
        }
    }

    let project = create_project();
    let err = BuildPipeline::new(project.path(), Arc::new(NoSourceMap))
        .run(&production(), web_app_preset, &mut MigrationWarnings::new())
        .await
        .unwrap_err();

    match err {
        BuildError::ManifestInline { path, .. } => {
            assert_eq!(path, project.path().join("dist/manifest.js.map"))
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn preloaded_config_is_not_read_again() {
    let project = create_project();
    write_config(project.path(), "type = \"web-app\"\nglobal = \"App\"\n");
    let mut warnings = MigrationWarnings::new();
    let config = ConfigLoader::new(project.path())
        .resolve(&ConfigArgs::default(), LoadOptions { required: true }, &mut warnings)
        .unwrap();
    // Reading the file again would fail on the unknown type.
    write_config(project.path(), "type = \"angular-app\"\n");

    let bundler = Arc::new(FakeBundler::default());
    let request = BuildRequest {
        config: Some(config),
        ..Default::default()
    };
    BuildPipeline::new(project.path(), bundler.clone())
        .run(&request, web_app_preset, &mut warnings)
        .await
        .unwrap();

    assert_eq!(bundler.calls.lock().unwrap().len(), 1);
    assert_eq!(warnings.emitted(), 1);
}

#[tokio::test]
async fn react_preset_is_built_for_the_final_environment() {
    let project = create_project();
    let bundler = Arc::new(FakeBundler::default());
    let pipeline = BuildPipeline::new(project.path(), bundler.clone());

    pipeline
        .run(&production(), react_app_preset, &mut MigrationWarnings::new())
        .await
        .unwrap();
    let (config, environment) = bundler.last_call();
    assert_eq!(environment, Environment::Production);
    assert_eq!(
        config["loaders"]["babel"]["query"]["optional"],
        json!([
            "optimisation.react.inlineElements",
            "optimisation.react.constantElements"
        ])
    );
    assert_eq!(
        config["plugins"]["define"]["process.env.NODE_ENV"],
        json!("\"production\"")
    );

    pipeline
        .run(&with_env("development"), react_app_preset, &mut MigrationWarnings::new())
        .await
        .unwrap();
    let (config, environment) = bundler.last_call();
    assert_eq!(environment, Environment::Development);
    assert!(config["loaders"].get("babel").is_none());
    assert_eq!(config["mode"], json!("development"));
}

#[tokio::test]
async fn user_config_reaches_the_bundler() {
    let project = create_project();
    write_config(
        project.path(),
        r#"
type = "react-app"

[babel]
stage = 0

[bundler.plugins.define]
__API__ = "'/api'"
"#,
    );
    let bundler = Arc::new(FakeBundler::default());

    BuildPipeline::new(project.path(), bundler.clone())
        .run(&production(), react_app_preset, &mut MigrationWarnings::new())
        .await
        .unwrap();

    let (config, _) = bundler.last_call();
    assert_eq!(config["loaders"]["babel"]["query"]["stage"], json!(0));
    assert!(config["loaders"]["babel"]["query"]["optional"].is_array());
    assert_eq!(config["plugins"]["define"]["__API__"], json!("'/api'"));
    assert_eq!(
        config["output"]["path"],
        json!(project.path().join("dist").to_string_lossy())
    );
}

#[tokio::test]
async fn custom_paths_are_honoured() {
    let project = TempDir::new().unwrap();
    fs::create_dir_all(project.path().join("static")).unwrap();
    fs::write(project.path().join("static/logo.svg"), "<svg/>").unwrap();

    let report = BuildPipeline::new(project.path(), Arc::new(FakeBundler::default()))
        .with_paths(BuildPaths {
            out_dir: PathBuf::from("build"),
            public_dir: PathBuf::from("static"),
        })
        .run(&production(), web_app_preset, &mut MigrationWarnings::new())
        .await
        .unwrap();

    assert_eq!(report.out_dir, project.path().join("build"));
    assert!(project.path().join("build/logo.svg").exists());
    assert!(project.path().join("build/index.html").exists());
}

#[tokio::test]
async fn invalid_config_fails_before_bundling() {
    let project = create_project();
    write_config(project.path(), "type = \"angular-app\"\n");
    let bundler = Arc::new(FakeBundler::default());

    let err = BuildPipeline::new(project.path(), bundler.clone())
        .run(&production(), web_app_preset, &mut MigrationWarnings::new())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        BuildError::Config(ConfigError::InvalidProjectType { .. })
    ));
    assert!(bundler.calls.lock().unwrap().is_empty());
    assert!(project.path().join("dist/robots.txt").exists());
}

#[tokio::test]
async fn deprecation_warnings_are_shared_across_builds() {
    let project = create_project();
    write_config(project.path(), "type = \"web-app\"\nglobal = \"App\"\n");
    let pipeline = BuildPipeline::new(project.path(), Arc::new(FakeBundler::default()));

    let mut warnings = MigrationWarnings::new();
    for _ in 0..2 {
        pipeline
            .run(&production(), web_app_preset, &mut warnings)
            .await
            .unwrap();
    }
    assert!(warnings.has_warned(nib_config::DeprecationKind::BuildAtRoot));
    assert_eq!(warnings.emitted(), 1);
}
