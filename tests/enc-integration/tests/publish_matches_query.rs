use std::{
    fs,
    path::{Path, PathBuf},
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::{SystemTime, UNIX_EPOCH},
};

use enc_catalog::{reshape, CatalogLayout, CatalogQuery, ReshapeMode};
use enc_core::LocalFs;
use enc_publisher::Publisher;
use serde_json::{json, Value};

static WORKSPACE_COUNTER: AtomicU64 = AtomicU64::new(1);

struct IsolatedWorkspace {
    root: PathBuf,
}

impl IsolatedWorkspace {
    fn new(label: &str) -> Self {
        let tick = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after unix epoch")
            .as_nanos();
        let count = WORKSPACE_COUNTER.fetch_add(1, Ordering::Relaxed);
        let root = std::env::temp_dir().join(format!(
            "enc-{label}-{}-{tick}-{count}",
            std::process::id()
        ));
        fs::create_dir_all(&root).expect("must create isolated workspace root");
        Self { root }
    }

    fn root(&self) -> &Path {
        &self.root
    }
}

impl Drop for IsolatedWorkspace {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.root);
    }
}

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().expect("fixture parent")).expect("create fixture parent");
    fs::write(path, content).expect("write fixture");
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).expect("read json")).expect("parse json")
}

fn seed_source(source: &Path) {
    write(&source.join("images/a.jpg"), "a");
    write(&source.join("images/b.png"), "b");
    write(&source.join("images/img1.jpg"), "img1");
    write(
        &source.join("results/m1/a_20240101.json"),
        r#"{"score": 1, "metadata": {"run": 1}}"#,
    );
    write(
        &source.join("results/m1/a_20240102.json"),
        r#"{"score": 2, "metadata": {"run": 2}}"#,
    );
    write(
        &source.join("results/m1/img10_20240101.json"),
        r#"{"score": 10}"#,
    );
    fs::create_dir_all(source.join("results/m2")).expect("create m2");
    write(
        &source.join("keyword_identification/gpt-4o/a_2024.json"),
        r#"{"statistics": {"n": 5}}"#,
    );
}

#[test]
fn integration_published_results_match_query_resolution_minus_metadata() {
    let workspace = IsolatedWorkspace::new("publish-query");
    let source = workspace.root().join("source");
    let output = workspace.root().join("site");
    seed_source(&source);
    let layout = CatalogLayout::new(&source, &output);

    let report = Publisher::local(layout.clone())
        .publish()
        .expect("publish");
    assert_eq!((report.image_count, report.model_count), (3, 2));

    let query = CatalogQuery::new(Arc::new(LocalFs), layout.clone());
    let images = query.list_images().expect("list images");
    assert_eq!(
        read_json(&layout.output_files_index()),
        json!(images),
        "files.json mirrors the query listing"
    );
    let models = query.list_models().expect("list models");
    assert_eq!(read_json(&layout.output_models_index()), json!(models));

    for model in &models {
        for image in &images {
            let base_name = enc_catalog::image_base_name(image);
            let published = layout
                .output_model_results_dir(model)
                .join(format!("{base_name}.json"));
            match query.resolve_document(model, image).expect("resolve") {
                Some(document) => {
                    let expected = Value::Object(reshape(document, ReshapeMode::ModelResult));
                    assert_eq!(read_json(&published), expected);
                }
                None => assert!(!published.exists(), "{} should not exist", published.display()),
            }
        }
    }
}

#[test]
fn integration_prefix_ambiguity_is_visible_in_published_tree() {
    let workspace = IsolatedWorkspace::new("prefix");
    let source = workspace.root().join("source");
    let output = workspace.root().join("site");
    seed_source(&source);

    Publisher::local(CatalogLayout::new(&source, &output))
        .publish()
        .expect("publish");

    assert_eq!(
        read_json(&output.join("data/results/m1/img1.json")),
        json!({"score": 10})
    );
}

#[test]
fn integration_reference_scenario_keywords_and_absences() {
    let workspace = IsolatedWorkspace::new("scenario");
    let source = workspace.root().join("source");
    let output = workspace.root().join("site");
    seed_source(&source);

    Publisher::local(CatalogLayout::new(&source, &output))
        .publish()
        .expect("publish");

    assert_eq!(
        read_json(&output.join("data/keywords/a.json")),
        json!({"ocr_results": {}, "identified_keywords": {}, "statistics": {"n": 5}})
    );
    assert!(!output.join("data/keywords/b.json").exists());
    assert!(!output.join("data/results/m2/a.json").exists());
    assert_eq!(
        read_json(&output.join("data/results/m1/a.json")),
        json!({"score": 2})
    );
}
