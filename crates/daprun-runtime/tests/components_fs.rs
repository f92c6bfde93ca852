//! Component directory loading against real files.

use std::fs;

use daprun_core::{ComponentsError, ComponentsLoader};
use daprun_runtime::FsComponentsLoader;
use tempfile::TempDir;

const STATESTORE: &str = "\
apiVersion: dapr.io/v1alpha1
kind: Component
metadata:
  name: statestore
spec:
  type: state.redis
  version: v1
  metadata:
  - name: redisHost
    value: localhost:6379
";

const PUBSUB: &str = "\
apiVersion: dapr.io/v1alpha1
kind: Component
metadata:
  name: pubsub
spec:
  type: pubsub.redis
";

fn write(dir: &TempDir, name: &str, body: &str) {
    fs::write(dir.path().join(name), body).unwrap();
}

#[test]
fn loads_yaml_and_yml_files_in_name_order() {
    let dir = TempDir::new().unwrap();
    write(&dir, "b-statestore.yaml", STATESTORE);
    write(&dir, "a-pubsub.yml", PUBSUB);

    let components = FsComponentsLoader::new().load(dir.path()).unwrap();

    let names: Vec<&str> = components.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["pubsub", "statestore"]);
    assert_eq!(components[1].component_type, "state.redis");
    assert_eq!(components[1].version.as_deref(), Some("v1"));
    assert_eq!(components[0].version, None);
    assert_eq!(components[0].source, dir.path().join("a-pubsub.yml"));
}

#[test]
fn empty_directory_has_no_components() {
    let dir = TempDir::new().unwrap();
    assert!(FsComponentsLoader::new().load(dir.path()).unwrap().is_empty());
}

#[test]
fn multi_document_files_yield_every_component() {
    let dir = TempDir::new().unwrap();
    write(&dir, "all.yaml", &format!("{STATESTORE}---\n{PUBSUB}---\n"));

    let components = FsComponentsLoader::new().load(dir.path()).unwrap();
    assert_eq!(components.len(), 2);
}

#[test]
fn other_kinds_and_files_are_ignored() {
    let dir = TempDir::new().unwrap();
    write(
        &dir,
        "config.yaml",
        "apiVersion: dapr.io/v1alpha1\nkind: Configuration\nmetadata:\n  name: cfg\nspec: {}\n",
    );
    write(&dir, "notes.txt", "kind: Component\n");
    write(&dir, "empty.yaml", "");
    fs::create_dir(dir.path().join("nested")).unwrap();
    fs::write(dir.path().join("nested").join("pubsub.yaml"), PUBSUB).unwrap();

    assert!(FsComponentsLoader::new().load(dir.path()).unwrap().is_empty());
}

#[test]
fn malformed_yaml_names_the_file() {
    let dir = TempDir::new().unwrap();
    write(&dir, "broken.yaml", "kind: Component\nmetadata: [unclosed\n");

    let err = FsComponentsLoader::new().load(dir.path()).unwrap_err();
    match &err {
        ComponentsError::Parse { path, .. } => {
            assert_eq!(path, &dir.path().join("broken.yaml"));
        }
        other => panic!("expected parse error, got {other:?}"),
    }
    assert!(err.to_string().contains("broken.yaml"));
}

#[test]
fn component_without_name_is_invalid() {
    let dir = TempDir::new().unwrap();
    write(&dir, "anon.yaml", "kind: Component\nspec:\n  type: state.redis\n");

    let err = FsComponentsLoader::new().load(dir.path()).unwrap_err();
    assert!(matches!(err, ComponentsError::Invalid { .. }));
}

#[test]
fn component_without_type_is_invalid() {
    let dir = TempDir::new().unwrap();
    write(&dir, "untyped.yaml", "kind: Component\nmetadata:\n  name: store\nspec: {}\n");

    let err = FsComponentsLoader::new().load(dir.path()).unwrap_err();
    assert!(err.to_string().contains("spec.type"));
}

#[test]
fn missing_directory_is_a_read_error() {
    let dir = TempDir::new().unwrap();
    let err = FsComponentsLoader::new()
        .load(&dir.path().join("absent"))
        .unwrap_err();
    assert!(matches!(err, ComponentsError::Read { .. }));
}
