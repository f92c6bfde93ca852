//! Component manifests read from a directory of YAML files.

use std::fs;
use std::path::{Path, PathBuf};

use daprun_core::{Component, ComponentsError, ComponentsLoader};
use serde::Deserialize;
use tracing::debug;

const COMPONENT_KIND: &str = "Component";

#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(default)]
    kind: Option<String>,
    #[serde(default)]
    metadata: Option<Metadata>,
    #[serde(default)]
    spec: Option<ManifestSpec>,
}

#[derive(Debug, Deserialize)]
struct Metadata {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ManifestSpec {
    #[serde(rename = "type", default)]
    component_type: Option<String>,
    #[serde(default)]
    version: Option<String>,
}

/// Loads every `*.yaml` / `*.yml` file directly inside a directory.
///
/// Files may hold several YAML documents. Documents of any other `kind` are
/// skipped; subdirectories are not descended into.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsComponentsLoader;

impl FsComponentsLoader {
    pub const fn new() -> Self {
        Self
    }
}

impl ComponentsLoader for FsComponentsLoader {
    fn load(&self, path: &Path) -> Result<Vec<Component>, ComponentsError> {
        let mut files = manifest_files(path)?;
        files.sort();

        let mut components = Vec::new();
        for file in files {
            components.extend(load_file(&file)?);
        }

        debug!(
            path = %path.display(),
            count = components.len(),
            "Loaded components"
        );
        Ok(components)
    }
}

fn manifest_files(dir: &Path) -> Result<Vec<PathBuf>, ComponentsError> {
    let read_error = |e: std::io::Error| ComponentsError::Read {
        path: dir.to_path_buf(),
        reason: e.to_string(),
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_error)? {
        let path = entry.map_err(read_error)?.path();
        if path.is_file() && is_yaml(&path) {
            files.push(path);
        }
    }
    Ok(files)
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
}

fn load_file(path: &Path) -> Result<Vec<Component>, ComponentsError> {
    let contents = fs::read_to_string(path).map_err(|e| ComponentsError::Read {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let parse_error = |e: serde_yaml::Error| ComponentsError::Parse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };

    let mut components = Vec::new();
    for document in serde_yaml::Deserializer::from_str(&contents) {
        let value = serde_yaml::Value::deserialize(document).map_err(parse_error)?;
        if value.is_null() {
            continue;
        }

        let manifest: Manifest = serde_yaml::from_value(value).map_err(parse_error)?;
        if manifest.kind.as_deref() != Some(COMPONENT_KIND) {
            continue;
        }

        components.push(into_component(manifest, path)?);
    }
    Ok(components)
}

fn into_component(manifest: Manifest, path: &Path) -> Result<Component, ComponentsError> {
    let invalid = |reason: &str| ComponentsError::Invalid {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    };

    let name = manifest
        .metadata
        .and_then(|m| m.name)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| invalid("component is missing metadata.name"))?;

    let spec = manifest
        .spec
        .ok_or_else(|| invalid("component is missing spec"))?;
    let component_type = spec
        .component_type
        .filter(|t| !t.is_empty())
        .ok_or_else(|| invalid(&format!("component {name} is missing spec.type")))?;

    Ok(Component {
        name,
        component_type,
        version: spec.version,
        source: path.to_path_buf(),
    })
}
