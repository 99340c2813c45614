//! Catalogue Loading
//!
//! Reads the root manifest and, for each school it lists, the adapter file found at
//! `<resources_root>/<resource_folder>/<adapters_file_name>`. Schools whose adapter
//! file is missing are skipped with a warning; every other failure is fatal.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::config::BuildConfig;
use crate::error::{BuildError, Result};

/// One entry of the root manifest
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SchoolEntry {
    pub id: String,
    pub resource_folder: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub initial: Option<String>,
}

/// One adapter as written in an adapter file. Every key is optional here;
/// defaults are applied when mapping into the index.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawAdapter {
    pub adapter_id: Option<String>,
    pub adapter_name: Option<String>,
    pub category: Option<String>,
    pub asset_js_path: Option<String>,
    pub import_url: Option<String>,
    pub description: Option<String>,
    pub maintainer: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RootManifest {
    #[serde(default)]
    schools: Option<Vec<SchoolEntry>>,
}

#[derive(Debug, Default, Deserialize)]
struct AdapterFile {
    #[serde(default)]
    adapters: Option<Vec<RawAdapter>>,
}

/// A manifest entry together with its parsed adapters
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedSchool {
    pub entry: SchoolEntry,
    pub adapters: Vec<RawAdapter>,
}

/// A manifest entry left out because its adapter file does not exist
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedSchool {
    pub id: String,
    pub adapters_path: PathBuf,
}

/// Result of loading the whole catalogue
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadOutcome {
    /// Loaded schools, in manifest order
    pub schools: Vec<LoadedSchool>,
    /// Skipped schools, in manifest order
    pub skipped: Vec<SkippedSchool>,
}

/// Load the root manifest and every adapter file it points at
pub fn load_catalogue(config: &BuildConfig) -> Result<LoadOutcome> {
    let entries = read_manifest(&config.paths.root_index)?;
    debug!(count = entries.len(), "read root manifest");

    let mut outcome = LoadOutcome::default();
    for entry in entries {
        let adapters_path = config.adapters_path(&entry.resource_folder);

        if !adapters_path.exists() {
            println!(
                "Warning: adapter config {} not found, skipping school {}",
                adapters_path.display(),
                entry.id
            );
            warn!(school = %entry.id, path = %adapters_path.display(), "adapter file missing");
            outcome.skipped.push(SkippedSchool {
                id: entry.id,
                adapters_path,
            });
            continue;
        }

        let adapters = read_adapters(&adapters_path)?;
        debug!(school = %entry.id, adapters = adapters.len(), "loaded adapters");
        outcome.schools.push(LoadedSchool { entry, adapters });
    }

    Ok(outcome)
}

/// Parse the root manifest. A missing file is a fatal error.
pub fn read_manifest(path: &Path) -> Result<Vec<SchoolEntry>> {
    if !path.exists() {
        return Err(BuildError::ManifestNotFound {
            path: path.to_path_buf(),
        });
    }
    let manifest: RootManifest = read_yaml(path)?;
    Ok(manifest.schools.unwrap_or_default())
}

/// Parse one adapter file. A missing `adapters` key yields no adapters.
pub fn read_adapters(path: &Path) -> Result<Vec<RawAdapter>> {
    let file: AdapterFile = read_yaml(path)?;
    Ok(file.adapters.unwrap_or_default())
}

/// Empty documents parse as the default value.
fn read_yaml<T: DeserializeOwned + Default>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).map_err(|e| BuildError::io(path, e))?;
    if content.trim().is_empty() {
        return Ok(T::default());
    }
    let parsed: Option<T> =
        serde_yaml::from_str(&content).map_err(|e| BuildError::yaml(path, e))?;
    Ok(parsed.unwrap_or_default())
}
