//! Configuration for the index builder
//!
//! Every build runs against the fixed catalogue layout below. `BuildConfig` carries
//! those paths into each stage so they can be rebased onto another directory; the
//! schema version is not configurable and always comes from `PROTOCOL_VERSION`.
//!
//! ## Fixed layout:
//! ```toml
//! [paths]
//! root_index = "index/root_index.yaml"
//! resources_root = "resources"
//! adapters_file_name = "adapters.yaml"
//! output = "school_index.pb"
//! ```

use config_crate::{Config, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Main configuration for a build
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Input and output locations
    #[serde(default)]
    pub paths: PathsConfig,
}

/// Input and output locations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Root manifest listing every school
    #[serde(default = "default_root_index")]
    pub root_index: PathBuf,

    /// Directory holding one folder per school
    #[serde(default = "default_resources_root")]
    pub resources_root: PathBuf,

    /// Adapter list file name inside each school folder
    #[serde(default = "default_adapters_file_name")]
    pub adapters_file_name: String,

    /// Binary artifact path
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

// Default value functions
fn default_root_index() -> PathBuf {
    PathBuf::from("index/root_index.yaml")
}

fn default_resources_root() -> PathBuf {
    PathBuf::from("resources")
}

fn default_adapters_file_name() -> String {
    "adapters.yaml".to_string()
}

fn default_output() -> PathBuf {
    PathBuf::from("school_index.pb")
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            root_index: default_root_index(),
            resources_root: default_resources_root(),
            adapters_file_name: default_adapters_file_name(),
            output: default_output(),
        }
    }
}

impl BuildConfig {
    /// Read a layout from one explicit TOML file. Keys it omits keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from(path).required(true))
            .build()?;
        Ok(config.try_deserialize()?)
    }

    /// Save configuration to a file
    pub fn save(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }

    /// Resolve every relative path against `root`
    pub fn with_root(mut self, root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        let rebase = |p: &PathBuf| {
            if p.is_absolute() {
                p.clone()
            } else {
                root.join(p)
            }
        };
        self.paths.root_index = rebase(&self.paths.root_index);
        self.paths.resources_root = rebase(&self.paths.resources_root);
        self.paths.output = rebase(&self.paths.output);
        self
    }

    /// Location of the adapter list for one school folder
    pub fn adapters_path(&self, resource_folder: &str) -> PathBuf {
        self.paths
            .resources_root
            .join(resource_folder)
            .join(&self.paths.adapters_file_name)
    }
}
