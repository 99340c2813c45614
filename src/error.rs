//! Error types for the index builder

use std::path::PathBuf;

use thiserror::Error;

/// Result type for build operations
pub type Result<T> = std::result::Result<T, BuildError>;

/// Index build errors
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Root index file not found: {}", path.display())]
    ManifestNotFound { path: PathBuf },

    #[error("IO error on {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML error in {}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Encode error: {0}")]
    Encode(#[from] prost::EncodeError),

    #[error("Decode error: {0}")]
    Decode(#[from] prost::DecodeError),

    #[error("Could not publish artifact {}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config error: {0}")]
    Config(#[from] config_crate::ConfigError),
}

impl BuildError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    pub(crate) fn yaml(path: impl Into<PathBuf>, source: serde_yaml::Error) -> Self {
        Self::Yaml { path: path.into(), source }
    }
}
