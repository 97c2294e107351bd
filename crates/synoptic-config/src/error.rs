#![deny(unsafe_code)]

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse YAML config {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to parse JSON stage table {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("missing required key '{key}' in {path}")]
    MissingKey { path: PathBuf, key: &'static str },

    #[error("invalid config {path}: {message}")]
    InvalidConfig { path: PathBuf, message: String },

    #[error("duplicate organ code '{organ}'")]
    DuplicateOrgan { organ: String },

    #[error("duplicate {scope} code '{code}' in organ '{organ}'")]
    DuplicateCode {
        organ: String,
        scope: &'static str,
        code: String,
    },

    #[error("unsupported stage table file extension: {path}")]
    UnsupportedStageTable { path: PathBuf },
}

impl ConfigError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn invalid(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            path: path.into(),
            message: message.into(),
        }
    }
}
