use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RobolintError {
    #[error("Plugin file not found: {path}")]
    PluginNotFound { path: PathBuf },

    #[error("Invalid JSON syntax: {message}")]
    PluginParse { path: PathBuf, message: String },

    #[error("repository.json not found")]
    ManifestNotFound { path: PathBuf },

    #[error("Invalid repository.json: {message}")]
    ManifestParse { path: PathBuf, message: String },

    #[error("plugins/index.json not found")]
    IndexNotFound { path: PathBuf },

    #[error("Invalid plugin index: {message}")]
    IndexParse { path: PathBuf, message: String },

    #[error("plugins directory not found")]
    PluginsDirNotFound { path: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RobolintError>;

impl RobolintError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::PluginNotFound { .. } => 2,
            Self::ManifestNotFound { .. } => 3,
            Self::IndexNotFound { .. } => 4,
            Self::PluginsDirNotFound { .. } => 5,
            _ => 1,
        }
    }
}
