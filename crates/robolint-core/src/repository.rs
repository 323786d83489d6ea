//! Repository manifest validation and index maintenance.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::{Result, RobolintError};
use crate::report::ValidationReport;
use crate::schema::{missing_fields, REQUIRED_REPOSITORY_FIELDS};

const MANIFEST_FILE: &str = "repository.json";
const PLUGINS_DIR: &str = "plugins";
const INDEX_FILE: &str = "index.json";

/// A plugin repository rooted at a directory holding `repository.json`
/// and a `plugins/` directory.
#[derive(Debug, Clone)]
pub struct Repository {
    root: PathBuf,
}

/// Outcome of validating the repository manifest.
#[derive(Debug, Clone)]
pub struct ManifestValidation {
    pub report: ValidationReport,
    /// The parsed manifest, for callers that want to inspect it further.
    pub manifest: Value,
}

/// Summary of an index rebuild.
#[derive(Debug, Clone)]
pub struct IndexUpdate {
    /// Plugin files now listed in the index, in index order.
    pub plugins: Vec<String>,
    /// Whether a manifest was present and its cached count synced.
    pub manifest_updated: bool,
}

impl IndexUpdate {
    pub fn count(&self) -> usize {
        self.plugins.len()
    }
}

impl Repository {
    /// Repository rooted at the current working directory.
    pub fn new() -> Self {
        Self {
            root: PathBuf::from("."),
        }
    }

    /// Repository rooted at an explicit directory.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(MANIFEST_FILE)
    }

    pub fn plugins_dir(&self) -> PathBuf {
        self.root.join(PLUGINS_DIR)
    }

    pub fn index_path(&self) -> PathBuf {
        self.plugins_dir().join(INDEX_FILE)
    }

    /// Path of a plugin file listed in the index.
    pub fn plugin_path(&self, file: &str) -> PathBuf {
        self.plugins_dir().join(file)
    }

    // ========== Manifest validation ==========

    /// Validate the repository manifest and cross-check its cached plugin
    /// count against the index on disk.
    pub fn validate_manifest(&self) -> Result<ManifestValidation> {
        let path = self.manifest_path();
        if !path.exists() {
            return Err(RobolintError::ManifestNotFound { path });
        }

        let content = fs::read_to_string(&path)?;
        let manifest: Value =
            serde_json::from_str(&content).map_err(|e| RobolintError::ManifestParse {
                path: path.clone(),
                message: e.to_string(),
            })?;

        let mut report = ValidationReport::new();
        for field in missing_fields(&manifest, REQUIRED_REPOSITORY_FIELDS) {
            report.error(format!("Missing required repository field: {field}"));
        }

        if self.index_path().exists() {
            let actual = self.load_index()?.len();
            let reported = manifest
                .pointer("/stats/plugins")
                .and_then(Value::as_u64)
                .unwrap_or(0) as usize;
            if actual != reported {
                report.error(format!(
                    "Plugin count mismatch: reported {reported}, actual {actual}"
                ));
            }
        }

        Ok(ManifestValidation { report, manifest })
    }

    /// Load the plugin index file.
    pub fn load_index(&self) -> Result<Vec<String>> {
        let path = self.index_path();
        if !path.exists() {
            return Err(RobolintError::IndexNotFound { path });
        }

        let content = fs::read_to_string(&path)?;
        serde_json::from_str(&content).map_err(|e| RobolintError::IndexParse {
            path: path.clone(),
            message: e.to_string(),
        })
    }

    // ========== Index maintenance ==========

    /// Rebuild `plugins/index.json` from the plugin directory and sync the
    /// manifest's cached plugin count. The index is written first so the
    /// count is always recomputed from what is actually on disk.
    pub fn update_index(&self) -> Result<IndexUpdate> {
        let plugins_dir = self.plugins_dir();
        if !plugins_dir.is_dir() {
            return Err(RobolintError::PluginsDirNotFound { path: plugins_dir });
        }

        let mut plugins = Vec::new();
        for entry in fs::read_dir(&plugins_dir)? {
            let name = entry?.file_name().to_string_lossy().into_owned();
            if name.ends_with(".json") && name != INDEX_FILE {
                plugins.push(name);
            }
        }
        plugins.sort();

        fs::write(self.index_path(), serde_json::to_string_pretty(&plugins)?)?;

        let manifest_path = self.manifest_path();
        let mut manifest_updated = false;
        if manifest_path.exists() {
            let content = fs::read_to_string(&manifest_path)?;
            let mut manifest: Value =
                serde_json::from_str(&content).map_err(|e| RobolintError::ManifestParse {
                    path: manifest_path.clone(),
                    message: e.to_string(),
                })?;

            set_plugin_count(&mut manifest, plugins.len());
            fs::write(&manifest_path, serde_json::to_string_pretty(&manifest)?)?;
            manifest_updated = true;
        }

        Ok(IndexUpdate {
            plugins,
            manifest_updated,
        })
    }
}

impl Default for Repository {
    fn default() -> Self {
        Self::new()
    }
}

/// Set `stats.plugins`, creating the stats object when it is absent or
/// holds something other than an object.
fn set_plugin_count(manifest: &mut Value, count: usize) {
    let Some(root) = manifest.as_object_mut() else {
        return;
    };

    let stats = root
        .entry("stats")
        .or_insert_with(|| Value::Object(Map::new()));
    if !stats.is_object() {
        *stats = Value::Object(Map::new());
    }
    if let Some(stats) = stats.as_object_mut() {
        stats.insert("plugins".to_string(), Value::from(count));
    }
}
