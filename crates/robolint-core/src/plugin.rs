//! Plugin document validation.
//!
//! Loads one plugin JSON file and runs every document-level rule against
//! it. Load and parse problems surface as [`RobolintError`]; content
//! violations accumulate in the returned [`ValidationReport`].

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::action::validate_action;
use crate::error::{Result, RobolintError};
use crate::report::ValidationReport;
use crate::schema::{
    display_value, in_enum, is_truthy, matches_pattern, missing_fields, truthy_field,
    REQUIRED_PLUGIN_FIELDS, ROBOT_ID_RE, VALID_CATEGORIES, VALID_TRUST_LEVELS, VERSION_RE,
};

/// Asset paths under this prefix are resolved against the repository root
/// and existence-checked; anything else is taken as-is.
const ASSET_PREFIX: &str = "assets/";

/// Outcome of validating a single plugin document.
#[derive(Debug, Clone)]
pub struct PluginValidation {
    pub report: ValidationReport,
    /// The parsed document, for callers that want to inspect it further.
    pub document: Value,
}

/// Load and validate one plugin file.
pub fn validate_plugin(path: &Path) -> Result<PluginValidation> {
    let document = load_document(path)?;
    let report = validate_document(&document, path);
    Ok(PluginValidation { report, document })
}

fn load_document(path: &Path) -> Result<Value> {
    if !path.exists() {
        return Err(RobolintError::PluginNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| RobolintError::PluginParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Run every document rule against an already-parsed plugin. `path` is
/// only used to resolve relative asset references.
///
/// Rules never short-circuit: one pass reports the full finding set.
pub fn validate_document(document: &Value, path: &Path) -> ValidationReport {
    let mut report = ValidationReport::new();

    for field in missing_fields(document, REQUIRED_PLUGIN_FIELDS) {
        report.error(format!("Missing required field: {field}"));
    }

    if let Some(robot_id) = truthy_field(document, "robotId") {
        if !matches_pattern(robot_id, &ROBOT_ID_RE) {
            report.error("robotId must be lowercase with hyphens only");
        }
    }

    if let Some(version) = truthy_field(document, "version") {
        if !matches_pattern(version, &VERSION_RE) {
            report.error("version must follow semantic versioning (e.g., 1.0.0)");
        }
    }

    if let Some(trust_level) = truthy_field(document, "trustLevel") {
        if !in_enum(trust_level, VALID_TRUST_LEVELS) {
            report.error(format!(
                "Invalid trustLevel: {}. Must be: official, verified, or community",
                display_value(trust_level)
            ));
        }
    }

    if let Some(category) = truthy_field(document, "category") {
        if !in_enum(category, VALID_CATEGORIES) {
            report.error(format!(
                "Invalid category: {}. Valid categories: {}",
                display_value(category),
                VALID_CATEGORIES.join(", ")
            ));
        }
    }

    check_actions(document, &mut report);
    check_assets(document, path, &mut report);

    if document
        .pointer("/manufacturer/name")
        .filter(|v| is_truthy(v))
        .is_none()
    {
        report.warn("manufacturer.name is recommended");
    }

    report
}

fn check_actions(document: &Value, report: &mut ValidationReport) {
    match truthy_field(document, "actions").and_then(Value::as_array) {
        None => report.error("Plugin must have an actions array"),
        Some(actions) if actions.is_empty() => report.warn("Plugin has no actions defined"),
        Some(actions) => {
            for (index, action) in actions.iter().enumerate() {
                for message in validate_action(action, index) {
                    report.error(message);
                }
            }
        }
    }
}

fn check_assets(document: &Value, path: &Path, report: &mut ValidationReport) {
    let Some(assets) = truthy_field(document, "assets") else {
        report.error("Plugin must have assets definition");
        return;
    };

    if assets.get("thumbnailUrl").filter(|v| is_truthy(v)).is_none() {
        report.error("assets.thumbnailUrl is required");
    }

    let mut checks: Vec<(String, Option<&Value>)> = vec![
        ("thumbnailUrl".to_string(), assets.get("thumbnailUrl")),
        ("main image".to_string(), assets.pointer("/images/main")),
        ("logo".to_string(), assets.pointer("/images/logo")),
    ];

    if let Some(angles) = assets.pointer("/images/angles").and_then(Value::as_object) {
        for (angle, asset_path) in angles {
            checks.push((format!("{angle} angle"), Some(asset_path)));
        }
    }

    for (description, asset_path) in checks {
        let Some(asset_path) = asset_path.and_then(Value::as_str) else {
            continue;
        };
        if !asset_path.starts_with(ASSET_PREFIX) {
            continue;
        }
        if !resolve_asset(path, asset_path).exists() {
            report.warn(format!("Asset not found: {description} ({asset_path})"));
        }
    }
}

/// Asset paths are relative to the repository root, one level above the
/// directory holding the plugin file.
fn resolve_asset(plugin_path: &Path, asset_path: &str) -> PathBuf {
    plugin_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join("..")
        .join(asset_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    /// Lay out a repository root with a plugins/ directory and write the
    /// document there, mirroring the on-disk shape asset resolution expects.
    fn write_plugin(root: &TempDir, name: &str, document: &Value) -> PathBuf {
        let plugins_dir = root.path().join("plugins");
        fs::create_dir_all(&plugins_dir).unwrap();
        let path = plugins_dir.join(name);
        fs::write(&path, serde_json::to_string_pretty(document).unwrap()).unwrap();
        path
    }

    fn valid_plugin() -> Value {
        json!({
            "robotId": "pepper-robot",
            "name": "Pepper",
            "platform": "naoqi",
            "version": "2.1.0",
            "pluginApiVersion": "1.0",
            "hriStudioVersion": ">=0.9",
            "trustLevel": "official",
            "category": "humanoid-robot",
            "manufacturer": { "name": "SoftBank Robotics" },
            "assets": { "thumbnailUrl": "https://cdn.example.com/pepper.png" },
            "actions": [{
                "id": "say_text",
                "name": "Say Text",
                "category": "interaction",
                "parameterSchema": {
                    "type": "object",
                    "properties": { "text": { "type": "string" } },
                    "required": ["text"]
                },
                "naoqi": { "module": "ALTextToSpeech" }
            }]
        })
    }

    #[test]
    fn valid_plugin_passes_clean() {
        let root = TempDir::new().unwrap();
        let path = write_plugin(&root, "pepper.json", &valid_plugin());

        let validation = validate_plugin(&path).unwrap();
        assert!(validation.report.is_valid());
        assert!(validation.report.warnings.is_empty());
        assert_eq!(validation.document["robotId"], json!("pepper-robot"));
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let err = validate_plugin(Path::new("does/not/exist.json")).unwrap_err();
        assert!(matches!(err, RobolintError::PluginNotFound { .. }));
    }

    #[test]
    fn invalid_json_is_a_load_error() {
        let root = TempDir::new().unwrap();
        let plugins_dir = root.path().join("plugins");
        fs::create_dir_all(&plugins_dir).unwrap();
        let path = plugins_dir.join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        let err = validate_plugin(&path).unwrap_err();
        assert!(matches!(err, RobolintError::PluginParse { .. }));
    }

    #[test]
    fn empty_document_reports_each_missing_field_once() {
        let report = validate_document(&json!({}), Path::new("plugins/x.json"));

        let missing: Vec<_> = report
            .errors
            .iter()
            .filter(|e| e.starts_with("Missing required field:"))
            .collect();
        assert_eq!(missing.len(), REQUIRED_PLUGIN_FIELDS.len());
        for field in REQUIRED_PLUGIN_FIELDS {
            assert!(report
                .errors
                .contains(&format!("Missing required field: {field}")));
        }
        assert!(report.errors.contains(&"Plugin must have an actions array".to_string()));
        assert!(report
            .errors
            .contains(&"Plugin must have assets definition".to_string()));
    }

    #[test]
    fn robot_id_format_is_checked_only_when_present() {
        let mut plugin = valid_plugin();
        plugin["robotId"] = json!("My_Robot!");
        let report = validate_document(&plugin, Path::new("plugins/x.json"));
        assert!(report
            .errors
            .contains(&"robotId must be lowercase with hyphens only".to_string()));

        plugin["robotId"] = json!("my-robot-2");
        let report = validate_document(&plugin, Path::new("plugins/x.json"));
        assert!(!report
            .errors
            .iter()
            .any(|e| e.contains("robotId")));
    }

    #[test]
    fn version_prefix_match_is_permissive_about_suffixes() {
        let mut plugin = valid_plugin();

        plugin["version"] = json!("1.0");
        let report = validate_document(&plugin, Path::new("plugins/x.json"));
        assert!(report
            .errors
            .contains(&"version must follow semantic versioning (e.g., 1.0.0)".to_string()));

        for ok in ["1.0.0-beta", "1.0.0???"] {
            plugin["version"] = json!(ok);
            let report = validate_document(&plugin, Path::new("plugins/x.json"));
            assert!(!report.errors.iter().any(|e| e.contains("semantic versioning")));
        }
    }

    #[test]
    fn trust_level_enum_names_valid_values() {
        let mut plugin = valid_plugin();
        plugin["trustLevel"] = json!("premium");
        let report = validate_document(&plugin, Path::new("plugins/x.json"));
        assert!(report.errors.contains(
            &"Invalid trustLevel: premium. Must be: official, verified, or community".to_string()
        ));
    }

    #[test]
    fn category_enum_lists_valid_categories() {
        let mut plugin = valid_plugin();
        plugin["category"] = json!("vacuum");
        let report = validate_document(&plugin, Path::new("plugins/x.json"));
        assert!(report.errors.contains(
            &"Invalid category: vacuum. Valid categories: mobile-robot, humanoid-robot, \
              manipulator, drone, sensor-platform, simulation"
                .to_string()
        ));
    }

    #[test]
    fn empty_actions_is_warning_not_error() {
        let mut plugin = valid_plugin();
        plugin["actions"] = json!([]);
        let report = validate_document(&plugin, Path::new("plugins/x.json"));
        assert!(report.is_valid());
        assert!(report
            .warnings
            .contains(&"Plugin has no actions defined".to_string()));
    }

    #[test]
    fn non_array_actions_is_an_error() {
        let mut plugin = valid_plugin();
        plugin["actions"] = json!({"say_text": {}});
        let report = validate_document(&plugin, Path::new("plugins/x.json"));
        assert!(report
            .errors
            .contains(&"Plugin must have an actions array".to_string()));
    }

    #[test]
    fn action_errors_carry_their_index() {
        let mut plugin = valid_plugin();
        plugin["actions"].as_array_mut().unwrap().push(json!({
            "id": "badId",
            "name": "Bad",
            "category": "movement",
            "parameterSchema": { "type": "object", "properties": {}, "required": [] },
            "ros2": {}
        }));
        let report = validate_document(&plugin, Path::new("plugins/x.json"));
        assert_eq!(
            report.errors,
            vec!["Action 1: id must be snake_case (lowercase with underscores)"]
        );
    }

    #[test]
    fn missing_assets_definition_is_an_error() {
        let mut plugin = valid_plugin();
        plugin.as_object_mut().unwrap().remove("assets");
        let report = validate_document(&plugin, Path::new("plugins/x.json"));
        assert!(report
            .errors
            .contains(&"Plugin must have assets definition".to_string()));
    }

    #[test]
    fn missing_thumbnail_is_an_error() {
        let mut plugin = valid_plugin();
        plugin["assets"] = json!({});
        let report = validate_document(&plugin, Path::new("plugins/x.json"));
        assert!(report
            .errors
            .contains(&"assets.thumbnailUrl is required".to_string()));
    }

    #[test]
    fn unresolved_asset_path_is_a_warning() {
        let root = TempDir::new().unwrap();
        let mut plugin = valid_plugin();
        plugin["assets"] = json!({
            "thumbnailUrl": "assets/img/missing.png"
        });
        let path = write_plugin(&root, "pepper.json", &plugin);

        let validation = validate_plugin(&path).unwrap();
        assert!(validation.report.is_valid());
        assert_eq!(
            validation.report.warnings,
            vec!["Asset not found: thumbnailUrl (assets/img/missing.png)"]
        );
    }

    #[test]
    fn existing_asset_produces_no_warning() {
        let root = TempDir::new().unwrap();
        fs::create_dir_all(root.path().join("assets/img")).unwrap();
        fs::write(root.path().join("assets/img/thumb.png"), b"png").unwrap();

        let mut plugin = valid_plugin();
        plugin["assets"] = json!({ "thumbnailUrl": "assets/img/thumb.png" });
        let path = write_plugin(&root, "pepper.json", &plugin);

        let validation = validate_plugin(&path).unwrap();
        assert!(validation.report.warnings.is_empty());
    }

    #[test]
    fn external_asset_paths_are_never_checked() {
        let root = TempDir::new().unwrap();
        let mut plugin = valid_plugin();
        plugin["assets"] = json!({
            "thumbnailUrl": "https://cdn.example.com/definitely-missing.png",
            "images": { "main": "img/also-not-checked.png" }
        });
        let path = write_plugin(&root, "pepper.json", &plugin);

        let validation = validate_plugin(&path).unwrap();
        assert!(validation.report.warnings.is_empty());
    }

    #[test]
    fn angle_images_are_checked_per_key() {
        let root = TempDir::new().unwrap();
        fs::create_dir_all(root.path().join("assets")).unwrap();
        fs::write(root.path().join("assets/front.png"), b"png").unwrap();

        let mut plugin = valid_plugin();
        plugin["assets"] = json!({
            "thumbnailUrl": "https://cdn.example.com/t.png",
            "images": {
                "angles": {
                    "front": "assets/front.png",
                    "rear": "assets/rear.png"
                }
            }
        });
        let path = write_plugin(&root, "pepper.json", &plugin);

        let validation = validate_plugin(&path).unwrap();
        assert_eq!(
            validation.report.warnings,
            vec!["Asset not found: rear angle (assets/rear.png)"]
        );
    }

    #[test]
    fn missing_manufacturer_name_is_a_warning() {
        let mut plugin = valid_plugin();
        plugin.as_object_mut().unwrap().remove("manufacturer");
        let report = validate_document(&plugin, Path::new("plugins/x.json"));
        assert!(report.is_valid());
        assert!(report
            .warnings
            .contains(&"manufacturer.name is recommended".to_string()));
    }
}
