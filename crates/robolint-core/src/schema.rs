//! Schema rule tables for plugin and repository validation.
//!
//! Rules are plain data: required-field lists, enum sets, and format
//! patterns, consumed by the generic checking helpers below. Keeping them
//! enumerable keeps the error-message wording in one place.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// Top-level fields every plugin document must carry.
pub const REQUIRED_PLUGIN_FIELDS: &[&str] = &[
    "robotId",
    "name",
    "platform",
    "version",
    "pluginApiVersion",
    "hriStudioVersion",
    "trustLevel",
    "category",
];

/// Publisher-trust classifications.
pub const VALID_TRUST_LEVELS: &[&str] = &["official", "verified", "community"];

/// Plugin categories.
pub const VALID_CATEGORIES: &[&str] = &[
    "mobile-robot",
    "humanoid-robot",
    "manipulator",
    "drone",
    "sensor-platform",
    "simulation",
];

/// Fields every action record must carry.
pub const REQUIRED_ACTION_FIELDS: &[&str] = &["id", "name", "category", "parameterSchema"];

/// Action categories.
pub const VALID_ACTION_CATEGORIES: &[&str] = &["movement", "interaction", "sensors", "logic"];

/// Protocol blocks an action may declare; at least one is required.
pub const PROTOCOL_FIELDS: &[&str] = &["ros2", "naoqi", "restApi"];

/// Top-level fields the repository manifest must carry.
pub const REQUIRED_REPOSITORY_FIELDS: &[&str] =
    &["id", "name", "apiVersion", "pluginApiVersion", "trust"];

/// Lowercase alphanumeric with hyphens, e.g. "pepper-robot".
pub static ROBOT_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z0-9-]+$").unwrap());

/// Semantic version prefix; trailing pre-release or build suffixes are
/// accepted as-is.
pub static VERSION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\d+\.\d+").unwrap());

/// snake_case action identifiers.
pub static ACTION_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z_]+$").unwrap());

/// Presence test used by every "missing/falsy" rule: null, false, numeric
/// zero and the empty string count as missing. Arrays and objects are
/// always present, including empty ones.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Look up a field, returning it only when present with a truthy value.
pub fn truthy_field<'a>(doc: &'a Value, key: &str) -> Option<&'a Value> {
    doc.get(key).filter(|v| is_truthy(v))
}

/// Required fields that are absent or falsy, in table order.
pub fn missing_fields<'a>(doc: &Value, required: &[&'a str]) -> Vec<&'a str> {
    required
        .iter()
        .filter(|field| truthy_field(doc, field).is_none())
        .copied()
        .collect()
}

/// True when the value is a string matching the pattern. Non-string values
/// never match.
pub fn matches_pattern(value: &Value, pattern: &Regex) -> bool {
    value.as_str().map(|s| pattern.is_match(s)).unwrap_or(false)
}

/// True when the value is a string listed in the enum table.
pub fn in_enum(value: &Value, allowed: &[&str]) -> bool {
    value.as_str().map(|s| allowed.contains(&s)).unwrap_or(false)
}

/// Render a field value for an error message: strings bare, everything
/// else as JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
