//! Per-action validation rules.

use serde_json::Value;

use crate::schema::{
    display_value, in_enum, is_truthy, matches_pattern, missing_fields, truthy_field,
    ACTION_ID_RE, PROTOCOL_FIELDS, REQUIRED_ACTION_FIELDS, VALID_ACTION_CATEGORIES,
};

/// Validate one action record. `index` is the action's position within the
/// plugin's actions array and prefixes every message.
///
/// All action findings are hard errors. The rules are independent: a
/// single pass reports everything wrong with the record.
pub fn validate_action(action: &Value, index: usize) -> Vec<String> {
    let mut errors = Vec::new();

    for field in missing_fields(action, REQUIRED_ACTION_FIELDS) {
        errors.push(format!("Action {index}: missing required field '{field}'"));
    }

    if let Some(id) = truthy_field(action, "id") {
        if !matches_pattern(id, &ACTION_ID_RE) {
            errors.push(format!(
                "Action {index}: id must be snake_case (lowercase with underscores)"
            ));
        }
    }

    if let Some(category) = truthy_field(action, "category") {
        if !in_enum(category, VALID_ACTION_CATEGORIES) {
            errors.push(format!(
                "Action {index}: invalid category '{}'. Valid: {}",
                display_value(category),
                VALID_ACTION_CATEGORIES.join(", ")
            ));
        }
    }

    if let Some(schema) = truthy_field(action, "parameterSchema") {
        if schema.get("type").and_then(Value::as_str) != Some("object") {
            errors.push(format!("Action {index}: parameterSchema.type must be 'object'"));
        }

        if schema.get("properties").filter(|v| is_truthy(v)).is_none() {
            errors.push(format!("Action {index}: parameterSchema must have properties"));
        }

        if !schema.get("required").map(Value::is_array).unwrap_or(false) {
            errors.push(format!("Action {index}: parameterSchema.required must be an array"));
        }
    }

    let has_protocol = PROTOCOL_FIELDS
        .iter()
        .any(|protocol| truthy_field(action, protocol).is_some());
    if !has_protocol {
        errors.push(format!(
            "Action {index}: must have at least one communication protocol (ros2, naoqi, or restApi)"
        ));
    }

    errors
}
