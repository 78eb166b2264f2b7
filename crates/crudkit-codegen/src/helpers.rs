//! The shared helper set used by every template.

use crudkit_core::naming::to_snake_case;
use crudkit_core::FieldConfig;

/// Joins validation tokens into the emitted binding syntax
/// (`max:200` → `max=200`).
pub fn binding_rules(validations: &[String]) -> String {
    validations
        .iter()
        .map(|rule| rule.replacen(':', "=", 1))
        .collect::<Vec<_>>()
        .join(",")
}

/// Binding rules for partial updates: every field is optional, so
/// `required` is dropped and `omitempty` leads the list. Empty when no
/// rule survives.
pub fn update_binding_rules(validations: &[String]) -> String {
    let rest: Vec<String> = validations
        .iter()
        .filter(|rule| *rule != "required")
        .map(|rule| rule.replacen(':', "=", 1))
        .collect();
    if rest.is_empty() {
        return String::new();
    }
    format!("omitempty,{}", rest.join(","))
}

/// Assembles the storage (GORM-style) tag for a field.
pub fn gorm_tag(field: &FieldConfig) -> String {
    let mut tags = vec![
        format!("column:{}", field.name),
        format!("type:{}", field.column_type),
    ];
    if field.is_primary_key {
        tags.push("primaryKey".to_string());
    }
    if field.auto_increment {
        tags.push("autoIncrement".to_string());
    }
    if !field.nullable {
        tags.push("not null".to_string());
    }
    if let Some(default) = field.default_value.as_deref() {
        if !default.is_empty() {
            tags.push(format!("default:{default}"));
        }
    }
    format!("gorm:\"{}\"", tags.join(";"))
}

/// Assembles the JSON tag for a field; nullable fields get `omitempty`.
pub fn json_tag(field: &FieldConfig) -> String {
    let name = to_snake_case(&field.name);
    if field.nullable {
        format!("json:\"{name},omitempty\"")
    } else {
        format!("json:\"{name}\"")
    }
}

/// True if any field carries a time-valued back-end type.
pub fn needs_time_import(fields: &[FieldConfig]) -> bool {
    fields.iter().any(FieldConfig::is_time)
}

/// The primary-key column name, with the conventional fallback.
pub fn primary_key_name(fields: &[FieldConfig]) -> &str {
    fields
        .iter()
        .find(|f| f.is_primary_key)
        .map_or("id", |f| f.name.as_str())
}

/// The primary-key name as it appears on the wire.
pub fn primary_key_snake(fields: &[FieldConfig]) -> String {
    to_snake_case(primary_key_name(fields))
}

/// The fields participating in keyword search.
pub fn searchable_fields(fields: &[FieldConfig]) -> Vec<&FieldConfig> {
    fields.iter().filter(|f| f.searchable).collect()
}

/// Builds the OR'd LIKE condition across all searchable columns.
pub fn search_condition(fields: &[FieldConfig]) -> String {
    let searchable = searchable_fields(fields);
    if searchable.is_empty() {
        return "1=1".to_string();
    }
    searchable
        .iter()
        .map(|f| format!("{} LIKE ?", f.name))
        .collect::<Vec<_>>()
        .join(" OR ")
}

/// The extra bind parameters after the first: one `, keyword` per
/// additional searchable column.
pub fn search_params(fields: &[FieldConfig]) -> String {
    let count = searchable_fields(fields).len();
    if count <= 1 {
        return String::new();
    }
    ", keyword".repeat(count - 1)
}

/// The update-request representation of a field type: everything mutable is
/// optional, so value types gain a pointer marker.
pub fn go_update_type(field: &FieldConfig) -> String {
    if field.go_type.starts_with('*') {
        field.go_type.clone()
    } else {
        format!("*{}", field.go_type)
    }
}

/// The front-end default value for a form field.
pub fn ts_default(field: &FieldConfig) -> &'static str {
    match field.ts_type.as_str() {
        "number" => "0",
        "boolean" => "false",
        "string" => "''",
        _ if field.nullable => "undefined",
        _ => "''",
    }
}

/// Finds the numeric argument of a `prefix:<n>` validation token.
pub fn rule_value<'a>(validations: &'a [String], prefix: &str) -> Option<&'a str> {
    validations
        .iter()
        .find_map(|rule| rule.strip_prefix(prefix).and_then(|r| r.strip_prefix(':')))
}
