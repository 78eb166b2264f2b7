//! Static type mapping: database column → back-end type → front-end type,
//! plus form-widget and validation-rule inference.

use serde::{Deserialize, Serialize};

use crate::schema::ColumnInfo;

/// Ordered prefix table from raw column types to back-end (Go) types.
///
/// The order is significant where one prefix contains another
/// (`timestamp` before `time`, `integer` before `int`); prefix matching
/// takes the first hit.
const COLUMN_TO_GO: &[(&str, &str)] = &[
    ("tinyint", "int8"),
    ("smallint", "int16"),
    ("mediumint", "int32"),
    ("integer", "int"),
    ("int", "int"),
    ("bigint", "int64"),
    ("float", "float32"),
    ("double", "float64"),
    ("decimal", "float64"),
    ("varchar", "string"),
    ("char", "string"),
    ("tinytext", "string"),
    ("mediumtext", "string"),
    ("longtext", "string"),
    ("text", "string"),
    ("datetime", "time.Time"),
    ("timestamp", "time.Time"),
    ("time", "time.Time"),
    ("date", "time.Time"),
    ("year", "int"),
    ("json", "string"),
    ("tinyblob", "[]byte"),
    ("mediumblob", "[]byte"),
    ("longblob", "[]byte"),
    ("blob", "[]byte"),
    ("enum", "string"),
    ("set", "string"),
];

/// Back-end type → front-end (TypeScript) type.
const GO_TO_TS: &[(&str, &str)] = &[
    ("int", "number"),
    ("int8", "number"),
    ("int16", "number"),
    ("int32", "number"),
    ("int64", "number"),
    ("uint", "number"),
    ("uint8", "number"),
    ("uint16", "number"),
    ("uint32", "number"),
    ("uint64", "number"),
    ("float32", "number"),
    ("float64", "number"),
    ("string", "string"),
    ("bool", "boolean"),
    ("time.Time", "string"),
    ("[]byte", "string"),
];

/// The form control chosen for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormWidget {
    #[default]
    Input,
    Password,
    Email,
    Tel,
    Url,
    Upload,
    Editor,
    Textarea,
    Switch,
    Select,
    Number,
    Date,
    Datetime,
}

impl FormWidget {
    /// The document/token form of the widget.
    pub fn as_str(self) -> &'static str {
        match self {
            FormWidget::Input => "input",
            FormWidget::Password => "password",
            FormWidget::Email => "email",
            FormWidget::Tel => "tel",
            FormWidget::Url => "url",
            FormWidget::Upload => "upload",
            FormWidget::Editor => "editor",
            FormWidget::Textarea => "textarea",
            FormWidget::Switch => "switch",
            FormWidget::Select => "select",
            FormWidget::Number => "number",
            FormWidget::Date => "date",
            FormWidget::Datetime => "datetime",
        }
    }
}

impl std::fmt::Display for FormWidget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps a raw column type to a back-end type.
///
/// Nullable value types are wrapped as pointers; strings and byte slices
/// stay as-is since their zero values already encode absence. Unknown types
/// fall through to `string`.
pub fn go_type(column_type: &str, nullable: bool) -> String {
    for (prefix, go) in COLUMN_TO_GO {
        if column_type.starts_with(prefix) {
            if nullable && *go != "string" && *go != "[]byte" {
                return format!("*{go}");
            }
            return (*go).to_string();
        }
    }
    "string".to_string()
}

/// Maps a back-end type to a front-end type. Pointer markers are stripped
/// before lookup; unmapped types become `any`.
pub fn ts_type(go_type: &str) -> String {
    let bare = go_type.strip_prefix('*').unwrap_or(go_type);
    GO_TO_TS
        .iter()
        .find(|(go, _)| *go == bare)
        .map_or_else(|| "any".to_string(), |(_, ts)| (*ts).to_string())
}

/// Infers the form widget from a field name: exact match against the closed
/// map, then the `is_` prefix rule, then plain input.
pub fn widget_for(field_name: &str) -> FormWidget {
    let name = field_name.to_lowercase();
    match name.as_str() {
        "password" => FormWidget::Password,
        "email" => FormWidget::Email,
        "phone" => FormWidget::Tel,
        "url" => FormWidget::Url,
        "avatar" | "image" | "file" => FormWidget::Upload,
        "content" => FormWidget::Editor,
        "description" | "remark" => FormWidget::Textarea,
        "status" => FormWidget::Switch,
        "type" | "category" => FormWidget::Select,
        "date" => FormWidget::Date,
        "time" | "created_at" | "updated_at" => FormWidget::Datetime,
        _ if name.starts_with("is_") => FormWidget::Switch,
        _ => FormWidget::Input,
    }
}

/// Infers validation-rule tokens for a column.
pub fn validations_for(column: &ColumnInfo) -> Vec<String> {
    let mut rules = Vec::new();

    if !column.nullable && !column.is_primary() && !column.auto_increment {
        rules.push("required".to_string());
    }

    match column.name.as_str() {
        "email" => rules.push("email".to_string()),
        "phone" => rules.push("len:11".to_string()),
        "password" => rules.push("min:6".to_string()),
        "url" => rules.push("url".to_string()),
        _ => {}
    }

    if column.column_type.contains("varchar") {
        if let Some(len) = extract_length(&column.column_type) {
            rules.push(format!("max:{len}"));
        }
    }

    rules
}

/// Extracts the parenthesized length from a type like `varchar(255)`.
/// Missing parens or a non-numeric length yield `None`.
pub fn extract_length(column_type: &str) -> Option<u32> {
    let start = column_type.find('(')?;
    let end = column_type.find(')')?;
    column_type.get(start + 1..end)?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::KeyKind;

    fn column(name: &str, ty: &str, nullable: bool) -> ColumnInfo {
        ColumnInfo {
            name: name.to_string(),
            column_type: ty.to_string(),
            nullable,
            key: KeyKind::None,
            default_value: None,
            auto_increment: false,
            comment: String::new(),
        }
    }

    #[test]
    fn test_go_type_prefix_match() {
        assert_eq!(go_type("int", false), "int");
        assert_eq!(go_type("int(11)", false), "int");
        assert_eq!(go_type("bigint unsigned", false), "int64");
        assert_eq!(go_type("varchar(200)", false), "string");
        assert_eq!(go_type("longtext", false), "string");
        assert_eq!(go_type("datetime", false), "time.Time");
        assert_eq!(go_type("timestamp", false), "time.Time");
        assert_eq!(go_type("mediumblob", false), "[]byte");
        assert_eq!(go_type("enum('a','b')", false), "string");
    }

    #[test]
    fn test_go_type_nullable_wrapping() {
        assert_eq!(go_type("int", true), "*int");
        assert_eq!(go_type("datetime", true), "*time.Time");
        // Strings and byte slices are never wrapped.
        assert_eq!(go_type("varchar(50)", true), "string");
        assert_eq!(go_type("blob", true), "[]byte");
    }

    #[test]
    fn test_go_type_unknown_passes_through_as_string() {
        assert_eq!(go_type("geometry", false), "string");
        assert_eq!(go_type("point", true), "string");
    }

    #[test]
    fn test_ts_type() {
        assert_eq!(ts_type("int64"), "number");
        assert_eq!(ts_type("*int8"), "number");
        assert_eq!(ts_type("string"), "string");
        assert_eq!(ts_type("bool"), "boolean");
        assert_eq!(ts_type("*time.Time"), "string");
        assert_eq!(ts_type("[]byte"), "string");
        assert_eq!(ts_type("unknown.Thing"), "any");
    }

    #[test]
    fn test_widget_inference() {
        assert_eq!(widget_for("password"), FormWidget::Password);
        assert_eq!(widget_for("email"), FormWidget::Email);
        assert_eq!(widget_for("phone"), FormWidget::Tel);
        assert_eq!(widget_for("avatar"), FormWidget::Upload);
        assert_eq!(widget_for("content"), FormWidget::Editor);
        assert_eq!(widget_for("remark"), FormWidget::Textarea);
        assert_eq!(widget_for("is_active"), FormWidget::Switch);
        assert_eq!(widget_for("category"), FormWidget::Select);
        assert_eq!(widget_for("created_at"), FormWidget::Datetime);
        assert_eq!(widget_for("nickname"), FormWidget::Input);
        // `is_` is a prefix rule, not a substring rule.
        assert_eq!(widget_for("analysis_id"), FormWidget::Input);
    }

    #[test]
    fn test_validations() {
        let mut title = column("title", "varchar(200)", false);
        assert_eq!(validations_for(&title), vec!["required", "max:200"]);
        title.nullable = true;
        assert_eq!(validations_for(&title), vec!["max:200"]);

        let email = column("email", "varchar(100)", false);
        assert_eq!(validations_for(&email), vec!["required", "email", "max:100"]);

        let phone = column("phone", "char(11)", false);
        assert_eq!(validations_for(&phone), vec!["required", "len:11"]);

        let password = column("password", "varchar(255)", false);
        assert_eq!(
            validations_for(&password),
            vec!["required", "min:6", "max:255"]
        );

        let mut id = column("id", "int", false);
        id.key = KeyKind::Primary;
        id.auto_increment = true;
        assert!(validations_for(&id).is_empty());
    }

    #[test]
    fn test_extract_length_boundaries() {
        assert_eq!(extract_length("varchar(255)"), Some(255));
        assert_eq!(extract_length("varchar"), None);
        assert_eq!(extract_length("varchar(abc)"), None);
        assert_eq!(extract_length("varchar()"), None);
    }
}
