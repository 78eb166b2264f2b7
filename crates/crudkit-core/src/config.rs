//! The canonical configuration document and its YAML persistence.
//!
//! The document is the user's customization point: `init:config` writes it,
//! the user edits it, `gen:crud --config` consumes it. Loading always runs
//! [`CrudConfig::normalize`], so derived names can never drift from the
//! stored model name.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::naming;
use crate::typemap::FormWidget;

/// Errors produced while loading, saving or normalizing a config document.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config document: {0}")]
    Yaml(#[from] serde_yml::Error),

    #[error("duplicate field name after normalization: {0}")]
    DuplicateField(String),

    #[error("config has no table name")]
    MissingTable,
}

/// An entity relation declared in the document.
///
/// Relations are carried through load/save but are not realized by the
/// current template set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    /// `belongs_to`, `has_many` or `has_one`.
    pub r#type: String,
    pub model: String,
    #[serde(default)]
    pub foreign_key: String,
    #[serde(default)]
    pub display_field: String,
}

/// UI/transport-enriched view of one column.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FieldConfig {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: String,
    pub go_type: String,
    pub ts_type: String,

    #[serde(default)]
    pub nullable: bool,
    #[serde(default)]
    pub is_primary_key: bool,
    #[serde(default)]
    pub auto_increment: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(default)]
    pub comment: String,

    #[serde(default)]
    pub validations: Vec<String>,

    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub form_type: FormWidget,
    #[serde(default)]
    pub list_visible: bool,
    #[serde(default)]
    pub form_visible: bool,
    #[serde(default)]
    pub searchable: bool,
    #[serde(default)]
    pub sortable: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation: Option<Relation>,
}

impl FieldConfig {
    /// True if the field holds a time value on the back end.
    pub fn is_time(&self) -> bool {
        self.go_type.contains("time.Time")
    }

    /// True if the field appears in the create request.
    pub fn in_create_request(&self) -> bool {
        self.form_visible && !self.auto_increment && !self.is_primary_key
    }

    /// True if the field appears in the update request.
    pub fn in_update_request(&self) -> bool {
        self.form_visible && !self.is_primary_key && !self.auto_increment
    }
}

/// Feature toggles for the generated slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Features {
    #[serde(default)]
    pub soft_delete: bool,
    #[serde(default)]
    pub timestamps: bool,
    #[serde(default)]
    pub pagination: bool,
    #[serde(default)]
    pub search: bool,
    #[serde(default)]
    pub sort: bool,
    #[serde(default)]
    pub export: bool,
    #[serde(default)]
    pub import: bool,
    #[serde(default)]
    pub batch_delete: bool,
}

/// Front-end presentation settings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FrontendConfig {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub show_in_menu: bool,
    #[serde(default)]
    pub menu_parent: String,
}

/// Per-invocation generation options, also persisted under `options`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateOptions {
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    #[serde(default)]
    pub with_frontend: bool,
    #[serde(default)]
    pub force: bool,
    #[serde(default)]
    pub dry_run: bool,
    #[serde(default)]
    pub verbose: bool,
}

fn default_output_dir() -> String {
    ".".to_string()
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            with_frontend: false,
            force: false,
            dry_run: false,
            verbose: false,
        }
    }
}

/// The top-level configuration document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CrudConfig {
    pub table: String,
    pub module: String,
    pub model_name: String,
    /// Always recomputed from `model_name`; never persisted.
    #[serde(skip)]
    pub model_name_camel: String,
    pub resource_name: String,

    #[serde(default)]
    pub fields: Vec<FieldConfig>,

    #[serde(default)]
    pub options: GenerateOptions,

    #[serde(default)]
    pub features: Features,

    #[serde(default)]
    pub frontend: FrontendConfig,
}

impl CrudConfig {
    /// Recomputes derived names, strips label whitespace and validates field
    /// uniqueness. Idempotent; applied on every load.
    pub fn normalize(&mut self) -> Result<(), ConfigError> {
        if self.table.trim().is_empty() {
            return Err(ConfigError::MissingTable);
        }

        self.model_name_camel = naming::to_camel_case(&self.model_name);
        for field in &mut self.fields {
            field.label = field.label.trim().to_string();
        }

        let mut seen = std::collections::HashSet::new();
        for field in &self.fields {
            let normalized = naming::to_snake_case(&field.name);
            if !seen.insert(normalized) {
                return Err(ConfigError::DuplicateField(field.name.clone()));
            }
        }

        Ok(())
    }

    /// Returns the primary-key field, if the document declares one.
    pub fn primary_key(&self) -> Option<&FieldConfig> {
        self.fields.iter().find(|f| f.is_primary_key)
    }
}

/// Writes a config document to `dir/{snake(model_name)}.yaml`.
pub fn save_config(config: &CrudConfig, dir: &Path) -> Result<PathBuf, ConfigError> {
    std::fs::create_dir_all(dir)?;

    let filename = format!("{}.yaml", naming::to_snake_case(&config.model_name));
    let path = dir.join(filename);

    let data = serde_yml::to_string(config)?;
    std::fs::write(&path, data)?;

    Ok(path)
}

/// Loads and normalizes a config document.
pub fn load_config(path: &Path) -> Result<CrudConfig, ConfigError> {
    let data = std::fs::read_to_string(path)?;
    let mut config: CrudConfig = serde_yml::from_str(&data)?;
    config.normalize()?;
    Ok(config)
}
