//! The flattened per-render payload.

use crudkit_core::{CrudConfig, FieldConfig, GO_MODULE};

use crate::helpers;

/// Everything a template sees: the config fields flattened, the primary-key
/// field, feature flags, import hints and a generation timestamp.
///
/// Built once per invocation and shared by every template, so all emitted
/// artifacts agree on names and flags by construction.
#[derive(Debug, Clone)]
pub struct TemplateData {
    pub table: String,
    pub module: String,
    pub model_name: String,
    pub model_name_camel: String,
    pub resource_name: String,
    /// Package name of the generated back-end model package.
    pub package_name: String,

    pub fields: Vec<FieldConfig>,
    pub primary_key: Option<FieldConfig>,

    pub has_soft_delete: bool,
    pub has_timestamps: bool,
    pub has_pagination: bool,
    pub has_search: bool,
    pub has_sort: bool,

    pub title: String,
    pub icon: String,

    /// Go import hints for the generated handler layer.
    pub imports: Vec<String>,

    pub generated_at: String,
}

impl TemplateData {
    /// Flattens a config into the render payload.
    pub fn from_config(config: &CrudConfig) -> Self {
        Self {
            table: config.table.clone(),
            module: config.module.clone(),
            model_name: config.model_name.clone(),
            model_name_camel: config.model_name_camel.clone(),
            resource_name: config.resource_name.clone(),
            package_name: "model".to_string(),
            primary_key: config.primary_key().cloned(),
            has_soft_delete: config.features.soft_delete,
            has_timestamps: config.features.timestamps,
            has_pagination: config.features.pagination,
            has_search: config.features.search,
            has_sort: config.features.sort,
            title: config.frontend.title.clone(),
            icon: config.frontend.icon.clone(),
            imports: derive_imports(&config.fields),
            generated_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            fields: config.fields.clone(),
        }
    }
}

fn derive_imports(fields: &[FieldConfig]) -> Vec<String> {
    let mut imports = vec![
        "github.com/gin-gonic/gin".to_string(),
        format!("{GO_MODULE}/pkg/response"),
        "errors".to_string(),
        "fmt".to_string(),
    ];
    if helpers::needs_time_import(fields) {
        imports.push("time".to_string());
    }
    imports
}
