//! Derivation of a [`CrudConfig`] from an introspected table.

use crate::config::{CrudConfig, Features, FieldConfig, FrontendConfig, GenerateOptions};
use crate::naming;
use crate::schema::{ColumnInfo, TableInfo};
use crate::typemap;

/// Converts one catalog column into an enriched field configuration.
pub fn field_from_column(column: &ColumnInfo) -> FieldConfig {
    let go_type = typemap::go_type(&column.column_type, column.nullable);
    let ts_type = typemap::ts_type(&go_type);

    FieldConfig {
        name: column.name.clone(),
        column_type: column.column_type.clone(),
        ts_type,
        nullable: column.nullable,
        is_primary_key: column.is_primary(),
        auto_increment: column.auto_increment,
        default_value: column.default_value.clone(),
        comment: column.comment.clone(),
        validations: typemap::validations_for(column),
        label: naming::label_for(&column.name, &column.comment),
        form_type: typemap::widget_for(&column.name),
        list_visible: !naming::hidden_in_list(&column.name),
        // Auto-increment columns are never editable, whatever their name.
        form_visible: !naming::hidden_in_form(&column.name) && !column.auto_increment,
        searchable: naming::is_searchable(&column.name, &column.column_type),
        sortable: true,
        relation: None,
        go_type,
    }
}

/// Builds a full config document from a described table, with default
/// features and front-end settings.
pub fn config_from_table(table: &TableInfo, module: &str) -> CrudConfig {
    let model_name = naming::table_to_model_name(&table.name);
    let model_name_camel = naming::to_camel_case(&model_name);
    let resource_name = naming::model_to_resource_name(&model_name);

    CrudConfig {
        table: table.name.clone(),
        module: module.to_string(),
        resource_name,
        fields: table.columns.iter().map(field_from_column).collect(),
        options: GenerateOptions::default(),
        features: Features {
            soft_delete: table.has_column("deleted_at"),
            timestamps: table.has_column("created_at") && table.has_column("updated_at"),
            pagination: true,
            search: true,
            sort: true,
            export: false,
            import: false,
            batch_delete: false,
        },
        frontend: FrontendConfig {
            title: naming::title_for(&model_name),
            icon: "Document".to_string(),
            show_in_menu: true,
            menu_parent: String::new(),
        },
        model_name,
        model_name_camel,
    }
}
