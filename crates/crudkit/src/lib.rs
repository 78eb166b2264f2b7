//! The crudkit orchestrator.
//!
//! Public operations over the leaf crates: catalog-backed config derivation
//! ([`Generator`]), document load/save, the generation pipeline
//! ([`generate_crud`], [`generate_model`]) and the post-generation splice
//! ([`auto_register`]). Generation itself never touches the database, so
//! everything except introspection works without a connection.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crudkit_codegen::{execute, plan_artifacts};
use crudkit_core::config::{self, ConfigError};
use crudkit_core::derive;
use crudkit_introspect::{Introspector, IntrospectError};
use crudkit_splice::SpliceError;

pub use crudkit_codegen::{Artifact, FileResult, GenerateResult, Template, TemplateData};
pub use crudkit_core::{
    ColumnInfo, CrudConfig, Features, FieldConfig, FormWidget, FrontendConfig, GenerateOptions,
    KeyKind, Relation, TableInfo,
};
pub use crudkit_splice::{AutoRegisterOptions, SpliceOutcome};

/// Orchestrator-level errors. Per-artifact render and write failures are
/// not here: those are collected into [`GenerateResult`] and the run
/// continues.
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Catalog(#[from] IntrospectError),

    #[error("table {table} has no primary-key column")]
    NoPrimaryKey { table: String },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Splice(#[from] SpliceError),
}

/// Catalog-backed operations: listing tables and deriving configs.
pub struct Generator {
    introspector: Introspector,
}

impl Generator {
    /// Connects to the catalog.
    pub async fn connect(url: &str, database: &str) -> Result<Self, GeneratorError> {
        let introspector = Introspector::connect(url, database).await?;
        Ok(Self { introspector })
    }

    /// Lists every table in the current database.
    pub async fn list_tables(&self) -> Result<Vec<String>, GeneratorError> {
        Ok(self.introspector.list_tables().await?)
    }

    /// Introspects a table and derives a full config document with default
    /// features and front-end settings.
    pub async fn config_from_table(
        &self,
        table: &str,
        module: &str,
    ) -> Result<CrudConfig, GeneratorError> {
        let info = self.introspector.describe_table(table).await?;
        let mut config = derive::config_from_table(&info, module);
        config.normalize()?;
        Ok(config)
    }
}

/// Writes a config document to `dir/{snake(model)}.yaml`.
pub fn save_config(config: &CrudConfig, dir: &Path) -> Result<PathBuf, GeneratorError> {
    Ok(config::save_config(config, dir)?)
}

/// Loads and normalizes a config document.
pub fn load_config(path: &Path) -> Result<CrudConfig, GeneratorError> {
    Ok(config::load_config(path)?)
}

/// Runs the full pipeline: plan, render, write. Aborts before any write
/// when the config declares no primary key.
pub fn generate_crud(
    config: &CrudConfig,
    opts: &GenerateOptions,
) -> Result<GenerateResult, GeneratorError> {
    ensure_primary_key(config)?;

    let data = TemplateData::from_config(config);
    let plan = plan_artifacts(config, opts);
    Ok(execute(&plan, &data, opts))
}

/// Emits the model artifact only.
pub fn generate_model(
    config: &CrudConfig,
    opts: &GenerateOptions,
) -> Result<GenerateResult, GeneratorError> {
    ensure_primary_key(config)?;

    let data = TemplateData::from_config(config);
    let plan = plan_artifacts(config, opts);
    Ok(execute(&plan[..1], &data, opts))
}

/// Runs the three splice edits against the well-known files under `root`,
/// gated by the option flags. Returns one labelled outcome per edit that
/// ran; a failed edit never rolls back emitted artifacts or earlier edits.
pub fn auto_register(
    config: &CrudConfig,
    root: &Path,
    opts: &AutoRegisterOptions,
) -> Vec<(&'static str, Result<SpliceOutcome, SpliceError>)> {
    let mut results = Vec::new();

    if opts.register_backend {
        results.push((
            "backend router",
            crudkit_splice::register_backend_router(config, root, opts.dry_run),
        ));
    }
    if opts.register_frontend {
        results.push((
            "frontend router",
            crudkit_splice::register_frontend_router(config, root, opts.dry_run),
        ));
    }
    if opts.register_menu {
        results.push((
            "menu",
            crudkit_splice::register_menu(config, root, opts.dry_run),
        ));
    }

    results
}

fn ensure_primary_key(config: &CrudConfig) -> Result<(), GeneratorError> {
    if config.primary_key().is_none() {
        return Err(GeneratorError::NoPrimaryKey {
            table: config.table.clone(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crudkit_core::derive::config_from_table;

    fn column(name: &str, ty: &str, key: KeyKind, auto: bool) -> ColumnInfo {
        ColumnInfo {
            name: name.to_string(),
            column_type: ty.to_string(),
            nullable: name.ends_with("_at"),
            key,
            default_value: None,
            auto_increment: auto,
            comment: String::new(),
        }
    }

    fn articles_config() -> CrudConfig {
        let info = TableInfo {
            name: "articles".to_string(),
            comment: String::new(),
            columns: vec![
                column("id", "int", KeyKind::Primary, true),
                column("title", "varchar(200)", KeyKind::None, false),
                column("content", "text", KeyKind::None, false),
                column("created_at", "datetime", KeyKind::None, false),
                column("updated_at", "datetime", KeyKind::None, false),
            ],
        };
        config_from_table(&info, "admin")
    }

    #[test]
    fn test_generate_crud_writes_seven_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = articles_config();
        config.options.output_dir = dir.path().to_string_lossy().into_owned();
        config.options.with_frontend = true;

        let result = generate_crud(&config, &config.options.clone()).unwrap();

        assert!(result.is_clean());
        assert_eq!(result.files.len(), 7);
        for file in &result.files {
            assert!(file.created, "{} not created", file.path);
            assert!(Path::new(&file.path).exists());
        }
    }

    #[test]
    fn test_generate_model_emits_one_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = articles_config();
        config.options.output_dir = dir.path().to_string_lossy().into_owned();

        let result = generate_model(&config, &config.options.clone()).unwrap();
        assert_eq!(result.files.len(), 1);
        assert!(result.files[0].path.ends_with("article.go"));
    }

    #[test]
    fn test_no_primary_key_aborts_before_any_write() {
        let dir = tempfile::tempdir().unwrap();
        let info = TableInfo {
            name: "notes".to_string(),
            comment: String::new(),
            columns: vec![column("body", "text", KeyKind::None, false)],
        };
        let mut config = config_from_table(&info, "admin");
        config.options.output_dir = dir.path().to_string_lossy().into_owned();

        let err = generate_crud(&config, &config.options.clone()).unwrap_err();
        assert!(matches!(err, GeneratorError::NoPrimaryKey { .. }));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_auto_register_respects_flags() {
        let dir = tempfile::tempdir().unwrap();
        let config = articles_config();

        let results = auto_register(
            &config,
            dir.path(),
            &AutoRegisterOptions {
                register_backend: false,
                register_frontend: false,
                register_menu: false,
                ..Default::default()
            },
        );
        assert!(results.is_empty());

        // A missing target file surfaces as an error, not a panic.
        let results = auto_register(
            &config,
            dir.path(),
            &AutoRegisterOptions {
                register_backend: true,
                ..Default::default()
            },
        );
        assert_eq!(results.len(), 1);
        assert!(results[0].1.is_err());
    }
}
