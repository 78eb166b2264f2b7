//! The write executor: applies a plan under the force / skip-if-exists /
//! dry-run policy.

use std::path::Path;

use crudkit_core::GenerateOptions;
use serde::Serialize;

use crate::data::TemplateData;
use crate::plan::Artifact;

/// Outcome for one planned file.
#[derive(Debug, Clone, Serialize)]
pub struct FileResult {
    pub path: String,
    pub created: bool,
    pub skipped: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileResult {
    fn created(path: &Path) -> Self {
        Self {
            path: path.display().to_string(),
            created: true,
            skipped: false,
            error: None,
        }
    }

    fn skipped(path: &Path) -> Self {
        Self {
            path: path.display().to_string(),
            created: false,
            skipped: true,
            error: None,
        }
    }

    fn failed(path: &Path, message: String) -> Self {
        Self {
            path: path.display().to_string(),
            created: false,
            skipped: false,
            error: Some(message),
        }
    }
}

/// Outcome of a whole run. A non-empty `errors` still counts as a completed
/// run: the loop never stops early, so one pass reports every file.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GenerateResult {
    pub files: Vec<FileResult>,
    pub errors: Vec<String>,
}

impl GenerateResult {
    /// True when every planned artifact succeeded.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Executes the plan. Per-artifact failures are collected, never propagated,
/// so the caller sees one result covering the full plan.
pub fn execute(plan: &[Artifact], data: &TemplateData, opts: &GenerateOptions) -> GenerateResult {
    let mut result = GenerateResult::default();

    for artifact in plan {
        let outcome = write_artifact(artifact, data, opts);
        if let Some(message) = &outcome.error {
            result
                .errors
                .push(format!("{}: {}", outcome.path, message));
        }
        result.files.push(outcome);
    }

    result
}

fn write_artifact(artifact: &Artifact, data: &TemplateData, opts: &GenerateOptions) -> FileResult {
    let path = &artifact.path;

    // Dry run renders into memory and touches nothing.
    if opts.dry_run {
        return match artifact.template.render(data) {
            Ok(_) => FileResult::created(path),
            Err(err) => FileResult::failed(path, err.to_string()),
        };
    }

    if !opts.force && path.exists() {
        tracing::debug!(path = %path.display(), "target exists, skipping");
        return FileResult::skipped(path);
    }

    let content = match artifact.template.render(data) {
        Ok(content) => content,
        Err(err) => return FileResult::failed(path, err.to_string()),
    };

    if let Err(err) = write_file(path, &content) {
        return FileResult::failed(path, err.to_string());
    }

    tracing::debug!(path = %path.display(), template = artifact.template.name(), "wrote artifact");
    FileResult::created(path)
}

/// Writes a file so that it is either fully present or absent: the content
/// goes to a sibling temp file first and is renamed into place.
fn write_file(path: &Path, content: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let tmp = path.with_file_name(format!(".{file_name}.tmp"));

    std::fs::write(&tmp, content)?;
    set_file_mode(&tmp)?;

    match std::fs::rename(&tmp, path) {
        Ok(()) => Ok(()),
        Err(err) => {
            let _ = std::fs::remove_file(&tmp);
            Err(err)
        }
    }
}

#[cfg(unix)]
fn create_dir_all(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    std::fs::DirBuilder::new().recursive(true).mode(0o755).create(path)
}

#[cfg(not(unix))]
fn create_dir_all(path: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(path)
}

#[cfg(unix)]
fn set_file_mode(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn set_file_mode(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::plan_artifacts;
    use crate::templates::tests::articles_data;
    use crudkit_core::derive::config_from_table;
    use crudkit_core::{ColumnInfo, CrudConfig, KeyKind, TableInfo};

    fn articles_config(output_dir: &str) -> (CrudConfig, TemplateData) {
        let info = TableInfo {
            name: "articles".to_string(),
            comment: String::new(),
            columns: vec![
                ColumnInfo {
                    name: "id".to_string(),
                    column_type: "int".to_string(),
                    nullable: false,
                    key: KeyKind::Primary,
                    default_value: None,
                    auto_increment: true,
                    comment: String::new(),
                },
                ColumnInfo {
                    name: "title".to_string(),
                    column_type: "varchar(200)".to_string(),
                    nullable: false,
                    key: KeyKind::None,
                    default_value: None,
                    auto_increment: false,
                    comment: String::new(),
                },
            ],
        };
        let mut config = config_from_table(&info, "admin");
        config.options.output_dir = output_dir.to_string();
        config.options.with_frontend = true;
        let data = TemplateData::from_config(&config);
        (config, data)
    }

    #[test]
    fn test_dry_run_is_side_effect_free() {
        let dir = tempfile::tempdir().unwrap();
        let (config, data) = articles_config(dir.path().to_str().unwrap());

        let opts = GenerateOptions {
            dry_run: true,
            ..config.options.clone()
        };
        let plan = plan_artifacts(&config, &opts);
        let result = execute(&plan, &data, &opts);

        assert_eq!(result.files.len(), 7);
        assert!(result.files.iter().all(|f| f.created));
        assert!(result.is_clean());
        // Nothing on disk, not even the directory skeleton.
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_create_then_skip_then_force() {
        let dir = tempfile::tempdir().unwrap();
        let (config, data) = articles_config(dir.path().to_str().unwrap());

        let opts = config.options.clone();
        let plan = plan_artifacts(&config, &opts);

        let first = execute(&plan, &data, &opts);
        assert!(first.files.iter().all(|f| f.created));
        let model_path = &plan[0].path;
        let original = std::fs::read(model_path).unwrap();

        // Second run without force skips everything and changes nothing.
        let second = execute(&plan, &data, &opts);
        assert!(second.files.iter().all(|f| f.skipped));
        assert_eq!(std::fs::read(model_path).unwrap(), original);

        // Force rewrites with identical bytes.
        let forced_opts = GenerateOptions {
            force: true,
            ..opts
        };
        let third = execute(&plan, &data, &forced_opts);
        assert!(third.files.iter().all(|f| f.created));
        assert_eq!(std::fs::read(model_path).unwrap(), original);
    }

    #[test]
    fn test_no_temp_files_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let (config, data) = articles_config(dir.path().to_str().unwrap());

        let opts = config.options.clone();
        let plan = plan_artifacts(&config, &opts);
        execute(&plan, &data, &opts);

        for artifact in &plan {
            let parent = artifact.path.parent().unwrap();
            for entry in std::fs::read_dir(parent).unwrap() {
                let name = entry.unwrap().file_name();
                assert!(!name.to_string_lossy().ends_with(".tmp"));
            }
        }
    }

    #[test]
    fn test_render_into_memory_matches_disk() {
        let dir = tempfile::tempdir().unwrap();
        let (config, _) = articles_config(dir.path().to_str().unwrap());
        let data = articles_data();

        let opts = config.options.clone();
        let plan = plan_artifacts(&config, &opts);
        execute(&plan, &data, &opts);

        for artifact in &plan {
            let rendered = artifact.template.render(&data).unwrap();
            let on_disk = std::fs::read_to_string(&artifact.path).unwrap();
            assert_eq!(rendered, on_disk);
        }
    }
}
