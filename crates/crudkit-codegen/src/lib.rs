//! Code generation for the crudkit generator.
//!
//! Three layers, consumed in order by the orchestrator:
//!
//! 1. [`templates`]: a named registry of seven pure render functions
//!    sharing one helper set. Rendering is deterministic: the same
//!    [`TemplateData`] always yields byte-identical output.
//! 2. [`plan`]: turns a config plus options into the ordered list of
//!    `(path, template)` write intents.
//! 3. [`write`]: applies the plan to the file system under the
//!    force / skip-if-exists / dry-run policy and reports every outcome.

pub mod data;
pub mod helpers;
pub mod plan;
pub mod templates;
pub mod write;

use thiserror::Error;

pub use data::TemplateData;
pub use plan::{plan_artifacts, Artifact};
pub use templates::Template;
pub use write::{execute, FileResult, GenerateResult};

/// Errors raised while rendering a template.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("unknown template: {0}")]
    UnknownTemplate(String),
}
