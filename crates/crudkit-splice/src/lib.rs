//! Idempotent, pattern-driven edits of user-owned source files.
//!
//! Three independent edits: the back-end router, the front-end router and
//! the layout menu. Each one checks a sentinel first (the new handler type,
//! the route name, the resource path) and degrades to
//! [`SpliceOutcome::AlreadyRegistered`] when it is present, so re-running
//! the generator never corrupts a file. Edits only ever insert text at
//! anchors found in the current content; a missing anchor aborts the edit
//! with the file untouched.

mod backend;
mod frontend;
mod menu;

use std::path::{Path, PathBuf};

use thiserror::Error;

pub use backend::register_backend_router;
pub use frontend::register_frontend_router;
pub use menu::register_menu;

/// Errors surfaced by a splice edit.
#[derive(Debug, Error)]
pub enum SpliceError {
    #[error("{}: anchor not found: {anchor}", file.display())]
    PatternNotFound { file: PathBuf, anchor: &'static str },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Outcome of one splice edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpliceOutcome {
    /// The edit was inserted (or rendered, under dry-run).
    Applied,
    /// The sentinel was already present; the file was left untouched.
    AlreadyRegistered,
}

/// Which of the three edits to run, plus the run policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoRegisterOptions {
    pub register_backend: bool,
    pub register_frontend: bool,
    pub register_menu: bool,
    pub dry_run: bool,
    pub verbose: bool,
}

pub(crate) fn read_target(path: &Path) -> Result<String, SpliceError> {
    Ok(std::fs::read_to_string(path)?)
}

pub(crate) fn write_target(path: &Path, content: &str, dry_run: bool) -> Result<(), SpliceError> {
    if dry_run {
        tracing::debug!(file = %path.display(), "dry run, splice not written");
        return Ok(());
    }
    std::fs::write(path, content)?;
    Ok(())
}
