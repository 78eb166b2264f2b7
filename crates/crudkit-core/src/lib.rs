//! Core types for the crudkit generator.
//!
//! This crate holds everything that is pure and shared: the canonical
//! configuration document ([`CrudConfig`]), the catalog-facing schema types
//! ([`TableInfo`], [`ColumnInfo`]), the name deriver ([`naming`]) and the
//! type mapper ([`typemap`]). Nothing in here talks to a database or renders
//! a template.

pub mod config;
pub mod derive;
pub mod naming;
pub mod schema;
pub mod typemap;

pub use config::{
    ConfigError, CrudConfig, Features, FieldConfig, FrontendConfig, GenerateOptions, Relation,
};
pub use schema::{ColumnInfo, KeyKind, TableInfo};
pub use typemap::FormWidget;

/// Go module path the generated back-end code is rooted at.
///
/// Every emitted import and every splice-inserted import uses this prefix,
/// so the generated slice is internally consistent.
pub const GO_MODULE: &str = "app";
