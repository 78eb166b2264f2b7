//! The named template registry.
//!
//! Seven templates, all pure functions over [`TemplateData`] sharing the
//! helper set in [`crate::helpers`]. Adding a second back-end or front-end
//! flavor means replacing this set; the helpers, planner and splicer stay.

mod form_view;
mod handler;
mod list_view;
mod model;
mod repository;
mod service;
mod ts_api;
mod vue;

use crate::data::TemplateData;
use crate::RenderError;

/// One named template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    Model,
    Repository,
    Service,
    Handler,
    TsApi,
    ListView,
    FormView,
}

impl Template {
    /// Every registered template, in planner order.
    pub const ALL: [Template; 7] = [
        Template::Model,
        Template::Repository,
        Template::Service,
        Template::Handler,
        Template::TsApi,
        Template::ListView,
        Template::FormView,
    ];

    /// The registry name of this template.
    pub fn name(self) -> &'static str {
        match self {
            Template::Model => "model",
            Template::Repository => "repository",
            Template::Service => "service",
            Template::Handler => "handler",
            Template::TsApi => "ts_api",
            Template::ListView => "list_view",
            Template::FormView => "form_view",
        }
    }

    /// Looks a template up by registry name.
    pub fn by_name(name: &str) -> Result<Template, RenderError> {
        Template::ALL
            .into_iter()
            .find(|t| t.name() == name)
            .ok_or_else(|| RenderError::UnknownTemplate(name.to_string()))
    }

    /// Renders this template against the payload.
    pub fn render(self, data: &TemplateData) -> Result<String, RenderError> {
        Ok(match self {
            Template::Model => model::render(data),
            Template::Repository => repository::render(data),
            Template::Service => service::render(data),
            Template::Handler => handler::render(data),
            Template::TsApi => ts_api::render(data),
            Template::ListView => list_view::render(data),
            Template::FormView => form_view::render(data),
        })
    }
}
