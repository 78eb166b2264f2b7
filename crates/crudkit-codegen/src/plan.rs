//! The artifact planner: config + options → ordered write intents.

use std::path::PathBuf;

use crudkit_core::naming::to_snake_case;
use crudkit_core::{CrudConfig, GenerateOptions};

use crate::templates::Template;

/// One file the generator intends to emit.
#[derive(Debug, Clone)]
pub struct Artifact {
    /// Target path, resolved against the output directory.
    pub path: PathBuf,
    pub template: Template,
}

/// Builds the ordered plan: four back-end artifacts, plus three front-end
/// artifacts when requested. Paths and extensions are fixed by the template.
pub fn plan_artifacts(config: &CrudConfig, opts: &GenerateOptions) -> Vec<Artifact> {
    let out = PathBuf::from(&opts.output_dir);
    let snake = to_snake_case(&config.model_name);
    let backend = out
        .join("services")
        .join(format!("{}-api", config.module))
        .join("internal");

    let mut plan = vec![
        Artifact {
            path: backend.join("model").join(format!("{snake}.go")),
            template: Template::Model,
        },
        Artifact {
            path: backend
                .join("repository")
                .join(format!("{snake}_repository.go")),
            template: Template::Repository,
        },
        Artifact {
            path: backend.join("service").join(format!("{snake}_service.go")),
            template: Template::Service,
        },
        Artifact {
            path: backend.join("handler").join(format!("{snake}_handler.go")),
            template: Template::Handler,
        },
    ];

    if opts.with_frontend {
        let web = out.join("web").join("admin").join("src");
        plan.push(Artifact {
            path: web.join("api").join(format!("{snake}.ts")),
            template: Template::TsApi,
        });
        let views = web.join("views").join(&config.model_name);
        plan.push(Artifact {
            path: views.join("index.vue"),
            template: Template::ListView,
        });
        plan.push(Artifact {
            path: views.join("Form.vue"),
            template: Template::FormView,
        });
    }

    plan
}
