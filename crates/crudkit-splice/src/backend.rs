//! Back-end router splice: imports, wiring block and the five routes.

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crudkit_core::{CrudConfig, GO_MODULE};

use crate::{read_target, write_target, SpliceError, SpliceOutcome};

/// The whole `import ( ... )` group.
static IMPORT_GROUP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"import\s*\(([\s\S]*?)\)").expect("valid regex"));

/// A `fooHandler := handler.NewFooHandler(...)` wiring line.
static HANDLER_INIT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^.*Handler\s*:=\s*handler\.New\w+Handler\(.*\).*$").expect("valid regex")
});

/// A registration line inside the authenticated route group.
static AUTH_DELETE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*auth\.DELETE\([^)]*\).*$").expect("valid regex"));

/// Splices the generated entity into the module's router file.
pub fn register_backend_router(
    config: &CrudConfig,
    root: &Path,
    dry_run: bool,
) -> Result<SpliceOutcome, SpliceError> {
    let file = root
        .join("services")
        .join(format!("{}-api", config.module))
        .join("internal")
        .join("router")
        .join("router.go");

    let content = read_target(&file)?;
    match splice(&content, config) {
        Ok(Some(updated)) => {
            write_target(&file, &updated, dry_run)?;
            tracing::debug!(file = %file.display(), model = %config.model_name, "backend routes spliced");
            Ok(SpliceOutcome::Applied)
        }
        Ok(None) => Ok(SpliceOutcome::AlreadyRegistered),
        Err(anchor) => Err(SpliceError::PatternNotFound { file, anchor }),
    }
}

/// Pure splice over the router content. `None` means the sentinel is
/// already present. The error carries the missing anchor's description.
fn splice(content: &str, config: &CrudConfig) -> Result<Option<String>, &'static str> {
    let model = &config.model_name;
    let camel = &config.model_name_camel;
    let resource = &config.resource_name;
    let module = &config.module;

    // Sentinel: the handler type name proves a previous run.
    if content.contains(&format!("{model}Handler")) {
        return Ok(None);
    }

    // A same-path registration by another handler is a collision the user
    // asked us to warn about, not to resolve.
    if content.contains(&format!("auth.GET(\"/{resource}\"")) {
        tracing::warn!(
            %resource,
            "resource path already registered by another handler, routes will overlap"
        );
    }

    let mut updated = content.to_string();

    // 1. Imports, appended inside the existing import group when missing.
    let handler_import = format!("{GO_MODULE}/services/{module}-api/internal/handler");
    if !updated.contains(&handler_import) {
        let group = IMPORT_GROUP.find(&updated).ok_or("import group")?;
        let insert_at = group.end() - 1;
        let imports = format!(
            "\t\"{GO_MODULE}/services/{module}-api/internal/handler\"\n\
             \t\"{GO_MODULE}/services/{module}-api/internal/repository\"\n\
             \t\"{GO_MODULE}/services/{module}-api/internal/service\"\n"
        );
        updated.insert_str(insert_at, &imports);
    }

    // 2. Wiring block, after the last existing handler initialization.
    let init_at = HANDLER_INIT
        .find_iter(&updated)
        .last()
        .ok_or("handler initialization block")?
        .end();
    let init = format!(
        "\n\n\t// 初始化 {model}\n\
         \t{camel}Repo := repository.New{model}Repository(database)\n\
         \t{camel}Service := service.New{model}Service({camel}Repo, log)\n\
         \t{camel}Handler := handler.New{model}Handler({camel}Service, log)"
    );
    updated.insert_str(init_at, &init);

    // 3. The five routes, after the last line of the authenticated group.
    let routes_at = AUTH_DELETE
        .find_iter(&updated)
        .last()
        .ok_or("authenticated route group")?
        .end();
    let routes = format!(
        "\n\n\t\t// {title} 路由\n\
         \t\tauth.GET(\"/{resource}\", {camel}Handler.List)\n\
         \t\tauth.GET(\"/{resource}/:id\", {camel}Handler.Get)\n\
         \t\tauth.POST(\"/{resource}\", {camel}Handler.Create)\n\
         \t\tauth.PUT(\"/{resource}/:id\", {camel}Handler.Update)\n\
         \t\tauth.DELETE(\"/{resource}/:id\", {camel}Handler.Delete)",
        title = config.frontend.title,
    );
    updated.insert_str(routes_at, &routes);

    Ok(Some(updated))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROUTER: &str = r#"package router

import (
	"github.com/gin-gonic/gin"

	"app/pkg/logger"
)

func NewRouter(database *gorm.DB, log logger.Logger) *gin.Engine {
	r := gin.New()

	userRepo := repository.NewUserRepository(database)
	userService := service.NewUserService(userRepo, log)
	userHandler := handler.NewUserHandler(userService, log)

	auth := r.Group("/api/v1/admin")
	{
		auth.GET("/users", userHandler.List)
		auth.DELETE("/users/:id", userHandler.Delete)
	}

	return r
}
"#;

    fn config() -> CrudConfig {
        let mut config = CrudConfig {
            table: "articles".to_string(),
            module: "admin".to_string(),
            model_name: "Article".to_string(),
            resource_name: "articles".to_string(),
            ..Default::default()
        };
        config.frontend.title = "文章管理".to_string();
        config.normalize().unwrap();
        config
    }

    #[test]
    fn test_splice_inserts_imports_wiring_and_routes() {
        let updated = splice(ROUTER, &config()).unwrap().unwrap();

        assert!(updated.contains("\"app/services/admin-api/internal/handler\""));
        assert!(updated.contains("articleRepo := repository.NewArticleRepository(database)"));
        assert!(updated.contains("articleHandler := handler.NewArticleHandler(articleService, log)"));
        for route in [
            "auth.GET(\"/articles\", articleHandler.List)",
            "auth.GET(\"/articles/:id\", articleHandler.Get)",
            "auth.POST(\"/articles\", articleHandler.Create)",
            "auth.PUT(\"/articles/:id\", articleHandler.Update)",
            "auth.DELETE(\"/articles/:id\", articleHandler.Delete)",
        ] {
            assert!(updated.contains(route), "missing {route}");
        }

        // Wiring lands after the last existing handler initialization.
        let existing = updated.find("userHandler := handler.NewUserHandler").unwrap();
        let inserted = updated.find("articleRepo := repository").unwrap();
        assert!(inserted > existing);

        // Routes land after the last existing auth.DELETE line.
        let last_delete = updated.find("auth.DELETE(\"/users/:id\"").unwrap();
        let new_routes = updated.find("auth.GET(\"/articles\"").unwrap();
        assert!(new_routes > last_delete);
    }

    #[test]
    fn test_splice_is_idempotent() {
        let config = config();
        let once = splice(ROUTER, &config).unwrap().unwrap();
        assert!(splice(&once, &config).unwrap().is_none());
    }

    #[test]
    fn test_missing_anchor_reports_pattern_not_found() {
        let no_handlers = "package router\n\nimport (\n\t\"x\"\n)\n\nfunc NewRouter() {}\n";
        assert_eq!(
            splice(no_handlers, &config()).unwrap_err(),
            "handler initialization block"
        );
    }

    #[test]
    fn test_file_untouched_on_missing_anchor() {
        let dir = tempfile::tempdir().unwrap();
        let router_dir = dir
            .path()
            .join("services")
            .join("admin-api")
            .join("internal")
            .join("router");
        std::fs::create_dir_all(&router_dir).unwrap();
        let path = router_dir.join("router.go");
        let body = "package router\n\nfunc NewRouter() {}\n";
        std::fs::write(&path, body).unwrap();

        let err = register_backend_router(&config(), dir.path(), false).unwrap_err();
        assert!(matches!(err, SpliceError::PatternNotFound { .. }));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), body);
    }

    #[test]
    fn test_register_twice_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let router_dir = dir
            .path()
            .join("services")
            .join("admin-api")
            .join("internal")
            .join("router");
        std::fs::create_dir_all(&router_dir).unwrap();
        let path = router_dir.join("router.go");
        std::fs::write(&path, ROUTER).unwrap();

        let config = config();
        assert_eq!(
            register_backend_router(&config, dir.path(), false).unwrap(),
            SpliceOutcome::Applied
        );
        let after_first = std::fs::read_to_string(&path).unwrap();

        assert_eq!(
            register_backend_router(&config, dir.path(), false).unwrap(),
            SpliceOutcome::AlreadyRegistered
        );
        assert_eq!(std::fs::read_to_string(&path).unwrap(), after_first);
    }

    #[test]
    fn test_dry_run_leaves_file_alone() {
        let dir = tempfile::tempdir().unwrap();
        let router_dir = dir
            .path()
            .join("services")
            .join("admin-api")
            .join("internal")
            .join("router");
        std::fs::create_dir_all(&router_dir).unwrap();
        let path = router_dir.join("router.go");
        std::fs::write(&path, ROUTER).unwrap();

        assert_eq!(
            register_backend_router(&config(), dir.path(), true).unwrap(),
            SpliceOutcome::Applied
        );
        assert_eq!(std::fs::read_to_string(&path).unwrap(), ROUTER);
    }
}
