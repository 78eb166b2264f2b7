//! Front-end router splice: one route object at the tail of the dashboard
//! branch's children array.

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crudkit_core::CrudConfig;

use crate::{read_target, write_target, SpliceError, SpliceOutcome};

/// The dashboard branch up to the end of its `children` array. The second
/// group anchors the array's closing bracket.
static DASHBOARD_CHILDREN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(path:\s*'/?dashboard'[\s\S]*?children:\s*\[[\s\S]*?)(\n\s*\]\s*\})")
        .expect("valid regex")
});

/// Splices the generated route into `web/admin/src/router/index.ts`.
pub fn register_frontend_router(
    config: &CrudConfig,
    root: &Path,
    dry_run: bool,
) -> Result<SpliceOutcome, SpliceError> {
    let file = root
        .join("web")
        .join("admin")
        .join("src")
        .join("router")
        .join("index.ts");

    let content = read_target(&file)?;
    match splice(&content, config) {
        Ok(Some(updated)) => {
            write_target(&file, &updated, dry_run)?;
            tracing::debug!(file = %file.display(), model = %config.model_name, "frontend route spliced");
            Ok(SpliceOutcome::Applied)
        }
        Ok(None) => Ok(SpliceOutcome::AlreadyRegistered),
        Err(anchor) => Err(SpliceError::PatternNotFound { file, anchor }),
    }
}

fn splice(content: &str, config: &CrudConfig) -> Result<Option<String>, &'static str> {
    let model = &config.model_name;

    // Sentinel: the route name proves a previous run.
    if content.contains(&format!("{model}List")) {
        return Ok(None);
    }

    let captures = DASHBOARD_CHILDREN
        .captures(content)
        .ok_or("dashboard children array")?;
    let tail = captures.get(2).map(|m| m.start()).ok_or("dashboard children array")?;

    let title = &config.frontend.title;
    let resource = &config.resource_name;
    let mut route = format!("\n      // {title}\n");
    route.push_str("      {\n");
    route.push_str(&format!("        path: '{resource}',\n"));
    route.push_str(&format!("        name: '{model}List',\n"));
    route.push_str(&format!(
        "        component: () => import('@/views/{model}/index.vue'),\n"
    ));
    route.push_str(&format!(
        "        meta: {{ title: '{title}', requiresAuth: true }}\n"
    ));
    route.push_str("      },");

    let mut updated = content.to_string();
    updated.insert_str(tail, &route);
    Ok(Some(updated))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROUTER_TS: &str = r#"import { createRouter, createWebHistory } from 'vue-router'

const router = createRouter({
  history: createWebHistory(),
  routes: [
    {
      path: '/login',
      name: 'Login',
      component: () => import('@/views/Login/index.vue')
    },
    {
      path: '/dashboard',
      name: 'Dashboard',
      component: () => import('@/layout/index.vue'),
      children: [
        {
          path: 'users',
          name: 'UserList',
          component: () => import('@/views/User/index.vue'),
          meta: { title: '用户管理', requiresAuth: true }
        },
      ]
    }
  ]
})

export default router
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
    fn test_route_is_appended_to_children() {
        let updated = splice(ROUTER_TS, &config()).unwrap().unwrap();

        assert!(updated.contains("path: 'articles',"));
        assert!(updated.contains("name: 'ArticleList',"));
        assert!(updated.contains("component: () => import('@/views/Article/index.vue'),"));
        assert!(updated.contains("meta: { title: '文章管理', requiresAuth: true }"));

        // The new route lands after the existing child, inside the array.
        let existing = updated.find("name: 'UserList'").unwrap();
        let inserted = updated.find("name: 'ArticleList'").unwrap();
        let array_close = updated.rfind("]\n    }").unwrap();
        assert!(existing < inserted && inserted < array_close);
    }

    #[test]
    fn test_idempotent() {
        let config = config();
        let once = splice(ROUTER_TS, &config).unwrap().unwrap();
        assert!(splice(&once, &config).unwrap().is_none());
    }

    #[test]
    fn test_missing_dashboard_branch() {
        let content = "const routes = []\n";
        assert_eq!(
            splice(content, &config()).unwrap_err(),
            "dashboard children array"
        );
    }
}
