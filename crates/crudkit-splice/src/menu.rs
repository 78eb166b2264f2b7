//! Menu splice: a menu item before the closing `</el-menu>` tag, plus the
//! icon's destructured import when it is missing.

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crudkit_core::CrudConfig;

use crate::{read_target, write_target, SpliceError, SpliceOutcome};

/// The closing tag of the navigation menu, with its leading indentation.
static MENU_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*</el-menu>").expect("valid regex"));

/// The destructured import from the icon package.
static ICON_IMPORT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"import\s*\{([^}]*)\}\s*from\s*'@element-plus/icons-vue'").expect("valid regex")
});

/// Splices the menu entry into `web/admin/src/layout/index.vue`.
pub fn register_menu(
    config: &CrudConfig,
    root: &Path,
    dry_run: bool,
) -> Result<SpliceOutcome, SpliceError> {
    let file = root
        .join("web")
        .join("admin")
        .join("src")
        .join("layout")
        .join("index.vue");

    let content = read_target(&file)?;
    match splice(&content, config) {
        Ok(Some(updated)) => {
            write_target(&file, &updated, dry_run)?;
            tracing::debug!(file = %file.display(), model = %config.model_name, "menu entry spliced");
            Ok(SpliceOutcome::Applied)
        }
        Ok(None) => Ok(SpliceOutcome::AlreadyRegistered),
        Err(anchor) => Err(SpliceError::PatternNotFound { file, anchor }),
    }
}

fn splice(content: &str, config: &CrudConfig) -> Result<Option<String>, &'static str> {
    let title = &config.frontend.title;
    let icon = &config.frontend.icon;
    let resource = &config.resource_name;

    // Sentinel: the menu index path proves a previous run.
    if content.contains(&format!("/dashboard/{resource}")) {
        return Ok(None);
    }

    // The icon import check must look at the import line itself, not the
    // whole file, so it stays correct once the menu markup mentions the icon.
    let icon_missing = match ICON_IMPORT.captures(content) {
        Some(captures) => !captures
            .get(1)
            .map(|names| names.as_str().split(',').any(|n| n.trim() == icon))
            .unwrap_or(false),
        None => return Err("icon import from '@element-plus/icons-vue'"),
    };

    let menu_at = MENU_END.find(content).ok_or("</el-menu> closing tag")?.start();

    let mut item = format!("\n\n          <!-- {title} -->\n");
    item.push_str(&format!(
        "          <el-menu-item index=\"/dashboard/{resource}\">\n"
    ));
    item.push_str(&format!("            <el-icon><{icon} /></el-icon>\n"));
    item.push_str(&format!("            <span>{title}</span>\n"));
    item.push_str("          </el-menu-item>");

    let mut updated = content.to_string();
    updated.insert_str(menu_at, &item);

    if icon_missing {
        if let Some(captures) = ICON_IMPORT.captures(&updated) {
            if let Some(names) = captures.get(1) {
                let insert_at = names.end();
                updated.insert_str(insert_at, &format!(", {icon}"));
            }
        }
    }

    Ok(Some(updated))
}
