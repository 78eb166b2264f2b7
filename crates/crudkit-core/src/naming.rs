//! Name derivation: case conversions, pluralization, labels and titles.
//!
//! These are pure string functions. Every emitted artifact derives its
//! identifiers through this module, so all seven templates and the splicer
//! agree on naming by construction.

/// Table-name prefixes stripped before deriving a model name.
const MODEL_PREFIXES: &[&str] = &["admin_", "user_", "sys_", "tb_", "t_"];

/// Irregular plural forms checked before the suffix rules.
const IRREGULAR_PLURALS: &[(&str, &str)] = &[
    ("person", "people"),
    ("child", "children"),
    ("man", "men"),
    ("woman", "women"),
    ("tooth", "teeth"),
    ("foot", "feet"),
    ("mouse", "mice"),
    ("goose", "geese"),
];

/// Default field labels for columns without a comment.
///
/// Locale-coupled by design; an implementation targeting another locale
/// replaces this table wholesale. The lookup order (comment, dictionary,
/// PascalCase fallback) is fixed.
const DEFAULT_LABELS: &[(&str, &str)] = &[
    ("id", "ID"),
    ("name", "名称"),
    ("title", "标题"),
    ("content", "内容"),
    ("description", "描述"),
    ("status", "状态"),
    ("sort", "排序"),
    ("created_at", "创建时间"),
    ("updated_at", "更新时间"),
    ("deleted_at", "删除时间"),
];

/// Default page titles per model name.
const DEFAULT_TITLES: &[(&str, &str)] = &[
    ("Article", "文章管理"),
    ("User", "用户管理"),
    ("Category", "分类管理"),
    ("Tag", "标签管理"),
    ("Comment", "评论管理"),
    ("File", "文件管理"),
    ("Config", "配置管理"),
    ("Log", "日志管理"),
    ("Role", "角色管理"),
    ("Permission", "权限管理"),
    ("Menu", "菜单管理"),
];

/// Field names that are searchable regardless of column type.
const SEARCHABLE_NAMES: &[&str] = &["id", "name", "title", "email", "phone"];

/// Field names hidden from the generated list view.
const HIDDEN_IN_LIST: &[&str] = &["password", "deleted_at", "content", "description"];

/// Field names hidden from the generated form.
const HIDDEN_IN_FORM: &[&str] = &["id", "created_at", "updated_at", "deleted_at"];

/// Splits an identifier into words at underscores, dashes, whitespace and
/// lower-to-upper camel boundaries.
fn split_words(s: &str) -> Vec<String> {
    let mut words = Vec::new();
    for chunk in s.split(|c: char| c.is_whitespace() || c == '_' || c == '-') {
        if chunk.is_empty() {
            continue;
        }
        let mut current = String::new();
        let mut prev_upper = false;
        for c in chunk.chars() {
            if c.is_uppercase() && !prev_upper && !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_upper = c.is_uppercase();
            current.push(c);
        }
        if !current.is_empty() {
            words.push(current);
        }
    }
    words
}

/// Converts to PascalCase.
pub fn to_pascal_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for word in split_words(s) {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            result.extend(first.to_uppercase());
            result.extend(chars.flat_map(|c| c.to_lowercase()));
        }
    }
    result
}

/// Converts to camelCase.
pub fn to_camel_case(s: &str) -> String {
    lc_first(&to_pascal_case(s))
}

/// Converts to snake_case.
///
/// Splits at a run of uppercase followed by upper+lower (`HTTPServer` →
/// `http_server`), at lower-or-digit followed by upper, and at
/// whitespace/dash runs.
pub fn to_snake_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_whitespace() || c == '-' || c == '_' {
            if !result.is_empty() && !result.ends_with('_') {
                result.push('_');
            }
            continue;
        }
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let boundary = prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_lower);
            if boundary && !result.is_empty() && !result.ends_with('_') {
                result.push('_');
            }
        }
        result.extend(c.to_lowercase());
    }
    result
}

/// Converts to kebab-case.
pub fn to_kebab_case(s: &str) -> String {
    to_snake_case(s).replace('_', "-")
}

/// Uppercases the first character.
pub fn uc_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lowercases the first character.
pub fn lc_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Pluralizes a (snake_case) noun.
pub fn to_plural(s: &str) -> String {
    if let Some((_, plural)) = IRREGULAR_PLURALS.iter().find(|(word, _)| *word == s) {
        return (*plural).to_string();
    }

    if s.ends_with('s')
        || s.ends_with('x')
        || s.ends_with('z')
        || s.ends_with("ch")
        || s.ends_with("sh")
    {
        return format!("{s}es");
    }

    if let Some(stem) = s.strip_suffix('y') {
        if stem.chars().next_back().is_some_and(|c| !is_vowel(c)) {
            return format!("{stem}ies");
        }
    }

    if let Some(stem) = s.strip_suffix('f') {
        return format!("{stem}ves");
    }
    if let Some(stem) = s.strip_suffix("fe") {
        return format!("{stem}ves");
    }

    format!("{s}s")
}

fn is_vowel(c: char) -> bool {
    matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u')
}

/// Singularizes a (snake_case) noun. Inverse of [`to_plural`] over the same
/// closed rule set; words it does not recognize pass through unchanged.
pub fn to_singular(s: &str) -> String {
    // Singular words that merely look plural.
    const NOT_PLURAL: &[&str] = &["status", "news"];
    if NOT_PLURAL.contains(&s) {
        return s.to_string();
    }

    if let Some((word, _)) = IRREGULAR_PLURALS.iter().find(|(_, plural)| *plural == s) {
        return (*word).to_string();
    }

    if let Some(stem) = s.strip_suffix("ies") {
        if !stem.is_empty() {
            return format!("{stem}y");
        }
    }

    if let Some(stem) = s.strip_suffix("ves") {
        if !stem.is_empty() {
            return format!("{stem}f");
        }
    }

    for suffix in ["sses", "ches", "shes", "xes", "zes"] {
        if s.ends_with(suffix) {
            return s[..s.len() - 2].to_string();
        }
    }

    if let Some(stem) = s.strip_suffix('s') {
        if !stem.is_empty() && !stem.ends_with('s') {
            return stem.to_string();
        }
    }

    s.to_string()
}

/// Derives a model name from a table name: strips at most one admin prefix
/// (longest match), singularizes the trailing word, then converts to
/// PascalCase.
pub fn table_to_model_name(table: &str) -> String {
    let stripped = MODEL_PREFIXES
        .iter()
        .filter(|p| table.starts_with(**p))
        .max_by_key(|p| p.len())
        .map_or(table, |p| &table[p.len()..]);

    // Tables are conventionally plural; the entity they hold is not.
    let singular = match stripped.rsplit_once('_') {
        Some((head, last)) => format!("{head}_{}", to_singular(last)),
        None => to_singular(stripped),
    };

    to_pascal_case(&singular)
}

/// Derives the URL resource name (plural snake_case) from a model name.
pub fn model_to_resource_name(model: &str) -> String {
    to_plural(&to_snake_case(model))
}

/// Derives a human label for a field: the column comment if non-empty, the
/// default dictionary otherwise, PascalCase of the name as a last resort.
pub fn label_for(field_name: &str, comment: &str) -> String {
    let comment = comment.trim();
    if !comment.is_empty() {
        return comment.to_string();
    }
    if let Some((_, label)) = DEFAULT_LABELS.iter().find(|(name, _)| *name == field_name) {
        return (*label).to_string();
    }
    to_pascal_case(field_name)
}

/// Derives the page title for a model.
pub fn title_for(model: &str) -> String {
    if let Some((_, title)) = DEFAULT_TITLES.iter().find(|(name, _)| *name == model) {
        return (*title).to_string();
    }
    format!("{model}管理")
}

/// Returns true if a column should be searchable: text-like types, plus a
/// closed set of well-known names.
pub fn is_searchable(field_name: &str, column_type: &str) -> bool {
    column_type.contains("char")
        || column_type.contains("text")
        || SEARCHABLE_NAMES.contains(&field_name)
}

/// Returns true if the field is hidden from the generated list view.
pub fn hidden_in_list(field_name: &str) -> bool {
    HIDDEN_IN_LIST.contains(&field_name)
}

/// Returns true if the field is hidden from the generated form.
pub fn hidden_in_form(field_name: &str) -> bool {
    HIDDEN_IN_FORM.contains(&field_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pascal_case() {
        assert_eq!(to_pascal_case("articles"), "Articles");
        assert_eq!(to_pascal_case("admin_user"), "AdminUser");
        assert_eq!(to_pascal_case("login-log"), "LoginLog");
        assert_eq!(to_pascal_case("userProfile"), "UserProfile");
        assert_eq!(to_pascal_case(""), "");
    }

    #[test]
    fn test_camel_case() {
        assert_eq!(to_camel_case("admin_user"), "adminUser");
        assert_eq!(to_camel_case("Article"), "article");
        assert_eq!(to_camel_case(""), "");
    }

    #[test]
    fn test_snake_case() {
        assert_eq!(to_snake_case("CreateUser"), "create_user");
        assert_eq!(to_snake_case("HTTPServer"), "http_server");
        assert_eq!(to_snake_case("userID2Name"), "user_id2_name");
        assert_eq!(to_snake_case("login log"), "login_log");
        assert_eq!(to_snake_case("kebab-case"), "kebab_case");
    }

    #[test]
    fn test_kebab_case() {
        assert_eq!(to_kebab_case("LoginLog"), "login-log");
        assert_eq!(to_kebab_case("Article"), "article");
    }

    // Any PascalCase output must survive the other conversions unchanged in
    // meaning: camelCase is lowerFirst, snake_case carries no uppercase.
    #[test]
    fn test_case_round_trip() {
        for input in ["admin_users", "loginLog", "HTTPServer", "order item"] {
            let pascal = to_pascal_case(input);
            assert_eq!(to_camel_case(&pascal), lc_first(&pascal));
            assert!(to_snake_case(&pascal).chars().all(|c| !c.is_uppercase()));
        }
    }

    #[test]
    fn test_plural_irregulars() {
        for (word, plural) in IRREGULAR_PLURALS {
            assert_eq!(to_plural(word), *plural);
        }
    }

    #[test]
    fn test_plural_rules() {
        assert_eq!(to_plural("article"), "articles");
        assert_eq!(to_plural("box"), "boxes");
        assert_eq!(to_plural("buzz"), "buzzes");
        assert_eq!(to_plural("match"), "matches");
        assert_eq!(to_plural("dish"), "dishes");
        assert_eq!(to_plural("category"), "categories");
        assert_eq!(to_plural("day"), "days");
        assert_eq!(to_plural("leaf"), "leaves");
    }

    #[test]
    fn test_singular() {
        assert_eq!(to_singular("articles"), "article");
        assert_eq!(to_singular("categories"), "category");
        assert_eq!(to_singular("boxes"), "box");
        assert_eq!(to_singular("matches"), "match");
        assert_eq!(to_singular("leaves"), "leaf");
        assert_eq!(to_singular("people"), "person");
        assert_eq!(to_singular("config"), "config");
        assert_eq!(to_singular("status"), "status");
    }

    #[test]
    fn test_table_to_model_name() {
        assert_eq!(table_to_model_name("articles"), "Article");
        assert_eq!(table_to_model_name("admin_users"), "User");
        assert_eq!(table_to_model_name("sys_config"), "Config");
        assert_eq!(table_to_model_name("tb_orders"), "Order");
        assert_eq!(table_to_model_name("t_order"), "Order");
        // Only one prefix is stripped; only the last word is singularized.
        assert_eq!(table_to_model_name("admin_user_roles"), "UserRole");
        assert_eq!(table_to_model_name("login_logs"), "LoginLog");
    }

    #[test]
    fn test_model_to_resource_name() {
        assert_eq!(model_to_resource_name("Article"), "articles");
        assert_eq!(model_to_resource_name("Category"), "categories");
        assert_eq!(model_to_resource_name("LoginLog"), "login_logs");
    }

    #[test]
    fn test_label_lookup_order() {
        assert_eq!(label_for("title", "自定义标题"), "自定义标题");
        assert_eq!(label_for("title", "  "), "标题");
        assert_eq!(label_for("id", ""), "ID");
        assert_eq!(label_for("nickname", ""), "Nickname");
    }

    #[test]
    fn test_title_for() {
        assert_eq!(title_for("Article"), "文章管理");
        assert_eq!(title_for("Invoice"), "Invoice管理");
    }

    #[test]
    fn test_searchable() {
        assert!(is_searchable("body", "varchar(255)"));
        assert!(is_searchable("body", "longtext"));
        assert!(is_searchable("id", "bigint"));
        assert!(is_searchable("phone", "bigint"));
        assert!(!is_searchable("price", "decimal(10,2)"));
    }

    #[test]
    fn test_visibility_sets() {
        assert!(hidden_in_list("password"));
        assert!(hidden_in_list("deleted_at"));
        assert!(!hidden_in_list("title"));
        assert!(hidden_in_form("id"));
        assert!(hidden_in_form("created_at"));
        assert!(!hidden_in_form("email"));
    }
}
