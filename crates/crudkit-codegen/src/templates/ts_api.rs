//! Front-end API template: typed interfaces plus the five request helpers.
//!
//! Field names stay snake_case to match the wire contract of the generated
//! back end.

use crudkit_core::naming::to_snake_case;

use crate::data::TemplateData;

pub(crate) fn render(data: &TemplateData) -> String {
    let model = &data.model_name;
    let title = &data.title;
    let module = &data.module;
    let resource = &data.resource_name;

    let mut out = String::from("import request from '@/utils/request'\n\n");
    out.push_str("// ========== 类型定义 ==========\n\n");

    // Entity interface: list-visible fields.
    out.push_str(&format!("/**\n * {title}\n */\n"));
    out.push_str(&format!("export interface {model} {{\n"));
    for field in data.fields.iter().filter(|f| f.list_visible) {
        out.push_str(&format!(
            "  {}: {}{}\n",
            to_snake_case(&field.name),
            field.ts_type,
            comment_suffix(&field.comment),
        ));
    }
    out.push_str("}\n\n");

    // List params.
    out.push_str(&format!("/**\n * {title}列表请求参数\n */\n"));
    out.push_str(&format!("export interface {model}ListParams {{\n"));
    out.push_str("  page?: number\n  page_size?: number\n");
    if data.has_search {
        out.push_str("  keyword?: string\n");
    }
    if data.has_sort {
        out.push_str("  sort_by?: string\n  sort_order?: 'asc' | 'desc'\n");
    }
    out.push_str("}\n\n");

    // List response.
    out.push_str(&format!("/**\n * {title}列表响应\n */\n"));
    out.push_str(&format!("export interface {model}ListResponse {{\n"));
    out.push_str(&format!("  list: {model}[]\n"));
    out.push_str("  total: number\n  page: number\n  page_size: number\n}\n\n");

    // Create params.
    out.push_str(&format!("/**\n * 创建{title}请求参数\n */\n"));
    out.push_str(&format!("export interface {model}CreateParams {{\n"));
    for field in data.fields.iter().filter(|f| f.in_create_request()) {
        let optional = if field.nullable { "?" } else { "" };
        out.push_str(&format!(
            "  {}{optional}: {}{}\n",
            to_snake_case(&field.name),
            field.ts_type,
            comment_suffix(&field.comment),
        ));
    }
    out.push_str("}\n\n");

    // Update params: everything optional.
    out.push_str(&format!("/**\n * 更新{title}请求参数\n */\n"));
    out.push_str(&format!("export interface {model}UpdateParams {{\n"));
    for field in data.fields.iter().filter(|f| f.in_update_request()) {
        out.push_str(&format!(
            "  {}?: {}{}\n",
            to_snake_case(&field.name),
            field.ts_type,
            comment_suffix(&field.comment),
        ));
    }
    out.push_str("}\n\n");

    // The five API functions.
    out.push_str("// ========== API 方法 ==========\n\n");
    out.push_str(&format!("/**\n * 获取{title}列表\n */\n"));
    out.push_str(&format!(
        "export const get{model}List = (params?: {model}ListParams) => {{\n"
    ));
    out.push_str(&format!(
        "  return request.get<{model}ListResponse>('/api/v1/{module}/{resource}', {{ params }})\n}}\n\n"
    ));

    out.push_str(&format!("/**\n * 获取{title}详情\n */\n"));
    out.push_str(&format!("export const get{model} = (id: number) => {{\n"));
    out.push_str(&format!(
        "  return request.get<{model}>(`/api/v1/{module}/{resource}/${{id}}`)\n}}\n\n"
    ));

    out.push_str(&format!("/**\n * 创建{title}\n */\n"));
    out.push_str(&format!(
        "export const create{model} = (data: {model}CreateParams) => {{\n"
    ));
    out.push_str(&format!(
        "  return request.post<{model}>('/api/v1/{module}/{resource}', data)\n}}\n\n"
    ));

    out.push_str(&format!("/**\n * 更新{title}\n */\n"));
    out.push_str(&format!(
        "export const update{model} = (id: number, data: {model}UpdateParams) => {{\n"
    ));
    out.push_str(&format!(
        "  return request.put(`/api/v1/{module}/{resource}/${{id}}`, data)\n}}\n\n"
    ));

    out.push_str(&format!("/**\n * 删除{title}\n */\n"));
    out.push_str(&format!("export const delete{model} = (id: number) => {{\n"));
    out.push_str(&format!(
        "  return request.delete(`/api/v1/{module}/{resource}/${{id}}`)\n}}\n"
    ));

    out
}

fn comment_suffix(comment: &str) -> String {
    if comment.is_empty() {
        String::new()
    } else {
        format!(" // {comment}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::tests::articles_data;

    #[test]
    fn test_entity_interface_fields() {
        let data = articles_data();
        let out = render(&data);

        assert!(out.contains("export interface Article {"));
        assert!(out.contains("  id: number"));
        assert!(out.contains("  title: string"));
        assert!(out.contains("  created_at: string"));
        assert!(out.contains("  updated_at: string"));
    }

    #[test]
    fn test_api_functions_and_paths() {
        let data = articles_data();
        let out = render(&data);

        for needle in [
            "export const getArticleList = (params?: ArticleListParams)",
            "export const getArticle = (id: number)",
            "export const createArticle = (data: ArticleCreateParams)",
            "export const updateArticle = (id: number, data: ArticleUpdateParams)",
            "export const deleteArticle = (id: number)",
        ] {
            assert!(out.contains(needle), "missing: {needle}");
        }
        assert!(out.contains("'/api/v1/admin/articles'"));
        assert!(out.contains("`/api/v1/admin/articles/${id}`"));
    }

    #[test]
    fn test_update_params_all_optional() {
        let data = articles_data();
        let out = render(&data);

        let update = out
            .split("export interface ArticleUpdateParams {")
            .nth(1)
            .unwrap()
            .split('}')
            .next()
            .unwrap();
        assert!(update.contains("title?: string"));
        assert!(!update.contains("id?"));
    }
}
