//! Back-end model template: entity struct, request/response types and the
//! response converters.

use crudkit_core::naming::{to_pascal_case, to_snake_case};

use crate::data::TemplateData;
use crate::helpers;

pub(crate) fn render(data: &TemplateData) -> String {
    let model = &data.model_name;
    let camel = &data.model_name_camel;
    let title = &data.title;

    let mut out = String::from("package model\n\n");

    if helpers::needs_time_import(&data.fields) {
        out.push_str("import (\n\t\"time\"\n)\n\n");
    }

    // Entity with storage and JSON tags.
    out.push_str(&format!("// {model} {title}\n"));
    out.push_str(&format!("type {model} struct {{\n"));
    for field in &data.fields {
        out.push_str(&format!(
            "\t{} {} `{} {}`{}\n",
            to_pascal_case(&field.name),
            field.go_type,
            helpers::gorm_tag(field),
            helpers::json_tag(field),
            comment_suffix(&field.comment),
        ));
    }
    out.push_str("}\n\n");

    out.push_str("// TableName 指定表名\n");
    out.push_str(&format!(
        "func ({camel} *{model}) TableName() string {{\n\treturn \"{}\"\n}}\n\n",
        data.table
    ));

    // List request.
    out.push_str(&format!("// {model}ListRequest {title}列表请求\n"));
    out.push_str(&format!("type {model}ListRequest struct {{\n"));
    out.push_str("\tPage     int    `form:\"page\" binding:\"omitempty,min=1\"`\n");
    out.push_str("\tPageSize int    `form:\"page_size\" binding:\"omitempty,min=1,max=100\"`\n");
    if data.has_search {
        out.push_str("\tKeyword string `form:\"keyword\"`\n");
    }
    if data.has_sort {
        out.push_str("\tSortBy    string `form:\"sort_by\"`\n");
        out.push_str(
            "\tSortOrder string `form:\"sort_order\" binding:\"omitempty,oneof=asc desc\"`\n",
        );
    }
    out.push_str("}\n\n");

    // Create request: primary and auto-increment fields never appear.
    out.push_str(&format!("// {model}CreateRequest 创建{title}请求\n"));
    out.push_str(&format!("type {model}CreateRequest struct {{\n"));
    for field in data.fields.iter().filter(|f| f.in_create_request()) {
        let binding = helpers::binding_rules(&field.validations);
        let tag = if binding.is_empty() {
            format!("json:\"{}\"", to_snake_case(&field.name))
        } else {
            format!("json:\"{}\" binding:\"{binding}\"", to_snake_case(&field.name))
        };
        out.push_str(&format!(
            "\t{} {} `{tag}`{}\n",
            to_pascal_case(&field.name),
            field.go_type,
            comment_suffix(&field.comment),
        ));
    }
    out.push_str("}\n\n");

    // Update request: everything mutable is optional for partial update.
    out.push_str(&format!("// {model}UpdateRequest 更新{title}请求\n"));
    out.push_str(&format!("type {model}UpdateRequest struct {{\n"));
    for field in data.fields.iter().filter(|f| f.in_update_request()) {
        let binding = helpers::update_binding_rules(&field.validations);
        let tag = if binding.is_empty() {
            format!("json:\"{}\"", to_snake_case(&field.name))
        } else {
            format!("json:\"{}\" binding:\"{binding}\"", to_snake_case(&field.name))
        };
        out.push_str(&format!(
            "\t{} {} `{tag}`{}\n",
            to_pascal_case(&field.name),
            helpers::go_update_type(field),
            comment_suffix(&field.comment),
        ));
    }
    out.push_str("}\n\n");

    // Response carries list-visible fields only.
    out.push_str(&format!("// {model}Response {title}响应\n"));
    out.push_str(&format!("type {model}Response struct {{\n"));
    for field in data.fields.iter().filter(|f| f.list_visible) {
        out.push_str(&format!(
            "\t{} {} `json:\"{}\"`{}\n",
            to_pascal_case(&field.name),
            field.go_type,
            to_snake_case(&field.name),
            comment_suffix(&field.comment),
        ));
    }
    out.push_str("}\n\n");

    // Converters.
    out.push_str(&format!("// To{model}Response 转换为响应对象\n"));
    out.push_str(&format!(
        "func To{model}Response({camel} *{model}) *{model}Response {{\n"
    ));
    out.push_str(&format!("\tif {camel} == nil {{\n\t\treturn nil\n\t}}\n\n"));
    out.push_str(&format!("\treturn &{model}Response{{\n"));
    for field in data.fields.iter().filter(|f| f.list_visible) {
        let pascal = to_pascal_case(&field.name);
        out.push_str(&format!("\t\t{pascal}: {camel}.{pascal},\n"));
    }
    out.push_str("\t}\n}\n\n");

    out.push_str(&format!("// To{model}ResponseList 批量转换为响应对象\n"));
    out.push_str(&format!(
        "func To{model}ResponseList(list []*{model}) []*{model}Response {{\n"
    ));
    out.push_str(&format!(
        "\tresult := make([]*{model}Response, 0, len(list))\n"
    ));
    out.push_str("\tfor _, item := range list {\n");
    out.push_str(&format!(
        "\t\tresult = append(result, To{model}Response(item))\n"
    ));
    out.push_str("\t}\n\treturn result\n}\n");

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
    fn test_model_shape() {
        let data = articles_data();
        let out = render(&data);

        assert!(out.starts_with("package model\n"));
        assert!(out.contains("import (\n\t\"time\"\n)"));
        assert!(out.contains("type Article struct {"));
        assert!(out.contains("func (article *Article) TableName() string {\n\treturn \"articles\"\n}"));
        assert!(out.contains("SortBy    string `form:\"sort_by\"`"));
        assert!(out.contains("SortOrder string"));
    }

    #[test]
    fn test_create_request_excludes_key_fields() {
        let data = articles_data();
        let out = render(&data);

        let create = out
            .split("type ArticleCreateRequest struct {")
            .nth(1)
            .unwrap()
            .split('}')
            .next()
            .unwrap();
        assert!(create.contains("Title"));
        assert!(create.contains("Content"));
        assert!(!create.contains("Id "));
        assert!(create.contains("binding:\"required,max=200\""));
    }

    #[test]
    fn test_update_request_is_fully_optional() {
        let data = articles_data();
        let out = render(&data);

        let update = out
            .split("type ArticleUpdateRequest struct {")
            .nth(1)
            .unwrap()
            .split('}')
            .next()
            .unwrap();
        assert!(update.contains("Title *string"));
        assert!(update.contains("binding:\"omitempty,max=200\""));
    }

    #[test]
    fn test_response_has_list_visible_fields_only() {
        let data = articles_data();
        let out = render(&data);

        let response = out
            .split("type ArticleResponse struct {")
            .nth(1)
            .unwrap()
            .split('}')
            .next()
            .unwrap();
        assert!(response.contains("Title"));
        // `content` is hidden from lists by default.
        assert!(!response.contains("Content"));
    }
}
