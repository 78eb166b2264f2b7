//! Shared Vue fragments used by both the list view and the form view:
//! form items per widget, validation rules, defaults and load assignments.

use crudkit_core::naming::to_snake_case;
use crudkit_core::FormWidget;

use crate::data::TemplateData;
use crate::helpers;

/// Renders one `<el-form-item>` per editable field, choosing the control
/// from the inferred widget. The set matches the reactive form object, so
/// every rendered control has a backing field.
pub(super) fn form_items(data: &TemplateData) -> String {
    let mut out = String::new();
    for field in data.fields.iter().filter(|f| f.in_create_request()) {
        let snake = to_snake_case(&field.name);
        let label = &field.label;

        out.push_str(&format!(
            "        <el-form-item label=\"{label}\" prop=\"{snake}\">\n"
        ));
        match field.form_type {
            FormWidget::Textarea => {
                out.push_str("          <el-input\n");
                out.push_str(&format!("            v-model=\"form.{snake}\"\n"));
                out.push_str("            type=\"textarea\"\n");
                out.push_str("            :rows=\"4\"\n");
                out.push_str(&format!("            placeholder=\"请输入{label}\"\n"));
                out.push_str("          />\n");
            }
            FormWidget::Switch => {
                out.push_str(&format!(
                    "          <el-switch v-model=\"form.{snake}\" />\n"
                ));
            }
            FormWidget::Select => {
                out.push_str(&format!(
                    "          <el-select v-model=\"form.{snake}\" placeholder=\"请选择{label}\" style=\"width: 100%\">\n"
                ));
                out.push_str("            <el-option label=\"选项1\" value=\"1\" />\n");
                out.push_str("            <el-option label=\"选项2\" value=\"2\" />\n");
                out.push_str("          </el-select>\n");
            }
            FormWidget::Date | FormWidget::Datetime => {
                let picker = if field.form_type == FormWidget::Date {
                    "date"
                } else {
                    "datetime"
                };
                out.push_str("          <el-date-picker\n");
                out.push_str(&format!("            v-model=\"form.{snake}\"\n"));
                out.push_str(&format!("            type=\"{picker}\"\n"));
                out.push_str(&format!("            placeholder=\"请选择{label}\"\n"));
                out.push_str("            style=\"width: 100%\"\n");
                out.push_str("          />\n");
            }
            _ => {
                out.push_str("          <el-input\n");
                out.push_str(&format!("            v-model=\"form.{snake}\"\n"));
                match field.form_type {
                    FormWidget::Password => out.push_str("            type=\"password\"\n"),
                    FormWidget::Number => out.push_str("            type=\"number\"\n"),
                    _ => {}
                }
                out.push_str(&format!("            placeholder=\"请输入{label}\"\n"));
                out.push_str("          />\n");
            }
        }
        out.push_str("        </el-form-item>\n");
    }
    out
}

/// Renders the element-plus validation rule map for the editable fields.
pub(super) fn form_rules(data: &TemplateData) -> String {
    let mut out = String::new();
    for field in data
        .fields
        .iter()
        .filter(|f| f.in_create_request() && !f.validations.is_empty())
    {
        let snake = to_snake_case(&field.name);
        let label = &field.label;

        out.push_str(&format!("  {snake}: [\n"));
        if field.validations.iter().any(|v| v == "required") {
            out.push_str(&format!(
                "    {{ required: true, message: '请输入{label}', trigger: 'blur' }},\n"
            ));
        }
        if field.validations.iter().any(|v| v == "email") {
            out.push_str(
                "    { type: 'email', message: '请输入正确的邮箱地址', trigger: 'blur' },\n",
            );
        }
        if let Some(min) = helpers::rule_value(&field.validations, "min") {
            out.push_str(&format!(
                "    {{ min: {min}, message: '长度不能少于{min}位', trigger: 'blur' }},\n"
            ));
        }
        if let Some(max) = helpers::rule_value(&field.validations, "max") {
            out.push_str(&format!(
                "    {{ max: {max}, message: '长度不能超过{max}位', trigger: 'blur' }},\n"
            ));
        }
        out.push_str("  ],\n");
    }
    out
}

/// Renders the reactive form's initial values.
pub(super) fn form_defaults(data: &TemplateData) -> String {
    data.fields
        .iter()
        .filter(|f| f.in_create_request())
        .map(|f| format!("  {}: {},\n", to_snake_case(&f.name), helpers::ts_default(f)))
        .collect()
}

/// Renders the `form.x = data.x` assignments used when editing.
pub(super) fn load_assignments(data: &TemplateData, indent: &str) -> String {
    data.fields
        .iter()
        .filter(|f| f.in_update_request())
        .map(|f| {
            let snake = to_snake_case(&f.name);
            format!("{indent}form.{snake} = data.{snake}\n")
        })
        .collect()
}
