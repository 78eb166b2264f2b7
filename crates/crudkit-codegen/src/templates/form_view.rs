//! Front-end form view template: a standalone route-driven create/edit page.

use crudkit_core::naming::{to_kebab_case, to_snake_case};

use crate::data::TemplateData;
use crate::templates::vue;

pub(crate) fn render(data: &TemplateData) -> String {
    let model = &data.model_name;
    let camel = &data.model_name_camel;
    let kebab = to_kebab_case(model);
    let title = &data.title;
    let snake_model = to_snake_case(model);

    let mut out = String::from("<template>\n");
    out.push_str(&format!("  <div class=\"{kebab}-form-container\">\n"));
    out.push_str("    <el-card>\n");
    out.push_str("      <template #header>\n");
    out.push_str("        <div class=\"card-header\">\n");
    out.push_str(&format!(
        "          <span>{{{{ isEdit ? '编辑{title}' : '新建{title}' }}}}</span>\n"
    ));
    out.push_str("          <el-button @click=\"handleBack\">返回</el-button>\n");
    out.push_str("        </div>\n");
    out.push_str("      </template>\n\n");

    out.push_str("      <el-form\n");
    out.push_str("        ref=\"formRef\"\n");
    out.push_str("        :model=\"form\"\n");
    out.push_str("        :rules=\"formRules\"\n");
    out.push_str("        label-width=\"120px\"\n");
    out.push_str("        style=\"max-width: 600px\"\n");
    out.push_str("      >\n");
    out.push_str(&vue::form_items(data));
    out.push_str("\n        <el-form-item>\n");
    out.push_str(
        "          <el-button type=\"primary\" :loading=\"submitLoading\" @click=\"handleSubmit\">\n",
    );
    out.push_str("            保存\n");
    out.push_str("          </el-button>\n");
    out.push_str("          <el-button @click=\"handleBack\">取消</el-button>\n");
    out.push_str("        </el-form-item>\n");
    out.push_str("      </el-form>\n");
    out.push_str("    </el-card>\n");
    out.push_str("  </div>\n");
    out.push_str("</template>\n\n");

    out.push_str("<script setup lang=\"ts\">\n");
    out.push_str("import { ref, reactive, onMounted } from 'vue'\n");
    out.push_str("import { useRoute, useRouter } from 'vue-router'\n");
    out.push_str("import { ElMessage, FormInstance, FormRules } from 'element-plus'\n");
    out.push_str(&format!(
        "import * as {camel}Api from '@/api/{snake_model}'\n\n"
    ));

    out.push_str("// ========== 路由 ==========\n\n");
    out.push_str("const route = useRoute()\nconst router = useRouter()\n\n");

    out.push_str("// ========== 数据定义 ==========\n\n");
    out.push_str("const submitLoading = ref(false)\n");
    out.push_str("const isEdit = ref(false)\n");
    out.push_str("const id = ref<number | null>(null)\n\n");

    out.push_str("const formRef = ref<FormInstance>()\n");
    out.push_str(&format!(
        "const form = reactive<{camel}Api.{model}CreateParams>({{\n"
    ));
    out.push_str(&vue::form_defaults(data));
    out.push_str("})\n\n");

    out.push_str("const formRules = reactive<FormRules>({\n");
    out.push_str(&vue::form_rules(data));
    out.push_str("})\n\n");

    out.push_str("// ========== 方法 ==========\n\n");

    out.push_str("// 加载数据\nconst loadData = async () => {\n");
    out.push_str("  if (!id.value) return\n\n");
    out.push_str("  try {\n");
    out.push_str(&format!(
        "    const data = await {camel}Api.get{model}(id.value)\n"
    ));
    out.push_str(&vue::load_assignments(data, "    "));
    out.push_str("  } catch (error: any) {\n");
    out.push_str("    ElMessage.error(error?.message || '加载数据失败')\n");
    out.push_str("    handleBack()\n  }\n}\n\n");

    out.push_str("// 提交表单\nconst handleSubmit = async () => {\n");
    out.push_str("  if (!formRef.value) return\n\n");
    out.push_str("  await formRef.value.validate(async (valid) => {\n");
    out.push_str("    if (!valid) return\n\n");
    out.push_str("    submitLoading.value = true\n    try {\n");
    out.push_str("      if (isEdit.value && id.value) {\n");
    out.push_str(&format!(
        "        await {camel}Api.update{model}(id.value, form)\n"
    ));
    out.push_str("        ElMessage.success('更新成功')\n");
    out.push_str("      } else {\n");
    out.push_str(&format!("        await {camel}Api.create{model}(form)\n"));
    out.push_str("        ElMessage.success('创建成功')\n      }\n\n");
    out.push_str("      handleBack()\n");
    out.push_str("    } catch (error: any) {\n");
    out.push_str("      ElMessage.error(error?.message || '操作失败')\n");
    out.push_str("    } finally {\n      submitLoading.value = false\n    }\n  })\n}\n\n");

    out.push_str("// 返回列表\nconst handleBack = () => {\n  router.back()\n}\n\n");

    out.push_str("// ========== 生命周期 ==========\n\n");
    out.push_str("onMounted(() => {\n");
    out.push_str("  const routeId = route.params.id\n");
    out.push_str("  if (routeId && routeId !== 'create') {\n");
    out.push_str("    isEdit.value = true\n");
    out.push_str("    id.value = Number(routeId)\n");
    out.push_str("    loadData()\n  }\n})\n");
    out.push_str("</script>\n\n");

    out.push_str("<style scoped>\n");
    out.push_str(&format!(
        ".{kebab}-form-container {{\n  padding: 20px;\n}}\n\n"
    ));
    out.push_str(
        ".card-header {\n  display: flex;\n  justify-content: space-between;\n  align-items: center;\n}\n",
    );
    out.push_str("</style>\n");

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::tests::articles_data;

    #[test]
    fn test_form_view_shape() {
        let data = articles_data();
        let out = render(&data);

        assert!(out.contains("<div class=\"article-form-container\">"));
        assert!(out.contains("{{ isEdit ? '编辑文章管理' : '新建文章管理' }}"));
        assert!(out.contains("const route = useRoute()"));
        assert!(out.contains("if (routeId && routeId !== 'create')"));
        assert!(out.contains("await articleApi.getArticle(id.value)"));
    }

    #[test]
    fn test_form_has_every_form_visible_field() {
        let data = articles_data();
        let out = render(&data);

        assert!(out.contains("prop=\"title\""));
        assert!(out.contains("prop=\"content\""));
        // Hidden-in-form fields stay out.
        assert!(!out.contains("prop=\"created_at\""));
    }
}
