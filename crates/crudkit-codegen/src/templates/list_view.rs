//! Front-end list view template: search bar, data table, pagination and the
//! create/edit dialog.

use crudkit_core::naming::{to_kebab_case, to_snake_case};
use crudkit_core::FormWidget;

use crate::data::TemplateData;
use crate::helpers;
use crate::templates::vue;

pub(crate) fn render(data: &TemplateData) -> String {
    let model = &data.model_name;
    let camel = &data.model_name_camel;
    let kebab = to_kebab_case(model);
    let title = &data.title;
    let snake_model = to_snake_case(model);
    let pk_snake = helpers::primary_key_snake(&data.fields);

    let mut out = String::from("<template>\n");
    out.push_str(&format!("  <div class=\"{kebab}-container\">\n"));
    out.push_str("    <div class=\"page-header\">\n");
    out.push_str(&format!("      <h2>{title}</h2>\n"));
    out.push_str("    </div>\n\n");

    // Search bar.
    out.push_str("    <!-- 搜索栏 -->\n");
    out.push_str("    <el-card class=\"search-card\" shadow=\"never\">\n");
    out.push_str("      <el-form :inline=\"true\" :model=\"searchForm\" class=\"search-form\">\n");
    if data.has_search {
        out.push_str("        <el-form-item label=\"搜索\">\n");
        out.push_str("          <el-input\n");
        out.push_str("            v-model=\"searchForm.keyword\"\n");
        out.push_str("            placeholder=\"请输入关键词\"\n");
        out.push_str("            clearable\n");
        out.push_str("            @keyup.enter=\"handleSearch\"\n");
        out.push_str("            style=\"width: 240px\"\n");
        out.push_str("          />\n");
        out.push_str("        </el-form-item>\n");
    }
    out.push_str("        <el-form-item>\n");
    out.push_str("          <el-button type=\"primary\" @click=\"handleSearch\">\n");
    out.push_str("            <el-icon><Search /></el-icon>\n");
    out.push_str("            <span>搜索</span>\n");
    out.push_str("          </el-button>\n");
    out.push_str("          <el-button @click=\"handleReset\">\n");
    out.push_str("            <el-icon><Refresh /></el-icon>\n");
    out.push_str("            <span>重置</span>\n");
    out.push_str("          </el-button>\n");
    out.push_str("        </el-form-item>\n");
    out.push_str("      </el-form>\n");
    out.push_str("    </el-card>\n\n");

    // Table card.
    out.push_str("    <!-- 操作栏 -->\n");
    out.push_str("    <el-card class=\"table-card\" shadow=\"never\">\n");
    out.push_str("      <template #header>\n");
    out.push_str("        <div class=\"card-header\">\n");
    out.push_str(&format!("          <span>{title}列表</span>\n"));
    out.push_str("          <el-button type=\"primary\" @click=\"handleCreate\">\n");
    out.push_str("            <el-icon><Plus /></el-icon>\n");
    out.push_str(&format!("            <span>新建{title}</span>\n"));
    out.push_str("          </el-button>\n");
    out.push_str("        </div>\n");
    out.push_str("      </template>\n\n");

    out.push_str("      <!-- 表格 -->\n");
    out.push_str("      <el-table\n");
    out.push_str("        v-loading=\"loading\"\n");
    out.push_str("        :data=\"tableData\"\n");
    out.push_str("        border\n");
    out.push_str("        stripe\n");
    out.push_str("        style=\"width: 100%\"\n");
    out.push_str("      >\n");

    // One column per list-visible field; switches become tags, time values
    // go through the date formatter.
    for field in data.fields.iter().filter(|f| f.list_visible) {
        let snake = to_snake_case(&field.name);
        let label = &field.label;

        out.push_str("        <el-table-column\n");
        out.push_str(&format!("          prop=\"{snake}\"\n"));
        out.push_str(&format!("          label=\"{label}\"\n"));
        if field.form_type == FormWidget::Switch {
            out.push_str("          width=\"100\"\n");
            out.push_str("        >\n");
            out.push_str("          <template #default=\"{ row }\">\n");
            out.push_str(&format!(
                "            <el-tag :type=\"row.{snake} ? 'success' : 'info'\">\n"
            ));
            out.push_str(&format!(
                "              {{{{ row.{snake} ? '是' : '否' }}}}\n"
            ));
            out.push_str("            </el-tag>\n");
            out.push_str("          </template>\n");
            out.push_str("        </el-table-column>\n");
        } else if field.is_time() {
            out.push_str("          width=\"180\"\n");
            out.push_str("        >\n");
            out.push_str("          <template #default=\"{ row }\">\n");
            out.push_str(&format!("            {{{{ formatDate(row.{snake}) }}}}\n"));
            out.push_str("          </template>\n");
            out.push_str("        </el-table-column>\n");
        } else {
            out.push_str("        />\n");
        }
    }

    out.push_str("        <el-table-column label=\"操作\" width=\"200\" fixed=\"right\">\n");
    out.push_str("          <template #default=\"{ row }\">\n");
    out.push_str(
        "            <el-button type=\"primary\" size=\"small\" link @click=\"handleEdit(row)\">\n",
    );
    out.push_str("              编辑\n");
    out.push_str("            </el-button>\n");
    out.push_str(
        "            <el-button type=\"danger\" size=\"small\" link @click=\"handleDelete(row)\">\n",
    );
    out.push_str("              删除\n");
    out.push_str("            </el-button>\n");
    out.push_str("          </template>\n");
    out.push_str("        </el-table-column>\n");
    out.push_str("      </el-table>\n\n");

    // Pagination.
    if data.has_pagination {
        out.push_str("      <!-- 分页 -->\n");
        out.push_str("      <el-pagination\n");
        out.push_str("        v-model:current-page=\"pagination.page\"\n");
        out.push_str("        v-model:page-size=\"pagination.page_size\"\n");
        out.push_str("        :page-sizes=\"[10, 20, 50, 100]\"\n");
        out.push_str("        :total=\"pagination.total\"\n");
        out.push_str("        layout=\"total, sizes, prev, pager, next, jumper\"\n");
        out.push_str("        @size-change=\"handleSizeChange\"\n");
        out.push_str("        @current-change=\"handlePageChange\"\n");
        out.push_str("        style=\"margin-top: 20px; justify-content: flex-end\"\n");
        out.push_str("      />\n");
    }
    out.push_str("    </el-card>\n\n");

    // Dialog with the shared form markup.
    out.push_str("    <!-- 表单对话框 -->\n");
    out.push_str("    <el-dialog\n");
    out.push_str("      v-model=\"dialogVisible\"\n");
    out.push_str("      :title=\"dialogTitle\"\n");
    out.push_str("      width=\"600px\"\n");
    out.push_str("      @close=\"handleDialogClose\"\n");
    out.push_str("    >\n");
    out.push_str("      <el-form\n");
    out.push_str("        ref=\"formRef\"\n");
    out.push_str("        :model=\"form\"\n");
    out.push_str("        :rules=\"formRules\"\n");
    out.push_str("        label-width=\"100px\"\n");
    out.push_str("      >\n");
    out.push_str(&vue::form_items(data));
    out.push_str("      </el-form>\n\n");
    out.push_str("      <template #footer>\n");
    out.push_str("        <el-button @click=\"dialogVisible = false\">取消</el-button>\n");
    out.push_str(
        "        <el-button type=\"primary\" :loading=\"submitLoading\" @click=\"handleSubmit\">\n",
    );
    out.push_str("          确定\n");
    out.push_str("        </el-button>\n");
    out.push_str("      </template>\n");
    out.push_str("    </el-dialog>\n");
    out.push_str("  </div>\n");
    out.push_str("</template>\n\n");

    // Script.
    out.push_str("<script setup lang=\"ts\">\n");
    out.push_str("import { ref, reactive, onMounted } from 'vue'\n");
    out.push_str(
        "import { ElMessage, ElMessageBox, FormInstance, FormRules } from 'element-plus'\n",
    );
    out.push_str("import { Search, Refresh, Plus } from '@element-plus/icons-vue'\n");
    out.push_str(&format!(
        "import * as {camel}Api from '@/api/{snake_model}'\n\n"
    ));

    out.push_str("// ========== 数据定义 ==========\n\n");
    out.push_str("const loading = ref(false)\n");
    out.push_str("const submitLoading = ref(false)\n");
    out.push_str(&format!(
        "const tableData = ref<{camel}Api.{model}[]>([])\n\n"
    ));

    out.push_str("// 搜索表单\nconst searchForm = reactive({\n");
    if data.has_search {
        out.push_str("  keyword: '',\n");
    }
    out.push_str("})\n\n");

    out.push_str("// 分页\nconst pagination = reactive({\n");
    out.push_str("  page: 1,\n  page_size: 10,\n  total: 0\n})\n\n");

    out.push_str("// 对话框\n");
    out.push_str("const dialogVisible = ref(false)\n");
    out.push_str("const dialogTitle = ref('')\n");
    out.push_str("const isEdit = ref(false)\n");
    out.push_str("const currentId = ref<number | null>(null)\n\n");

    out.push_str("// 表单\n");
    out.push_str("const formRef = ref<FormInstance>()\n");
    out.push_str(&format!(
        "const form = reactive<{camel}Api.{model}CreateParams>({{\n"
    ));
    out.push_str(&vue::form_defaults(data));
    out.push_str("})\n\n");

    out.push_str("// 表单验证规则\nconst formRules = reactive<FormRules>({\n");
    out.push_str(&vue::form_rules(data));
    out.push_str("})\n\n");

    out.push_str("// ========== 方法 ==========\n\n");

    out.push_str("// 加载数据\nconst loadData = async () => {\n");
    out.push_str("  loading.value = true\n  try {\n");
    out.push_str("    const params = {\n");
    out.push_str("      page: pagination.page,\n");
    out.push_str("      page_size: pagination.page_size,\n");
    if data.has_search {
        out.push_str("      keyword: searchForm.keyword,\n");
    }
    out.push_str("    }\n\n");
    out.push_str(&format!(
        "    const data = await {camel}Api.get{model}List(params)\n"
    ));
    out.push_str("    tableData.value = data.list\n");
    out.push_str("    pagination.total = data.total\n");
    out.push_str("  } catch (error: any) {\n");
    out.push_str("    ElMessage.error(error?.message || '加载数据失败')\n");
    out.push_str("  } finally {\n    loading.value = false\n  }\n}\n\n");

    out.push_str("// 搜索\nconst handleSearch = () => {\n");
    out.push_str("  pagination.page = 1\n  loadData()\n}\n\n");

    out.push_str("// 重置\nconst handleReset = () => {\n");
    if data.has_search {
        out.push_str("  searchForm.keyword = ''\n");
    }
    out.push_str("  handleSearch()\n}\n\n");

    out.push_str("// 分页变化\nconst handlePageChange = (page: number) => {\n");
    out.push_str("  pagination.page = page\n  loadData()\n}\n\n");
    out.push_str("const handleSizeChange = (size: number) => {\n");
    out.push_str("  pagination.page_size = size\n  pagination.page = 1\n  loadData()\n}\n\n");

    out.push_str("// 新建\nconst handleCreate = () => {\n");
    out.push_str("  isEdit.value = false\n");
    out.push_str(&format!("  dialogTitle.value = '新建{title}'\n"));
    out.push_str("  resetForm()\n  dialogVisible.value = true\n}\n\n");

    out.push_str("// 编辑\n");
    out.push_str(&format!(
        "const handleEdit = async (row: {camel}Api.{model}) => {{\n"
    ));
    out.push_str("  isEdit.value = true\n");
    out.push_str(&format!("  currentId.value = row.{pk_snake}\n"));
    out.push_str(&format!("  dialogTitle.value = '编辑{title}'\n\n"));
    out.push_str("  try {\n");
    out.push_str(&format!(
        "    const data = await {camel}Api.get{model}(row.{pk_snake})\n"
    ));
    out.push_str(&vue::load_assignments(data, "    "));
    out.push_str("    dialogVisible.value = true\n");
    out.push_str("  } catch (error: any) {\n");
    out.push_str("    ElMessage.error(error?.message || '获取数据失败')\n  }\n}\n\n");

    out.push_str("// 删除\n");
    out.push_str(&format!(
        "const handleDelete = async (row: {camel}Api.{model}) => {{\n"
    ));
    out.push_str("  try {\n");
    out.push_str("    await ElMessageBox.confirm('确定要删除这条记录吗？', '提示', {\n");
    out.push_str("      confirmButtonText: '确定',\n");
    out.push_str("      cancelButtonText: '取消',\n");
    out.push_str("      type: 'warning'\n    })\n\n");
    out.push_str(&format!(
        "    await {camel}Api.delete{model}(row.{pk_snake})\n"
    ));
    out.push_str("    ElMessage.success('删除成功')\n    loadData()\n");
    out.push_str("  } catch (error: any) {\n");
    out.push_str("    if (error !== 'cancel') {\n");
    out.push_str("      ElMessage.error(error?.message || '删除失败')\n    }\n  }\n}\n\n");

    out.push_str("// 提交表单\nconst handleSubmit = async () => {\n");
    out.push_str("  if (!formRef.value) return\n\n");
    out.push_str("  await formRef.value.validate(async (valid) => {\n");
    out.push_str("    if (!valid) return\n\n");
    out.push_str("    submitLoading.value = true\n    try {\n");
    out.push_str("      if (isEdit.value && currentId.value) {\n");
    out.push_str(&format!(
        "        await {camel}Api.update{model}(currentId.value, form)\n"
    ));
    out.push_str("        ElMessage.success('更新成功')\n");
    out.push_str("      } else {\n");
    out.push_str(&format!("        await {camel}Api.create{model}(form)\n"));
    out.push_str("        ElMessage.success('创建成功')\n      }\n\n");
    out.push_str("      dialogVisible.value = false\n      loadData()\n");
    out.push_str("    } catch (error: any) {\n");
    out.push_str("      ElMessage.error(error?.message || '操作失败')\n");
    out.push_str("    } finally {\n      submitLoading.value = false\n    }\n  })\n}\n\n");

    out.push_str("// 关闭对话框\nconst handleDialogClose = () => {\n  resetForm()\n}\n\n");

    out.push_str("// 重置表单\nconst resetForm = () => {\n");
    out.push_str("  formRef.value?.resetFields()\n");
    for field in data.fields.iter().filter(|f| f.in_create_request()) {
        out.push_str(&format!(
            "  form.{} = {}\n",
            to_snake_case(&field.name),
            helpers::ts_default(field)
        ));
    }
    out.push_str("}\n\n");

    out.push_str("// 格式化日期\nconst formatDate = (date: string) => {\n");
    out.push_str("  if (!date) return '-'\n");
    out.push_str("  return new Date(date).toLocaleString('zh-CN')\n}\n\n");

    out.push_str("// ========== 生命周期 ==========\n\n");
    out.push_str("onMounted(() => {\n  loadData()\n})\n");
    out.push_str("</script>\n\n");

    // Styles.
    out.push_str("<style scoped>\n");
    out.push_str(&format!(
        ".{kebab}-container {{\n  padding: 20px;\n}}\n\n"
    ));
    out.push_str(".page-header {\n  margin-bottom: 20px;\n}\n\n");
    out.push_str(".page-header h2 {\n  margin: 0;\n  font-size: 24px;\n  font-weight: 500;\n}\n\n");
    out.push_str(".search-card {\n  margin-bottom: 20px;\n}\n\n");
    out.push_str(".search-form {\n  margin-bottom: 0;\n}\n\n");
    out.push_str(
        ".card-header {\n  display: flex;\n  justify-content: space-between;\n  align-items: center;\n}\n",
    );
    out.push_str("</style>\n");

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::tests::{articles_data, column, data_for};
    use crudkit_core::KeyKind;

    #[test]
    fn test_list_view_shape() {
        let data = articles_data();
        let out = render(&data);

        assert!(out.starts_with("<template>\n"));
        assert!(out.contains("<div class=\"article-container\">"));
        assert!(out.contains("<h2>文章管理</h2>"));
        assert!(out.contains("v-model=\"searchForm.keyword\""));
        assert!(out.contains("import * as articleApi from '@/api/article'"));
        assert!(out.contains("currentId.value = row.id"));
        assert!(out.ends_with("</style>\n"));
    }

    #[test]
    fn test_time_columns_use_formatter() {
        let data = articles_data();
        let out = render(&data);

        assert!(out.contains("{{ formatDate(row.created_at) }}"));
        assert!(out.contains("width=\"180\""));
    }

    #[test]
    fn test_deleted_at_never_reaches_the_table() {
        let data = data_for(
            "articles",
            vec![
                column("id", "int", KeyKind::Primary, true, false),
                column("title", "varchar(200)", KeyKind::None, false, false),
                column("deleted_at", "datetime", KeyKind::None, false, true),
            ],
        );
        let out = render(&data);

        assert!(!out.contains("prop=\"deleted_at\""));
    }

    #[test]
    fn test_switch_fields_render_as_tags() {
        let data = data_for(
            "users",
            vec![
                column("id", "int", KeyKind::Primary, true, false),
                column("is_active", "tinyint", KeyKind::None, false, false),
            ],
        );
        let out = render(&data);

        assert!(out.contains("<el-tag :type=\"row.is_active ? 'success' : 'info'\">"));
        assert!(out.contains("{{ row.is_active ? '是' : '否' }}"));
        assert!(out.contains("<el-switch v-model=\"form.is_active\" />"));
    }
}
