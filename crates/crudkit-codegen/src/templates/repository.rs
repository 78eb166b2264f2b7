//! Back-end repository template: CRUD, pagination, search, existence check
//! and the soft-delete extensions.

use crudkit_core::GO_MODULE;

use crate::data::TemplateData;
use crate::helpers;

pub(crate) fn render(data: &TemplateData) -> String {
    let model = &data.model_name;
    let camel = &data.model_name_camel;
    let title = &data.title;
    let module = &data.module;
    let pk = helpers::primary_key_name(&data.fields);

    let mut out = format!(
        "package repository\n\n\
         import (\n\
         \t\"gorm.io/gorm\"\n\n\
         \t\"{GO_MODULE}/services/{module}-api/internal/model\"\n\
         )\n\n"
    );

    out.push_str(&format!("// {model}Repository {title} Repository\n"));
    out.push_str(&format!(
        "type {model}Repository struct {{\n\tdb *gorm.DB\n}}\n\n"
    ));

    out.push_str(&format!("// New{model}Repository 创建 Repository 实例\n"));
    out.push_str(&format!(
        "func New{model}Repository(db *gorm.DB) *{model}Repository {{\n\
         \treturn &{model}Repository{{\n\t\tdb: db,\n\t}}\n}}\n\n"
    ));

    out.push_str(&format!("// Create 创建{title}\n"));
    out.push_str(&format!(
        "func (r *{model}Repository) Create({camel} *model.{model}) error {{\n\
         \treturn r.db.Create({camel}).Error\n}}\n\n"
    ));

    out.push_str(&format!("// GetByID 根据 ID 获取{title}\n"));
    out.push_str(&format!(
        "func (r *{model}Repository) GetByID(id uint64) (*model.{model}, error) {{\n\
         \tvar {camel} model.{model}\n\
         \terr := r.db.First(&{camel}, id).Error\n\
         \tif err != nil {{\n\t\treturn nil, err\n\t}}\n\
         \treturn &{camel}, nil\n}}\n\n"
    ));

    out.push_str(&format!("// Update 更新{title}\n"));
    out.push_str(&format!(
        "func (r *{model}Repository) Update({camel} *model.{model}) error {{\n\
         \treturn r.db.Save({camel}).Error\n}}\n\n"
    ));

    out.push_str(&format!("// Delete 删除{title}\n"));
    out.push_str(&format!(
        "func (r *{model}Repository) Delete(id uint64) error {{\n"
    ));
    if data.has_soft_delete {
        out.push_str(&format!(
            "\treturn r.db.Delete(&model.{model}{{}}, id).Error\n"
        ));
    } else {
        out.push_str(&format!(
            "\treturn r.db.Unscoped().Delete(&model.{model}{{}}, id).Error\n"
        ));
    }
    out.push_str("}\n\n");

    // List with search, sort and pagination.
    out.push_str(&format!("// List 获取{title}列表\n"));
    out.push_str(&format!(
        "func (r *{model}Repository) List(req *model.{model}ListRequest) ([]*model.{model}, int64, error) {{\n\
         \tvar list []*model.{model}\n\
         \tvar total int64\n\n\
         \tdb := r.db.Model(&model.{model}{{}})\n\n"
    ));
    if data.has_search {
        out.push_str(&format!(
            "\t// 搜索\n\
             \tif req.Keyword != \"\" {{\n\
             \t\tkeyword := \"%\" + req.Keyword + \"%\"\n\
             \t\tdb = db.Where(\"{}\", keyword{})\n\
             \t}}\n\n",
            helpers::search_condition(&data.fields),
            helpers::search_params(&data.fields),
        ));
    }
    out.push_str(
        "\t// 统计总数\n\
         \tif err := db.Count(&total).Error; err != nil {\n\
         \t\treturn nil, 0, err\n\t}\n\n",
    );
    if data.has_sort {
        out.push_str(&format!(
            "\t// 排序\n\
             \tif req.SortBy != \"\" {{\n\
             \t\torder := req.SortBy\n\
             \t\tif req.SortOrder == \"desc\" {{\n\
             \t\t\torder += \" DESC\"\n\
             \t\t}}\n\
             \t\tdb = db.Order(order)\n\
             \t}} else {{\n\
             \t\tdb = db.Order(\"{pk} DESC\")\n\
             \t}}\n\n"
        ));
    } else {
        out.push_str(&format!("\tdb = db.Order(\"{pk} DESC\")\n\n"));
    }
    if data.has_pagination {
        out.push_str(
            "\t// 分页\n\
             \tif req.Page > 0 && req.PageSize > 0 {\n\
             \t\toffset := (req.Page - 1) * req.PageSize\n\
             \t\tdb = db.Offset(offset).Limit(req.PageSize)\n\t}\n\n",
        );
    }
    out.push_str("\terr := db.Find(&list).Error\n\treturn list, total, err\n}\n\n");

    out.push_str(&format!("// Exists 检查{title}是否存在\n"));
    out.push_str(&format!(
        "func (r *{model}Repository) Exists(id uint64) (bool, error) {{\n\
         \tvar count int64\n\
         \terr := r.db.Model(&model.{model}{{}}).Where(\"{pk} = ?\", id).Count(&count).Error\n\
         \treturn count > 0, err\n}}\n"
    ));

    if data.has_soft_delete {
        out.push('\n');
        out.push_str(&format!("// Restore 恢复已删除的{title}\n"));
        out.push_str(&format!(
            "func (r *{model}Repository) Restore(id uint64) error {{\n\
             \treturn r.db.Model(&model.{model}{{}}).Unscoped().Where(\"{pk} = ?\", id).Update(\"deleted_at\", nil).Error\n}}\n\n"
        ));
        out.push_str(&format!("// ForceDelete 永久删除{title}\n"));
        out.push_str(&format!(
            "func (r *{model}Repository) ForceDelete(id uint64) error {{\n\
             \treturn r.db.Unscoped().Delete(&model.{model}{{}}, id).Error\n}}\n"
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::tests::{articles_data, column, data_for};
    use crudkit_core::KeyKind;

    #[test]
    fn test_repository_shape() {
        let data = articles_data();
        let out = render(&data);

        assert!(out.contains("package repository"));
        assert!(out.contains("app/services/admin-api/internal/model"));
        assert!(out.contains("func NewArticleRepository(db *gorm.DB) *ArticleRepository"));
        assert!(out.contains("db.Offset(offset).Limit(req.PageSize)"));
        assert!(out.contains("db = db.Order(\"id DESC\")"));
        // No soft-delete column, so delete is unscoped and there is no restore.
        assert!(out.contains("Unscoped().Delete"));
        assert!(!out.contains("func (r *ArticleRepository) Restore"));
    }

    #[test]
    fn test_search_uses_one_wildcard_parameter_per_column() {
        let data = articles_data();
        let out = render(&data);

        // id, title and content are searchable for the articles table.
        assert!(out.contains("id LIKE ? OR title LIKE ? OR content LIKE ?"));
        assert!(out.contains("keyword, keyword, keyword)"));
    }

    #[test]
    fn test_soft_delete_emits_restore_and_force_delete() {
        let data = data_for(
            "articles",
            vec![
                column("id", "int", KeyKind::Primary, true, false),
                column("title", "varchar(200)", KeyKind::None, false, false),
                column("deleted_at", "datetime", KeyKind::None, false, true),
            ],
        );
        let out = render(&data);

        assert!(out.contains("func (r *ArticleRepository) Restore(id uint64) error"));
        assert!(out.contains("func (r *ArticleRepository) ForceDelete(id uint64) error"));
        assert!(out.contains("return r.db.Delete(&model.Article{}, id).Error"));
    }
}
