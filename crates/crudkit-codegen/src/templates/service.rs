//! Back-end service template: delegates to the repository, clamps paging,
//! and translates data-layer errors into user-facing ones.

use crudkit_core::naming::to_pascal_case;
use crudkit_core::GO_MODULE;

use crate::data::TemplateData;

pub(crate) fn render(data: &TemplateData) -> String {
    let model = &data.model_name;
    let camel = &data.model_name_camel;
    let title = &data.title;
    let module = &data.module;

    let mut out = format!(
        "package service\n\n\
         import (\n\
         \t\"errors\"\n\n\
         \t\"gorm.io/gorm\"\n\n\
         \t\"{GO_MODULE}/pkg/logger\"\n\
         \t\"{GO_MODULE}/services/{module}-api/internal/model\"\n\
         \t\"{GO_MODULE}/services/{module}-api/internal/repository\"\n\
         )\n\n"
    );

    out.push_str(&format!("// {model}Service {title} Service\n"));
    out.push_str(&format!(
        "type {model}Service struct {{\n\
         \trepo   *repository.{model}Repository\n\
         \tlogger logger.Logger\n}}\n\n"
    ));

    out.push_str(&format!("// New{model}Service 创建 Service 实例\n"));
    out.push_str(&format!(
        "func New{model}Service(repo *repository.{model}Repository, logger logger.Logger) *{model}Service {{\n\
         \treturn &{model}Service{{\n\t\trepo:   repo,\n\t\tlogger: logger,\n\t}}\n}}\n\n"
    ));

    // Create.
    out.push_str(&format!("// Create 创建{title}\n"));
    out.push_str(&format!(
        "func (s *{model}Service) Create(req *model.{model}CreateRequest) (*model.{model}, error) {{\n"
    ));
    out.push_str(&format!("\t{camel} := &model.{model}{{\n"));
    for field in data.fields.iter().filter(|f| f.in_create_request()) {
        let pascal = to_pascal_case(&field.name);
        out.push_str(&format!("\t\t{pascal}: req.{pascal},\n"));
    }
    out.push_str("\t}\n\n");
    out.push_str(&format!(
        "\tif err := s.repo.Create({camel}); err != nil {{\n\
         \t\ts.logger.Error(\"创建{title}失败\", err)\n\
         \t\treturn nil, errors.New(\"创建{title}失败\")\n\t}}\n\n\
         \treturn {camel}, nil\n}}\n\n"
    ));

    // Get.
    out.push_str(&format!("// GetByID 根据 ID 获取{title}\n"));
    out.push_str(&format!(
        "func (s *{model}Service) GetByID(id uint64) (*model.{model}, error) {{\n\
         \t{camel}, err := s.repo.GetByID(id)\n\
         \tif err != nil {{\n\
         \t\tif errors.Is(err, gorm.ErrRecordNotFound) {{\n\
         \t\t\treturn nil, errors.New(\"{title}不存在\")\n\t\t}}\n\
         \t\ts.logger.Error(\"获取{title}失败\", err, \"id\", id)\n\
         \t\treturn nil, errors.New(\"获取{title}失败\")\n\t}}\n\n\
         \treturn {camel}, nil\n}}\n\n"
    ));

    // Update: every request field is optional, assign only what was sent.
    out.push_str(&format!("// Update 更新{title}\n"));
    out.push_str(&format!(
        "func (s *{model}Service) Update(id uint64, req *model.{model}UpdateRequest) error {{\n\
         \t{camel}, err := s.repo.GetByID(id)\n\
         \tif err != nil {{\n\
         \t\tif errors.Is(err, gorm.ErrRecordNotFound) {{\n\
         \t\t\treturn errors.New(\"{title}不存在\")\n\t\t}}\n\
         \t\treturn errors.New(\"获取{title}失败\")\n\t}}\n\n\
         \t// 更新字段\n"
    ));
    for field in data.fields.iter().filter(|f| f.in_update_request()) {
        let pascal = to_pascal_case(&field.name);
        if field.go_type.starts_with('*') {
            out.push_str(&format!(
                "\tif req.{pascal} != nil {{\n\t\t{camel}.{pascal} = req.{pascal}\n\t}}\n"
            ));
        } else {
            out.push_str(&format!(
                "\tif req.{pascal} != nil {{\n\t\t{camel}.{pascal} = *req.{pascal}\n\t}}\n"
            ));
        }
    }
    out.push_str(&format!(
        "\n\tif err := s.repo.Update({camel}); err != nil {{\n\
         \t\ts.logger.Error(\"更新{title}失败\", err, \"id\", id)\n\
         \t\treturn errors.New(\"更新{title}失败\")\n\t}}\n\n\
         \treturn nil\n}}\n\n"
    ));

    // Delete.
    out.push_str(&format!("// Delete 删除{title}\n"));
    out.push_str(&format!(
        "func (s *{model}Service) Delete(id uint64) error {{\n\
         \texists, err := s.repo.Exists(id)\n\
         \tif err != nil {{\n\
         \t\ts.logger.Error(\"检查{title}是否存在失败\", err, \"id\", id)\n\
         \t\treturn errors.New(\"检查{title}是否存在失败\")\n\t}}\n\n\
         \tif !exists {{\n\t\treturn errors.New(\"{title}不存在\")\n\t}}\n\n\
         \tif err := s.repo.Delete(id); err != nil {{\n\
         \t\ts.logger.Error(\"删除{title}失败\", err, \"id\", id)\n\
         \t\treturn errors.New(\"删除{title}失败\")\n\t}}\n\n\
         \treturn nil\n}}\n\n"
    ));

    // List: paging clamped to page >= 1, 1 <= page_size <= 100.
    out.push_str(&format!("// List 获取{title}列表\n"));
    out.push_str(&format!(
        "func (s *{model}Service) List(req *model.{model}ListRequest) ([]*model.{model}, int64, error) {{\n\
         \tif req.Page <= 0 {{\n\t\treq.Page = 1\n\t}}\n\
         \tif req.PageSize <= 0 {{\n\t\treq.PageSize = 10\n\t}}\n\
         \tif req.PageSize > 100 {{\n\t\treq.PageSize = 100\n\t}}\n\n\
         \tlist, total, err := s.repo.List(req)\n\
         \tif err != nil {{\n\
         \t\ts.logger.Error(\"获取{title}列表失败\", err)\n\
         \t\treturn nil, 0, errors.New(\"获取{title}列表失败\")\n\t}}\n\n\
         \treturn list, total, nil\n}}\n"
    ));

    out
}
