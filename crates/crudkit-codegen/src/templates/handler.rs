//! Back-end handler template: binds requests, maps service errors onto HTTP
//! codes and wraps responses in the ambient envelope.

use crudkit_core::GO_MODULE;

use crate::data::TemplateData;

pub(crate) fn render(data: &TemplateData) -> String {
    let model = &data.model_name;
    let camel = &data.model_name_camel;
    let title = &data.title;
    let module = &data.module;
    let resource = &data.resource_name;

    let mut out = format!(
        "package handler\n\n\
         import (\n\
         \t\"strconv\"\n\
         \t\"strings\"\n\n\
         \t\"github.com/gin-gonic/gin\"\n\n\
         \t\"{GO_MODULE}/pkg/logger\"\n\
         \t\"{GO_MODULE}/pkg/response\"\n\
         \t\"{GO_MODULE}/services/{module}-api/internal/model\"\n\
         \t\"{GO_MODULE}/services/{module}-api/internal/service\"\n\
         )\n\n"
    );

    out.push_str(&format!("// {model}Handler {title} Handler\n"));
    out.push_str(&format!(
        "type {model}Handler struct {{\n\
         \tservice *service.{model}Service\n\
         \tlogger  logger.Logger\n}}\n\n"
    ));

    out.push_str(&format!("// New{model}Handler 创建 Handler 实例\n"));
    out.push_str(&format!(
        "func New{model}Handler(service *service.{model}Service, logger logger.Logger) *{model}Handler {{\n\
         \treturn &{model}Handler{{\n\t\tservice: service,\n\t\tlogger:  logger,\n\t}}\n}}\n\n"
    ));

    // List.
    out.push_str(&format!(
        "// List 获取{title}列表\n\
         // @Summary 获取{title}列表\n\
         // @Description 获取{title}列表（支持分页、搜索、排序）\n\
         // @Tags {title}\n\
         // @Accept json\n\
         // @Produce json\n\
         // @Param page query int false \"页码\" default(1)\n\
         // @Param page_size query int false \"每页数量\" default(10)\n"
    ));
    if data.has_search {
        out.push_str("// @Param keyword query string false \"搜索关键词\"\n");
    }
    if data.has_sort {
        out.push_str("// @Param sort_by query string false \"排序字段\"\n");
        out.push_str("// @Param sort_order query string false \"排序方式(asc/desc)\"\n");
    }
    out.push_str(&format!(
        "// @Success 200 {{object}} response.Response\n\
         // @Router /api/v1/{module}/{resource} [get]\n\
         func (h *{model}Handler) List(c *gin.Context) {{\n\
         \tvar req model.{model}ListRequest\n\
         \tif err := c.ShouldBindQuery(&req); err != nil {{\n\
         \t\tresponse.Error(c, 400, \"参数错误: \"+err.Error())\n\t\treturn\n\t}}\n\n\
         \tlist, total, err := h.service.List(&req)\n\
         \tif err != nil {{\n\
         \t\tresponse.Error(c, 500, err.Error())\n\t\treturn\n\t}}\n\n\
         \tresponse.SuccessWithData(c, gin.H{{\n\
         \t\t\"list\":      model.To{model}ResponseList(list),\n\
         \t\t\"total\":     total,\n\
         \t\t\"page\":      req.Page,\n\
         \t\t\"page_size\": req.PageSize,\n\
         \t}})\n}}\n\n"
    ));

    // Get.
    out.push_str(&format!(
        "// Get 获取{title}详情\n\
         // @Summary 获取{title}详情\n\
         // @Description 根据 ID 获取{title}详情\n\
         // @Tags {title}\n\
         // @Accept json\n\
         // @Produce json\n\
         // @Param id path int true \"{title} ID\"\n\
         // @Success 200 {{object}} response.Response\n\
         // @Router /api/v1/{module}/{resource}/{{id}} [get]\n\
         func (h *{model}Handler) Get(c *gin.Context) {{\n\
         \tid, err := strconv.ParseUint(c.Param(\"id\"), 10, 64)\n\
         \tif err != nil {{\n\
         \t\tresponse.Error(c, 400, \"ID 格式错误\")\n\t\treturn\n\t}}\n\n\
         \t{camel}, err := h.service.GetByID(id)\n\
         \tif err != nil {{\n\
         \t\tresponse.Error(c, h.statusFor(err), err.Error())\n\t\treturn\n\t}}\n\n\
         \tresponse.Success(c, model.To{model}Response({camel}))\n}}\n\n"
    ));

    // Create.
    out.push_str(&format!(
        "// Create 创建{title}\n\
         // @Summary 创建{title}\n\
         // @Description 创建新的{title}\n\
         // @Tags {title}\n\
         // @Accept json\n\
         // @Produce json\n\
         // @Param body body model.{model}CreateRequest true \"{title}信息\"\n\
         // @Success 200 {{object}} response.Response\n\
         // @Router /api/v1/{module}/{resource} [post]\n\
         func (h *{model}Handler) Create(c *gin.Context) {{\n\
         \tvar req model.{model}CreateRequest\n\
         \tif err := c.ShouldBindJSON(&req); err != nil {{\n\
         \t\tresponse.Error(c, 400, \"参数错误: \"+err.Error())\n\t\treturn\n\t}}\n\n\
         \t{camel}, err := h.service.Create(&req)\n\
         \tif err != nil {{\n\
         \t\tresponse.Error(c, 500, err.Error())\n\t\treturn\n\t}}\n\n\
         \tresponse.Success(c, model.To{model}Response({camel}))\n}}\n\n"
    ));

    // Update.
    out.push_str(&format!(
        "// Update 更新{title}\n\
         // @Summary 更新{title}\n\
         // @Description 更新{title}信息\n\
         // @Tags {title}\n\
         // @Accept json\n\
         // @Produce json\n\
         // @Param id path int true \"{title} ID\"\n\
         // @Param body body model.{model}UpdateRequest true \"{title}信息\"\n\
         // @Success 200 {{object}} response.Response\n\
         // @Router /api/v1/{module}/{resource}/{{id}} [put]\n\
         func (h *{model}Handler) Update(c *gin.Context) {{\n\
         \tid, err := strconv.ParseUint(c.Param(\"id\"), 10, 64)\n\
         \tif err != nil {{\n\
         \t\tresponse.Error(c, 400, \"ID 格式错误\")\n\t\treturn\n\t}}\n\n\
         \tvar req model.{model}UpdateRequest\n\
         \tif err := c.ShouldBindJSON(&req); err != nil {{\n\
         \t\tresponse.Error(c, 400, \"参数错误: \"+err.Error())\n\t\treturn\n\t}}\n\n\
         \tif err := h.service.Update(id, &req); err != nil {{\n\
         \t\tresponse.Error(c, h.statusFor(err), err.Error())\n\t\treturn\n\t}}\n\n\
         \tresponse.Success(c, nil)\n}}\n\n"
    ));

    // Delete.
    out.push_str(&format!(
        "// Delete 删除{title}\n\
         // @Summary 删除{title}\n\
         // @Description 删除{title}\n\
         // @Tags {title}\n\
         // @Accept json\n\
         // @Produce json\n\
         // @Param id path int true \"{title} ID\"\n\
         // @Success 200 {{object}} response.Response\n\
         // @Router /api/v1/{module}/{resource}/{{id}} [delete]\n\
         func (h *{model}Handler) Delete(c *gin.Context) {{\n\
         \tid, err := strconv.ParseUint(c.Param(\"id\"), 10, 64)\n\
         \tif err != nil {{\n\
         \t\tresponse.Error(c, 400, \"ID 格式错误\")\n\t\treturn\n\t}}\n\n\
         \tif err := h.service.Delete(id); err != nil {{\n\
         \t\tresponse.Error(c, h.statusFor(err), err.Error())\n\t\treturn\n\t}}\n\n\
         \tresponse.Success(c, nil)\n}}\n\n"
    ));

    // Service-error to HTTP-status mapping, scoped to this handler type so
    // generated files can coexist in one package.
    out.push_str(&format!(
        "// statusFor 服务错误映射为 HTTP 状态码\n\
         func (h *{model}Handler) statusFor(err error) int {{\n\
         \tif strings.Contains(err.Error(), \"不存在\") {{\n\
         \t\treturn 404\n\t}}\n\
         \treturn 500\n}}\n"
    ));

    out
}
