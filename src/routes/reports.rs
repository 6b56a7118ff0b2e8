use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::services::ReportService;

// 懒加载的全局 ReportService 实例
static REPORT_SERVICE: Lazy<ReportService> = Lazy::new(ReportService::new_lazy);

// 当前用户视角的报表
pub async fn my_report(req: HttpRequest) -> ActixResult<HttpResponse> {
    REPORT_SERVICE.my_report(&req).await
}

// 指定学生的报表
pub async fn student_report(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    REPORT_SERVICE.student_report(path.into_inner(), &req).await
}

// 配置路由
pub fn configure_report_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/reports")
            .wrap(middlewares::RequireJWT)
            .route("/me", web::get().to(my_report))
            .route("/student/{id}", web::get().to(student_report)),
    );
}
