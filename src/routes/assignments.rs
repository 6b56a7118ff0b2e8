use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequireJWT};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::AssignmentService;

// 懒加载的全局 AssignmentService 实例
static ASSIGNMENT_SERVICE: Lazy<AssignmentService> = Lazy::new(AssignmentService::new_lazy);

// 创建作业（与 GET 共用路径，角色在此处把关）
pub async fn create_assignment(
    req: HttpRequest,
    path: web::Path<i64>, // course_id
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    if RequireJWT::extract_user_role(&req) != Some(UserRole::Teacher) {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "Access denied.",
        )));
    }

    ASSIGNMENT_SERVICE
        .create_assignment(path.into_inner(), payload, &req)
        .await
}

// 列出课程下的作业
pub async fn list_assignments(
    req: HttpRequest,
    path: web::Path<i64>, // course_id
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .list_assignments(path.into_inner(), &req)
        .await
}

// 作业详情
pub async fn get_assignment(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .get_assignment(path.into_inner(), &req)
        .await
}

// 下载作业附件
pub async fn download_attachment(
    req: HttpRequest,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .download_attachment(path.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_assignment_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/assignments")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/course/{id}")
                    .route(web::get().to(list_assignments))
                    .route(web::post().to(create_assignment)),
            )
            .route("/{id}/attachment", web::get().to(download_attachment))
            .route("/{id}", web::get().to(get_assignment)),
    );
}
