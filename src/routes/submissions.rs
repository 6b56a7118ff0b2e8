use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequireJWT};
use crate::models::submissions::requests::GradeSubmissionRequest;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::SubmissionService;

// 懒加载的全局 SubmissionService 实例
static SUBMISSION_SERVICE: Lazy<SubmissionService> = Lazy::new(SubmissionService::new_lazy);

// 提交作业（与 GET 共用路径，角色在此处把关）
pub async fn upload_submission(
    req: HttpRequest,
    path: web::Path<i64>, // assignment_id
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    if RequireJWT::extract_user_role(&req) != Some(UserRole::Student) {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "Access denied.",
        )));
    }

    SUBMISSION_SERVICE
        .upload_submission(path.into_inner(), payload, &req)
        .await
}

// 列出作业下的提交
pub async fn list_submissions(
    req: HttpRequest,
    path: web::Path<i64>, // assignment_id
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .list_submissions(path.into_inner(), &req)
        .await
}

// 下载提交文件
pub async fn download_submission(
    req: HttpRequest,
    path: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .download_submission(path.into_inner(), &req)
        .await
}

// 评分
pub async fn grade_submission(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<GradeSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .grade_submission(path.into_inner(), body.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_submission_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/submissions")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/assignment/{id}")
                    .route(web::get().to(list_submissions))
                    .route(web::post().to(upload_submission)),
            )
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new(&UserRole::Teacher))
                    .route("/{id}/download", web::get().to(download_submission))
                    .route("/{id}/grade", web::post().to(grade_submission)),
            ),
    );
}
