use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequireJWT};
use crate::models::courses::requests::{CreateCourseRequest, EnrollStudentRequest};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::CourseService;

// 懒加载的全局 CourseService 实例
static COURSE_SERVICE: Lazy<CourseService> = Lazy::new(CourseService::new_lazy);

// 按角色列出课程
pub async fn list_courses(req: HttpRequest) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.list_courses(&req).await
}

// 创建课程（与 GET 共用路径，角色在此处把关）
pub async fn create_course(
    req: HttpRequest,
    body: web::Json<CreateCourseRequest>,
) -> ActixResult<HttpResponse> {
    if RequireJWT::extract_user_role(&req) != Some(UserRole::Teacher) {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "Access denied.",
        )));
    }

    COURSE_SERVICE.create_course(body.into_inner(), &req).await
}

// 将学生加入课程
pub async fn enroll_student(
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<EnrollStudentRequest>,
) -> ActixResult<HttpResponse> {
    COURSE_SERVICE
        .enroll_student(path.into_inner(), body.into_inner(), &req)
        .await
}

// 删除课程
pub async fn delete_course(req: HttpRequest, path: web::Path<i64>) -> ActixResult<HttpResponse> {
    COURSE_SERVICE.delete_course(path.into_inner(), &req).await
}

// 配置路由
pub fn configure_course_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/courses")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_courses))
                    .route(web::post().to(create_course)),
            )
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new(&UserRole::Teacher))
                    .route("/{id}/students", web::post().to(enroll_student))
                    .route("/{id}", web::delete().to(delete_course)),
            ),
    );
}
