use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode, users::entities::UserRole};

use super::CourseService;

pub async fn handle_list_courses(
    service: &CourseService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(user) = RequireJWT::extract_user_claims(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Authentication required",
        )));
    };

    // 教师看自己的课程，学生看已选课程，家长看全部
    let result = match user.role {
        UserRole::Teacher => storage.list_teacher_courses(user.id).await,
        UserRole::Student => storage.list_student_courses(user.id).await,
        UserRole::Parent => storage.list_all_courses().await,
    };

    match result {
        Ok(courses) => Ok(HttpResponse::Ok().json(ApiResponse::success(courses, "Courses listed"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to list courses: {e}"),
            )),
        ),
    }
}
