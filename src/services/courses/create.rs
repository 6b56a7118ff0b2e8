use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode, courses::requests::CreateCourseRequest};
use crate::utils::validate::validate_name;

use super::CourseService;

pub async fn handle_create_course(
    service: &CourseService,
    create_request: CreateCourseRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(user_id) = RequireJWT::extract_user_id(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Authentication required",
        )));
    };

    if let Err(msg) = validate_name(&create_request.name) {
        return Ok(
            HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::Validation, msg))
        );
    }

    match storage.create_course(user_id, create_request).await {
        Ok(course) => {
            tracing::info!("Course {} created by teacher {}", course.id, user_id);
            Ok(HttpResponse::Created().json(ApiResponse::success(course, "Course created")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to create course: {e}"),
            )),
        ),
    }
}
