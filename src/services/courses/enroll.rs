use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode,
    courses::requests::EnrollStudentRequest,
    users::entities::UserRole,
};

use super::CourseService;

pub async fn handle_enroll_student(
    service: &CourseService,
    course_id: i64,
    enroll_request: EnrollStudentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(user_id) = RequireJWT::extract_user_id(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Authentication required",
        )));
    };

    // 1. 课程必须存在且属于当前教师
    match storage.get_owned_course(course_id, user_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::CourseNotFound,
                "Course not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to query course: {e}"),
                )),
            );
        }
    }

    // 2. 目标用户必须存在且为学生
    match storage.get_user_by_id(enroll_request.student_id).await {
        Ok(Some(target)) if target.role == UserRole::Student => {}
        Ok(_) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::StudentNotFound,
                "Student not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to query student: {e}"),
                )),
            );
        }
    }

    // 3. 重复选课直接拒绝，已有记录保持不变
    match storage
        .is_enrolled(enroll_request.student_id, course_id)
        .await
    {
        Ok(true) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::DuplicateEnrollment,
                "Student already enrolled in this course",
            )));
        }
        Ok(false) => {}
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to query enrollment: {e}"),
                )),
            );
        }
    }

    match storage
        .enroll_student(course_id, enroll_request.student_id)
        .await
    {
        Ok(enrollment) => {
            tracing::info!(
                "Student {} enrolled in course {} by teacher {}",
                enroll_request.student_id,
                course_id,
                user_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(enrollment, "Student enrolled")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to enroll student: {e}"),
            )),
        ),
    }
}
