use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode,
    enrollments::requests::CreateGuardianLinkRequest,
    users::entities::UserRole,
};

use super::GuardianService;

pub async fn handle_link_child(
    service: &GuardianService,
    link_request: CreateGuardianLinkRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(user_id) = RequireJWT::extract_user_id(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Authentication required",
        )));
    };

    // 子女必须存在且为学生
    match storage.get_user_by_id(link_request.child_id).await {
        Ok(Some(child)) if child.role == UserRole::Student => {}
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

    match storage
        .create_guardian_link(user_id, link_request.child_id)
        .await
    {
        Ok(link) => {
            tracing::info!(
                "Guardian link created: parent {} -> child {}",
                user_id,
                link_request.child_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(link, "Guardian link created")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to create guardian link: {e}"),
            )),
        ),
    }
}
