use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::header};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::AssignmentService;
use crate::config::AppConfig;
use crate::errors::EduTasksError;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access;

pub async fn handle_download_attachment(
    service: &AssignmentService,
    assignment_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(user) = RequireJWT::extract_user_claims(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Authentication required",
        )));
    };

    let assignment = match storage.get_assignment_by_id(assignment_id).await {
        Ok(Some(assignment)) => assignment,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::AssignmentNotFound,
                "Assignment not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to query assignment: {e}"),
                )),
            );
        }
    };

    // 附件不存在先于权限判定，与其余端点保持"存在性在前"的一致口径
    let Some(attachment_name) = assignment.attachment_name.clone() else {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AttachmentNotFound,
            "Assignment has no attachment",
        )));
    };

    if !access::can_view_assignment(&user, &assignment) {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "Access denied.",
        )));
    }

    let config = AppConfig::get();
    let file_path = format!("{}/{}", config.attachment_dir(), attachment_name);

    if !Path::new(&file_path).exists() {
        return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::FileNotFound,
            "Attachment file not found",
        )));
    }

    let mut file = match File::open(&file_path) {
        Ok(f) => f,
        Err(e) => {
            tracing::error!("{:?}", EduTasksError::file_operation(format!("{e:?}")));
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "File open failed",
                )),
            );
        }
    };

    // 原样读出字节流，不做任何文本转码
    let mut buf = Vec::new();
    if file.read_to_end(&mut buf).is_err() {
        tracing::error!("{:?}", EduTasksError::file_operation("File read failed"));
        return Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                "File read failed",
            )),
        );
    }

    Ok(HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, "application/pdf"))
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{attachment_name}\""),
        ))
        .body(buf))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{HttpMessage, http::StatusCode, test::TestRequest, web};

    use super::*;
    use crate::models::users::entities::UserRole;
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::tests::{
        assignment_request, make_course, make_storage, make_user,
    };

    // 附件缺失的判定先于可见性：非作业所属教师查询无附件的作业得到 404 而非 403
    #[tokio::test]
    async fn test_missing_attachment_reported_before_forbidden() {
        let storage = make_storage().await;
        let owner = make_user(&storage, "owner", UserRole::Teacher).await;
        let outsider = make_user(&storage, "outsider", UserRole::Teacher).await;
        let course = make_course(&storage, owner.id, "Math").await;
        let assignment = storage
            .create_assignment(course.id, owner.id, assignment_request("hw1"), None)
            .await
            .unwrap();
        let storage: Arc<dyn Storage> = Arc::new(storage);

        let request = TestRequest::default()
            .app_data(web::Data::new(storage))
            .to_http_request();
        request.extensions_mut().insert(outsider);

        let service = AssignmentService::new_lazy();
        let response = handle_download_attachment(&service, assignment.id, &request)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
