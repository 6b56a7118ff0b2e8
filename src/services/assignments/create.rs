use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use futures_util::TryStreamExt;
use futures_util::stream::StreamExt;
use std::fs;
use std::io::Write;
use std::{fs::File, path::Path};

use super::AssignmentService;
use crate::config::AppConfig;
use crate::errors::EduTasksError;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode, assignments::requests::CreateAssignmentRequest};
use crate::utils::blob::{blob_key, has_pdf_extension};

pub async fn handle_create_assignment(
    service: &AssignmentService,
    course_id: i64,
    mut payload: Multipart,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let config = AppConfig::get();

    let Some(user_id) = RequireJWT::extract_user_id(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Authentication required",
        )));
    };

    // 课程必须存在且属于当前教师
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

    let upload_dir = config.attachment_dir();
    if !Path::new(&upload_dir).exists()
        && let Err(e) = fs::create_dir_all(&upload_dir)
    {
        tracing::error!("{}", EduTasksError::file_operation(format!("{e}")));
        return Ok(
            HttpResponse::InternalServerError().json(ApiResponse::<()>::error_empty(
                ErrorCode::FileUploadFailed,
                "Failed to create upload directory",
            )),
        );
    }

    // 表单字段
    let mut title: Option<String> = None;
    let mut description: Option<String> = None;
    let mut due_date_raw: Option<String> = None;
    let mut attachment_name: Option<String> = None;

    while let Ok(Some(mut field)) = payload.try_next().await {
        let content_disposition = field.content_disposition();
        let name = content_disposition
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();

        if name == "attachment" {
            let original_name = content_disposition
                .and_then(|cd| cd.get_filename())
                .map(|s| s.to_string())
                .unwrap_or_default();

            // 扩展名检查，不做内容嗅探
            if !has_pdf_extension(&original_name) {
                return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                    ErrorCode::FileTypeNotAllowed,
                    "Only PDF attachments are allowed",
                )));
            }

            let stored_name = blob_key("assignment", course_id, user_id, &original_name);
            let file_path = format!("{upload_dir}/{stored_name}");
            let mut f = match File::create(&file_path) {
                Ok(file) => file,
                Err(e) => {
                    tracing::error!("{}", EduTasksError::file_operation(format!("{e}")));
                    return Ok(HttpResponse::InternalServerError().json(
                        ApiResponse::<()>::error_empty(
                            ErrorCode::FileUploadFailed,
                            "Failed to create file",
                        ),
                    ));
                }
            };

            let mut total_size: usize = 0;
            while let Some(chunk) = field.next().await {
                let data = chunk?;
                total_size += data.len();
                if total_size > config.upload.max_size {
                    let _ = fs::remove_file(&file_path);
                    return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                        ErrorCode::FileSizeExceeded,
                        "File size exceeds the limit",
                    )));
                }
                f.write_all(&data)?;
            }

            attachment_name = Some(stored_name);
        } else {
            let mut value = Vec::new();
            while let Some(chunk) = field.next().await {
                value.extend_from_slice(&chunk?);
            }
            let value = String::from_utf8_lossy(&value).to_string();

            match name.as_str() {
                "title" => title = Some(value),
                "description" => description = Some(value),
                "due_date" => due_date_raw = Some(value),
                _ => {}
            }
        }
    }

    let Some(title) = title.filter(|t| !t.trim().is_empty()) else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::Validation,
            "Title is required",
        )));
    };

    let due_date = match due_date_raw
        .as_deref()
        .map(chrono::DateTime::parse_from_rfc3339)
    {
        Some(Ok(dt)) => dt.with_timezone(&chrono::Utc),
        Some(Err(_)) | None => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::Validation,
                "due_date must be an RFC 3339 timestamp",
            )));
        }
    };

    let create_request = CreateAssignmentRequest {
        title,
        description,
        due_date,
    };

    match storage
        .create_assignment(course_id, user_id, create_request, attachment_name)
        .await
    {
        Ok(assignment) => {
            tracing::info!(
                "Assignment {} created in course {} by teacher {}",
                assignment.id,
                course_id,
                user_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(assignment, "Assignment created")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to create assignment: {e}"),
            )),
        ),
    }
}
