use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use futures_util::TryStreamExt;
use futures_util::stream::StreamExt;
use std::fs;
use std::io::Write;
use std::{fs::File, path::Path};

use super::SubmissionService;
use crate::config::AppConfig;
use crate::errors::EduTasksError;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::blob::blob_key;

pub async fn handle_upload_submission(
    service: &SubmissionService,
    assignment_id: i64,
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

    // 作业必须存在。是否选课不校验：未选课的学生也可以提交。
    match storage.get_assignment_by_id(assignment_id).await {
        Ok(Some(_)) => {}
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
    }

    let upload_dir = config.submission_dir();
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

    let mut stored_name: Option<String> = None;

    while let Ok(Some(mut field)) = payload.try_next().await {
        let content_disposition = field.content_disposition();
        let name = content_disposition
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();

        if name != "file" {
            continue;
        }

        let original_name = content_disposition
            .and_then(|cd| cd.get_filename())
            .map(|s| s.to_string())
            .unwrap_or_default();

        let key = blob_key("submission", assignment_id, user_id, &original_name);
        let file_path = format!("{upload_dir}/{key}");
        let mut f = match File::create(&file_path) {
            Ok(file) => file,
            Err(e) => {
                tracing::error!("{}", EduTasksError::file_operation(format!("{e}")));
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::<()>::error_empty(
                        ErrorCode::FileUploadFailed,
                        "Failed to create file",
                    )),
                );
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

        stored_name = Some(key);
    }

    let Some(stored_name) = stored_name else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::FileNotFound,
            "No file found in upload payload",
        )));
    };

    // 总是追加新行，历史提交保留
    match storage
        .create_submission(assignment_id, user_id, &stored_name)
        .await
    {
        Ok(submission) => {
            tracing::info!(
                "Submission {} uploaded for assignment {} by student {}",
                submission.id,
                assignment_id,
                user_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(submission, "Submission uploaded")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to record submission: {e}"),
            )),
        ),
    }
}
