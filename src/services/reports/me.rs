use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ReportService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode, users::entities::UserRole};

pub async fn handle_my_report(
    service: &ReportService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let Some(user) = RequireJWT::extract_user_claims(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Authentication required",
        )));
    };

    // 学生看自己，家长看第一个关联的子女，教师走按学生查询的端点
    let target = match user.role {
        UserRole::Student => user,
        UserRole::Parent => {
            let child_id = match storage.first_child_of(user.id).await {
                Ok(Some(id)) => id,
                Ok(None) => {
                    return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                        ErrorCode::NoChildLinked,
                        "No child linked to this account",
                    )));
                }
                Err(e) => {
                    return Ok(HttpResponse::InternalServerError().json(
                        ApiResponse::error_empty(
                            ErrorCode::InternalServerError,
                            format!("Failed to query guardianship: {e}"),
                        ),
                    ));
                }
            };

            match storage.get_user_by_id(child_id).await {
                Ok(Some(child)) => child,
                Ok(None) => {
                    return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                        ErrorCode::StudentNotFound,
                        "Student not found",
                    )));
                }
                Err(e) => {
                    return Ok(HttpResponse::InternalServerError().json(
                        ApiResponse::error_empty(
                            ErrorCode::InternalServerError,
                            format!("Failed to query student: {e}"),
                        ),
                    ));
                }
            }
        }
        UserRole::Teacher => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::ReportNotForTeachers,
                "Teachers should use the per-student report endpoint",
            )));
        }
    };

    match storage.build_student_report(&target).await {
        Ok(report) => Ok(HttpResponse::Ok().json(ApiResponse::success(report, "Report built"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to build report: {e}"),
            )),
        ),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{HttpMessage, http::StatusCode, test::TestRequest, web};

    use super::*;
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::tests::{make_storage, make_user};

    // 家长没有任何监护关联时 /reports/me 返回 404
    #[tokio::test]
    async fn test_parent_without_child_link_gets_not_found() {
        let storage = make_storage().await;
        let parent = make_user(&storage, "parent", UserRole::Parent).await;
        let storage: Arc<dyn Storage> = Arc::new(storage);

        let request = TestRequest::default()
            .app_data(web::Data::new(storage))
            .to_http_request();
        request.extensions_mut().insert(parent);

        let service = ReportService::new_lazy();
        let response = handle_my_report(&service, &request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
