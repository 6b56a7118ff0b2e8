use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::enrollments::requests::CreateGuardianLinkRequest;
use crate::models::users::entities::UserRole;
use crate::services::GuardianService;

// 懒加载的全局 GuardianService 实例
static GUARDIAN_SERVICE: Lazy<GuardianService> = Lazy::new(GuardianService::new_lazy);

// 家长关联子女
pub async fn link_child(
    req: HttpRequest,
    body: web::Json<CreateGuardianLinkRequest>,
) -> ActixResult<HttpResponse> {
    GUARDIAN_SERVICE.link_child(body.into_inner(), &req).await
}

// 配置路由
pub fn configure_guardian_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/guardians")
            .wrap(middlewares::RequireRole::new(&UserRole::Parent))
            .wrap(middlewares::RequireJWT)
            .route("", web::post().to(link_child)),
    );
}
