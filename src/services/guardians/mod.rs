pub mod link;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::enrollments::requests::CreateGuardianLinkRequest;
use crate::storage::Storage;

pub struct GuardianService {
    storage: Option<Arc<dyn Storage>>,
}

impl GuardianService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 家长关联子女
    pub async fn link_child(
        &self,
        link_request: CreateGuardianLinkRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        link::handle_link_child(self, link_request, request).await
    }
}
