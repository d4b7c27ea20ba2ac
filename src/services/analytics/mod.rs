pub mod compute;
mod course;
mod overview;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::storage::Storage;

pub struct AnalyticsService {
    storage: Option<Arc<dyn Storage>>,
}

impl AnalyticsService {
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

    pub async fn get_course_analytics(
        &self,
        request: &HttpRequest,
        course_id: i64,
    ) -> ActixResult<HttpResponse> {
        course::get_course_analytics(self, request, course_id).await
    }

    pub async fn get_overview(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        overview::get_overview(self, request).await
    }
}
