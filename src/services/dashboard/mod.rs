pub mod professor;
pub mod student;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::ApiResponse;
use crate::models::dashboard::DashboardResponse;
use crate::models::users::entities::UserRole;
use crate::services::common::current_user;
use crate::storage::Storage;

pub struct DashboardService {
    storage: Option<Arc<dyn Storage>>,
}

impl DashboardService {
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

    // 按当前角色返回仪表盘
    pub async fn get_dashboard(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let user = match current_user(request) {
            Ok(user) => user,
            Err(resp) => return Ok(resp),
        };
        let storage = self.get_storage(request);

        let dashboard = match user.role {
            UserRole::Student => student::load_student_dashboard(&storage, user.id)
                .await
                .map(DashboardResponse::Student),
            UserRole::Professor => professor::load_professor_dashboard(&storage, user.id)
                .await
                .map(DashboardResponse::Professor),
        };

        match dashboard {
            Ok(dashboard) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                dashboard,
                "Dashboard retrieved successfully",
            ))),
            Err(resp) => Ok(resp),
        }
    }
}
