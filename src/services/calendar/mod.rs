pub mod create;
pub mod delete;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::calendar::requests::{CalendarQueryParams, CreateCalendarEventRequest};
use crate::storage::Storage;

pub struct CalendarService {
    storage: Option<Arc<dyn Storage>>,
}

impl CalendarService {
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

    // 全校事件加上用户参与课程的事件
    pub async fn list_events(
        &self,
        request: &HttpRequest,
        query: CalendarQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_events(self, request, query).await
    }

    pub async fn create_event(
        &self,
        request: &HttpRequest,
        event_data: CreateCalendarEventRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_event(self, request, event_data).await
    }

    // 创建者或课程教师可删除
    pub async fn delete_event(&self, request: &HttpRequest, event_id: i64) -> ActixResult<HttpResponse> {
        delete::delete_event(self, request, event_id).await
    }
}
