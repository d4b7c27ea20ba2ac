use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::NotificationService;
use crate::models::ApiResponse;
use crate::models::notifications::responses::UnreadCountResponse;
use crate::services::common::{current_user, storage_failure};

pub async fn get_unread_count(
    service: &NotificationService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match storage.get_unread_notification_count(user.id).await {
        Ok(count) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            UnreadCountResponse {
                unread_count: count,
            },
            "Unread count retrieved successfully",
        ))),
        Err(e) => Ok(storage_failure("Failed to count unread notifications", e)),
    }
}
