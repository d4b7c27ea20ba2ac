use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::NotificationService;
use super::read::load_own_notification;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{current_user, not_found, storage_failure};

pub async fn delete_notification(
    service: &NotificationService,
    request: &HttpRequest,
    notification_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    if let Err(resp) = load_own_notification(&storage, notification_id, &user).await {
        return Ok(resp);
    }

    match storage.delete_notification(notification_id).await {
        Ok(true) => {
            info!("Notification {} deleted by user {}", notification_id, user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
                "Notification deleted successfully",
            )))
        }
        Ok(false) => Ok(not_found(
            ErrorCode::NotificationNotFound,
            "Notification not found",
        )),
        Err(e) => Ok(storage_failure("Failed to delete notification", e)),
    }
}
