use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::NotificationService;
use crate::models::notifications::entities::Notification;
use crate::models::notifications::responses::MarkAllReadResponse;
use crate::models::users::entities::User;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{current_user, forbidden, not_found, storage_failure};
use crate::storage::Storage;

pub async fn mark_as_read(
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

    match storage.mark_notification_as_read(notification_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
            "Notification marked as read",
        ))),
        Ok(false) => Ok(not_found(
            ErrorCode::NotificationNotFound,
            "Notification not found",
        )),
        Err(e) => Ok(storage_failure("Failed to mark notification as read", e)),
    }
}

pub async fn mark_all_as_read(
    service: &NotificationService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match storage.mark_all_notifications_as_read(user.id).await {
        Ok(marked_count) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            MarkAllReadResponse { marked_count },
            "All notifications marked as read",
        ))),
        Err(e) => Ok(storage_failure("Failed to mark notifications as read", e)),
    }
}

/// 只能操作自己的通知
pub(super) async fn load_own_notification(
    storage: &Arc<dyn Storage>,
    notification_id: i64,
    user: &User,
) -> Result<Notification, HttpResponse> {
    match storage.get_notification_by_id(notification_id).await {
        Ok(Some(n)) if n.user_id == user.id => Ok(n),
        Ok(Some(_)) => Err(forbidden(
            ErrorCode::PermissionDenied,
            "You can only access your own notifications",
        )),
        Ok(None) => Err(not_found(
            ErrorCode::NotificationNotFound,
            "Notification not found",
        )),
        Err(e) => Err(storage_failure("Failed to load notification", e)),
    }
}
