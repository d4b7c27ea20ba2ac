use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::NotificationService;
use crate::models::ApiResponse;
use crate::models::notifications::requests::NotificationQueryParams;
use crate::services::common::{current_user, storage_failure};

pub async fn list_notifications(
    service: &NotificationService,
    request: &HttpRequest,
    query: NotificationQueryParams,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match storage
        .list_notifications_with_pagination(user.id, query)
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Notifications retrieved successfully",
        ))),
        Err(e) => Ok(storage_failure("Failed to list notifications", e)),
    }
}
