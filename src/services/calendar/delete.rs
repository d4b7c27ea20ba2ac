use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::CalendarService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{current_user, forbidden, not_found, storage_failure};

pub async fn delete_event(
    service: &CalendarService,
    request: &HttpRequest,
    event_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let event = match storage.get_calendar_event_by_id(event_id).await {
        Ok(Some(event)) => event,
        Ok(None) => {
            return Ok(not_found(
                ErrorCode::CalendarEventNotFound,
                "Calendar event not found",
            ));
        }
        Err(e) => return Ok(storage_failure("Failed to load calendar event", e)),
    };

    let mut allowed = event.created_by == user.id;
    if !allowed && let Some(course_id) = event.course_id {
        allowed = match storage.get_course_by_id(course_id).await {
            Ok(course) => course.is_some_and(|c| c.is_instructor(user.id)),
            Err(e) => return Ok(storage_failure("Failed to load course", e)),
        };
    }
    if !allowed {
        return Ok(forbidden(
            ErrorCode::CalendarPermissionDenied,
            "Only the creator or the course instructor can delete this event",
        ));
    }

    match storage.delete_calendar_event(event_id).await {
        Ok(true) => {
            info!("Calendar event {} deleted by user {}", event_id, user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
                "Calendar event deleted successfully",
            )))
        }
        Ok(false) => Ok(not_found(
            ErrorCode::CalendarEventNotFound,
            "Calendar event not found",
        )),
        Err(e) => Ok(storage_failure("Calendar event deletion failed", e)),
    }
}
