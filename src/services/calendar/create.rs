use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::CalendarService;
use crate::models::ApiResponse;
use crate::models::calendar::requests::{CreateCalendarEventRequest, NewCalendarEvent};
use crate::models::notifications::entities::NotificationType;
use crate::services::common::{
    current_user, load_course_for_instructor, storage_failure, validation_failure,
};
use crate::services::notifications::dispatch::{NotificationDraft, notify_users};
use crate::utils::validate::FieldErrors;

pub async fn create_event(
    service: &CalendarService,
    request: &HttpRequest,
    event_data: CreateCalendarEventRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    if let Err(msg) = FieldErrors::new()
        .require("title", &event_data.title)
        .require_some("start_time", event_data.start_time.as_ref())
        .require_some("end_time", event_data.end_time.as_ref())
        .finish()
    {
        return Ok(validation_failure(msg));
    }
    let (Some(start_time), Some(end_time)) = (event_data.start_time, event_data.end_time) else {
        return Ok(validation_failure("start_time and end_time are required"));
    };
    if end_time <= start_time {
        return Ok(validation_failure("end_time must be after start_time"));
    }

    // 课程事件只能由任课教师创建
    let course = match event_data.course_id {
        Some(course_id) => match load_course_for_instructor(&storage, course_id, &user).await {
            Ok(course) => Some(course),
            Err(resp) => return Ok(resp),
        },
        None => None,
    };

    let new_event = NewCalendarEvent {
        title: event_data.title,
        description: event_data.description,
        course_id: event_data.course_id,
        event_type: event_data.event_type,
        start_time,
        end_time,
        location: event_data.location,
        created_by: user.id,
    };

    match storage.create_calendar_event(new_event).await {
        Ok(event) => {
            info!("Calendar event {} created by user {}", event.id, user.id);

            if let Some(course) = course {
                let draft = NotificationDraft::new(
                    NotificationType::Announcement,
                    "New calendar event",
                    format!(
                        "{}: {} on {}",
                        course.code,
                        event.title,
                        event.start_time.format("%Y-%m-%d %H:%M UTC")
                    ),
                )
                .with_link("/calendar");
                notify_users(&storage, &course.students, draft).await;
            }

            Ok(HttpResponse::Created().json(ApiResponse::success(
                event,
                "Calendar event created successfully",
            )))
        }
        Err(e) => Ok(storage_failure("Calendar event creation failed", e)),
    }
}
