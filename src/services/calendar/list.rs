use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CalendarService;
use crate::models::ApiResponse;
use crate::models::calendar::requests::{CalendarEventListQuery, CalendarQueryParams};
use crate::models::calendar::responses::CalendarEventListResponse;
use crate::services::common::{current_user, load_course_for_member, storage_failure};

pub async fn list_events(
    service: &CalendarService,
    request: &HttpRequest,
    query: CalendarQueryParams,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    // 指定课程时只返回该课程的事件
    let list_query = match query.course_id {
        Some(course_id) => {
            if let Err(resp) = load_course_for_member(&storage, course_id, &user).await {
                return Ok(resp);
            }
            CalendarEventListQuery {
                course_ids: Some(vec![course_id]),
                include_general: false,
                date: query.date,
            }
        }
        None => {
            let course_ids: Vec<i64> = match storage.list_user_courses(user.id).await {
                Ok(courses) => courses.iter().map(|c| c.id).collect(),
                Err(e) => return Ok(storage_failure("Failed to load courses", e)),
            };
            CalendarEventListQuery {
                course_ids: Some(course_ids),
                include_general: true,
                date: query.date,
            }
        }
    };

    match storage.list_calendar_events(list_query).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            CalendarEventListResponse { items },
            "Calendar events retrieved successfully",
        ))),
        Err(e) => Ok(storage_failure("Failed to list calendar events", e)),
    }
}
