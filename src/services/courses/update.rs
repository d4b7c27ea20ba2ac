use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::CourseService;
use crate::models::courses::requests::UpdateCourseRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{
    current_user, load_course_for_instructor, not_found, storage_failure, validation_failure,
};
use crate::utils::validate::FieldErrors;

pub async fn update_course(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
    update_data: UpdateCourseRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    // 提供了的字段不能为空
    if let Err(msg) = FieldErrors::new()
        .not_blank("code", update_data.code.as_deref())
        .not_blank("title", update_data.title.as_deref())
        .not_blank("schedule", update_data.schedule.as_deref())
        .finish()
    {
        return Ok(validation_failure(msg));
    }

    if let Err(resp) = load_course_for_instructor(&storage, course_id, &user).await {
        return Ok(resp);
    }

    match storage.update_course(course_id, update_data).await {
        Ok(Some(course)) => {
            info!("Course {} updated by professor {}", course.code, user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(course, "Course updated successfully")))
        }
        Ok(None) => Ok(not_found(ErrorCode::CourseNotFound, "Course not found")),
        Err(e) => Ok(storage_failure("Course update failed", e)),
    }
}
