use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::CourseService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{
    current_user, load_course_for_instructor, not_found, storage_failure,
};

pub async fn delete_course(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let course = match load_course_for_instructor(&storage, course_id, &user).await {
        Ok(course) => course,
        Err(resp) => return Ok(resp),
    };

    match storage.delete_course(course_id).await {
        Ok(true) => {
            info!("Course {} deleted by professor {}", course.code, user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
                "Course deleted successfully",
            )))
        }
        Ok(false) => Ok(not_found(ErrorCode::CourseNotFound, "Course not found")),
        Err(e) => Ok(storage_failure("Course deletion failed", e)),
    }
}
