use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::CourseService;
use crate::models::ApiResponse;
use crate::models::courses::requests::CreateCourseRequest;
use crate::services::common::{current_user, storage_failure, validation_failure};
use crate::utils::validate::FieldErrors;

pub async fn create_course(
    service: &CourseService,
    request: &HttpRequest,
    course_data: CreateCourseRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    if let Err(msg) = FieldErrors::new()
        .require("code", &course_data.code)
        .require("title", &course_data.title)
        .require("schedule", &course_data.schedule)
        .finish()
    {
        return Ok(validation_failure(msg));
    }

    // 任课教师即创建者
    match storage.create_course(user.id, course_data).await {
        Ok(course) => {
            info!("Course {} created by professor {}", course.code, user.id);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(course, "Course created successfully")))
        }
        Err(e) => Ok(storage_failure("Course creation failed", e)),
    }
}
