use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use crate::models::ApiResponse;
use crate::services::common::{current_user, load_course_for_member};

pub async fn get_course(
    service: &CourseService,
    request: &HttpRequest,
    course_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match load_course_for_member(&storage, course_id, &user).await {
        Ok(course) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            course,
            "Course information retrieved successfully",
        ))),
        Err(resp) => Ok(resp),
    }
}
