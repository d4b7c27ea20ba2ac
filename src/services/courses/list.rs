use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CourseService;
use crate::models::{
    ApiResponse,
    courses::requests::{CourseListQuery, CourseQueryParams},
    users::entities::UserRole,
};
use crate::services::common::{current_user, storage_failure};

pub async fn list_courses(
    service: &CourseService,
    request: &HttpRequest,
    query: CourseQueryParams,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let (page, size) = query.pagination.normalized();
    let mut list_query = CourseListQuery {
        page: Some(page),
        size: Some(size),
        search: query.search,
        ..Default::default()
    };

    // all=true 时浏览全部课程目录
    if !query.all {
        match user.role {
            UserRole::Student => list_query.student_id = Some(user.id),
            UserRole::Professor => list_query.instructor_id = Some(user.id),
        }
    }

    match storage.list_courses_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Course list retrieved successfully",
        ))),
        Err(e) => Ok(storage_failure("Failed to retrieve course list", e)),
    }
}
