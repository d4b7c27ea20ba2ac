use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GradeService;
use crate::models::grades::requests::{GradeListQuery, GradeQueryParams};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{current_user, forbidden, storage_failure};

pub async fn list_grades(
    service: &GradeService,
    request: &HttpRequest,
    query: GradeQueryParams,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let (page, size) = query.pagination.normalized();
    let mut list_query = GradeListQuery {
        page: Some(page),
        size: Some(size),
        ..Default::default()
    };

    // 权限过滤
    match user.role {
        UserRole::Student => {
            // 学生只能查看自己的成绩
            list_query.student_id = Some(user.id);
            list_query.course_ids = query.course_id.map(|id| vec![id]);
        }
        UserRole::Professor => {
            let taught: Vec<i64> = match storage.list_user_courses(user.id).await {
                Ok(courses) => courses
                    .iter()
                    .filter(|c| c.is_instructor(user.id))
                    .map(|c| c.id)
                    .collect(),
                Err(e) => return Ok(storage_failure("Failed to load courses", e)),
            };
            list_query.course_ids = match query.course_id {
                Some(id) if taught.contains(&id) => Some(vec![id]),
                Some(_) => {
                    return Ok(forbidden(
                        ErrorCode::CoursePermissionDenied,
                        "You can only view grades of your own courses",
                    ));
                }
                None => Some(taught),
            };
            list_query.student_id = query.student_id;
        }
    }

    match storage.list_grades_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Grade list retrieved successfully",
        ))),
        Err(e) => Ok(storage_failure("Failed to list grades", e)),
    }
}
