use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use super::views::{professor_view, student_views};
use crate::models::assignments::requests::{AssignmentListQuery, AssignmentQueryParams};
use crate::models::assignments::responses::{AssignmentListResponse, AssignmentView};
use crate::models::common::pagination::paginate;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{current_user, forbidden, storage_failure};
use crate::storage::SubmissionListQuery;

pub async fn list_assignments(
    service: &AssignmentService,
    request: &HttpRequest,
    query: AssignmentQueryParams,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);
    let (page, size) = query.pagination.normalized();

    // 学生只看已选课程，教师只看任教课程
    let courses = match storage.list_user_courses(user.id).await {
        Ok(courses) => courses
            .into_iter()
            .filter(|c| match user.role {
                UserRole::Student => c.is_enrolled(user.id),
                UserRole::Professor => c.is_instructor(user.id),
            })
            .collect::<Vec<_>>(),
        Err(e) => return Ok(storage_failure("Failed to load courses", e)),
    };

    let mut course_ids: Vec<i64> = courses.iter().map(|c| c.id).collect();
    if let Some(course_id) = query.course_id {
        if !course_ids.contains(&course_id) {
            return Ok(forbidden(
                ErrorCode::CoursePermissionDenied,
                "You are not a member of this course",
            ));
        }
        course_ids = vec![course_id];
    }

    let assignments = match storage
        .list_assignments(AssignmentListQuery {
            course_ids: Some(course_ids),
        })
        .await
    {
        Ok(assignments) => assignments
            .into_iter()
            .filter(|a| query.assignment_type.is_none_or(|t| a.assignment_type == t))
            .collect::<Vec<_>>(),
        Err(e) => return Ok(storage_failure("Failed to list assignments", e)),
    };

    let assignment_ids: Vec<i64> = assignments.iter().map(|a| a.id).collect();
    let submissions = match storage
        .list_submissions(SubmissionListQuery {
            assignment_ids: Some(assignment_ids),
            student_id: (user.role == UserRole::Student).then_some(user.id),
        })
        .await
    {
        Ok(submissions) => submissions,
        Err(e) => return Ok(storage_failure("Failed to list submissions", e)),
    };

    let views: Vec<AssignmentView> = match user.role {
        UserRole::Student => {
            student_views(assignments, &courses, submissions, chrono::Utc::now())
                .into_iter()
                .filter(|v| query.status.is_none_or(|s| v.status == s))
                .map(AssignmentView::Student)
                .collect()
        }
        UserRole::Professor => assignments
            .into_iter()
            .filter_map(|a| {
                let course = courses.iter().find(|c| c.id == a.course_id)?;
                Some(AssignmentView::Professor(professor_view(
                    a,
                    course,
                    &submissions,
                )))
            })
            .collect(),
    };

    let (items, pagination) = paginate(views, page, size);
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        AssignmentListResponse { pagination, items },
        "Assignment list retrieved successfully",
    )))
}
