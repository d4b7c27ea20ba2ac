use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;

use super::AnalyticsService;
use super::compute::course_analytics;
use crate::models::ApiResponse;
use crate::models::assignments::requests::AssignmentListQuery;
use crate::models::grades::requests::GradeListQuery;
use crate::services::common::{current_user, load_course_for_instructor, storage_failure};
use crate::storage::SubmissionListQuery;

pub async fn get_course_analytics(
    service: &AnalyticsService,
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

    let assignments = match storage
        .list_assignments(AssignmentListQuery {
            course_ids: Some(vec![course.id]),
        })
        .await
    {
        Ok(assignments) => assignments,
        Err(e) => return Ok(storage_failure("Failed to load assignments", e)),
    };
    let submissions = match storage
        .list_submissions(SubmissionListQuery {
            assignment_ids: Some(assignments.iter().map(|a| a.id).collect()),
            student_id: None,
        })
        .await
    {
        Ok(submissions) => submissions,
        Err(e) => return Ok(storage_failure("Failed to load submissions", e)),
    };
    let grades = match storage
        .list_grades(GradeListQuery {
            course_ids: Some(vec![course.id]),
            ..Default::default()
        })
        .await
    {
        Ok(grades) => grades,
        Err(e) => return Ok(storage_failure("Failed to load grades", e)),
    };

    let analytics = course_analytics(&course, &assignments, &submissions, &grades, Utc::now());
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        analytics,
        "Course analytics retrieved successfully",
    )))
}
