use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AnalyticsService;
use super::compute::course_overview;
use crate::models::ApiResponse;
use crate::models::analytics::AnalyticsOverviewResponse;
use crate::models::assignments::requests::AssignmentListQuery;
use crate::models::courses::entities::Course;
use crate::models::grades::requests::GradeListQuery;
use crate::services::common::{current_user, storage_failure};
use crate::storage::SubmissionListQuery;

pub async fn get_overview(
    service: &AnalyticsService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let courses: Vec<Course> = match storage.list_user_courses(user.id).await {
        Ok(courses) => courses
            .into_iter()
            .filter(|c| c.is_instructor(user.id))
            .collect(),
        Err(e) => return Ok(storage_failure("Failed to load courses", e)),
    };
    let course_ids: Vec<i64> = courses.iter().map(|c| c.id).collect();

    let assignments = match storage
        .list_assignments(AssignmentListQuery {
            course_ids: Some(course_ids.clone()),
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
            course_ids: Some(course_ids),
            ..Default::default()
        })
        .await
    {
        Ok(grades) => grades,
        Err(e) => return Ok(storage_failure("Failed to load grades", e)),
    };

    let response = AnalyticsOverviewResponse {
        courses: courses
            .iter()
            .map(|c| course_overview(c, &assignments, &submissions, &grades))
            .collect(),
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Analytics overview retrieved successfully",
    )))
}
