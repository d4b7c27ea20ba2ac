use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::views::{professor_view, student_view};
use super::{AssignmentService, load_assignment_for_member};
use crate::models::ApiResponse;
use crate::models::assignments::responses::AssignmentView;
use crate::services::common::{current_user, storage_failure};
use crate::storage::SubmissionListQuery;

pub async fn get_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let (assignment, course) = match load_assignment_for_member(&storage, assignment_id, &user).await
    {
        Ok(found) => found,
        Err(resp) => return Ok(resp),
    };

    let view = if course.is_instructor(user.id) {
        let submissions = match storage
            .list_submissions(SubmissionListQuery {
                assignment_ids: Some(vec![assignment.id]),
                student_id: None,
            })
            .await
        {
            Ok(submissions) => submissions,
            Err(e) => return Ok(storage_failure("Failed to list submissions", e)),
        };
        AssignmentView::Professor(professor_view(assignment, &course, &submissions))
    } else {
        let submission = match storage.get_submission(assignment.id, user.id).await {
            Ok(submission) => submission,
            Err(e) => return Ok(storage_failure("Failed to load submission", e)),
        };
        AssignmentView::Student(student_view(
            assignment,
            &course.code,
            submission,
            chrono::Utc::now(),
        ))
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        view,
        "Assignment retrieved successfully",
    )))
}
