use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AssignmentService, load_assignment_for_instructor};
use crate::models::ApiResponse;
use crate::models::assignments::responses::SubmissionListResponse;
use crate::services::common::{current_user, storage_failure};
use crate::storage::SubmissionListQuery;

pub async fn list_submissions(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let (assignment, course) =
        match load_assignment_for_instructor(&storage, assignment_id, &user).await {
            Ok(found) => found,
            Err(resp) => return Ok(resp),
        };

    match storage
        .list_submissions(SubmissionListQuery {
            assignment_ids: Some(vec![assignment.id]),
            student_id: None,
        })
        .await
    {
        Ok(items) => {
            // 选课但尚未提交的学生
            let missing_students = course
                .students
                .iter()
                .copied()
                .filter(|id| !items.iter().any(|s| s.student_id == *id))
                .collect();
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                SubmissionListResponse {
                    items,
                    missing_students,
                },
                "Submission list retrieved successfully",
            )))
        }
        Err(e) => Ok(storage_failure("Failed to list submissions", e)),
    }
}
