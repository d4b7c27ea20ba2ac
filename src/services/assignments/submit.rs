use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::views::student_view;
use super::{AssignmentService, load_assignment_for_member};
use crate::models::assignments::requests::SubmitAssignmentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{current_user, forbidden, storage_failure, validation_failure};
use crate::utils::validate::FieldErrors;

pub async fn submit_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
    submission: SubmitAssignmentRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    if let Err(msg) = FieldErrors::new()
        .require("content", &submission.content)
        .finish()
    {
        return Ok(validation_failure(msg));
    }

    let (assignment, course) =
        match load_assignment_for_member(&storage, assignment_id, &user).await {
            Ok(found) => found,
            Err(resp) => return Ok(resp),
        };
    if !course.is_enrolled(user.id) {
        return Ok(forbidden(
            ErrorCode::NotEnrolled,
            "Only enrolled students can submit this assignment",
        ));
    }

    // 截止后只有允许迟交的作业接受提交
    let now = chrono::Utc::now();
    if now > assignment.due_date && !assignment.allow_late_submission {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::SubmissionClosed,
            "The due date has passed and late submissions are not accepted",
        )));
    }

    match storage
        .upsert_submission(assignment.id, user.id, submission)
        .await
    {
        Ok(saved) => {
            let view = student_view(assignment, &course.code, Some(saved), now);
            info!(
                "Student {} submitted assignment {} ({})",
                user.id, view.assignment.id, view.status
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                view,
                "Assignment submitted successfully",
            )))
        }
        Err(e) => Ok(storage_failure("Submission failed", e)),
    }
}
