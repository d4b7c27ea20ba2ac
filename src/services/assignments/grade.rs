use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{info, warn};

use super::{AssignmentService, load_assignment_for_instructor};
use crate::models::assignments::requests::GradeSubmissionRequest;
use crate::models::grades::requests::CreateGradeRequest;
use crate::models::notifications::entities::NotificationType;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{current_user, not_found, storage_failure};
use crate::services::notifications::dispatch::{NotificationDraft, notify_users};
use crate::storage::SubmissionListQuery;
use crate::utils::validate::FieldErrors;

/// 为提交评分：写回提交记录，同步成绩表，并通知学生
pub async fn grade_submission(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
    submission_id: i64,
    grade_data: GradeSubmissionRequest,
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

    if let Err(msg) = FieldErrors::new()
        .score_within("score", grade_data.score, assignment.max_points)
        .finish()
    {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::GradeOutOfRange, msg)));
    }

    // 提交必须属于该作业
    let submission = match storage
        .list_submissions(SubmissionListQuery {
            assignment_ids: Some(vec![assignment.id]),
            student_id: None,
        })
        .await
    {
        Ok(list) => list.into_iter().find(|s| s.id == submission_id),
        Err(e) => return Ok(storage_failure("Failed to load submission", e)),
    };
    if submission.is_none() {
        return Ok(not_found(
            ErrorCode::SubmissionNotFound,
            "Submission not found",
        ));
    }

    let graded = match storage
        .grade_submission(submission_id, grade_data.score, grade_data.feedback.clone())
        .await
    {
        Ok(Some(graded)) => graded,
        Ok(None) => {
            return Ok(not_found(
                ErrorCode::SubmissionNotFound,
                "Submission not found",
            ));
        }
        Err(e) => return Ok(storage_failure("Grading failed", e)),
    };

    let grade_request = CreateGradeRequest {
        student_id: graded.student_id,
        course_id: course.id,
        assignment_id: Some(assignment.id),
        score: grade_data.score,
        max_score: Some(assignment.max_points),
        feedback: grade_data.feedback,
    };
    if let Err(e) = storage.upsert_grade(user.id, grade_request).await {
        warn!(
            "Submission {} graded but grade record was not saved: {}",
            submission_id, e
        );
    }

    info!(
        "Submission {} graded {}/{} by professor {}",
        submission_id, grade_data.score, assignment.max_points, user.id
    );

    let draft = NotificationDraft::new(
        NotificationType::Grade,
        "Grade posted",
        format!(
            "{}: {} was graded {}/{}",
            course.code, assignment.title, grade_data.score, assignment.max_points
        ),
    )
    .with_link("/grades");
    notify_users(&storage, &[graded.student_id], draft).await;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        graded,
        "Submission graded successfully",
    )))
}
