use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::GradeService;
use crate::models::grades::requests::CreateGradeRequest;
use crate::models::grades::responses::GradeView;
use crate::models::notifications::entities::NotificationType;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{
    current_user, load_course_for_instructor, storage_failure, validation_failure,
};
use crate::services::notifications::dispatch::{NotificationDraft, notify_users};
use crate::utils::validate::FieldErrors;

pub async fn create_grade(
    service: &GradeService,
    request: &HttpRequest,
    grade_data: CreateGradeRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let max_score = grade_data.max_score.unwrap_or(100.0);
    let checks = FieldErrors::new().positive("max_score", grade_data.max_score);
    let checks = if checks.is_valid() {
        checks.score_within("score", grade_data.score, max_score)
    } else {
        checks
    };
    if let Err(msg) = checks.finish() {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::GradeOutOfRange, msg)));
    }

    let course = match load_course_for_instructor(&storage, grade_data.course_id, &user).await {
        Ok(course) => course,
        Err(resp) => return Ok(resp),
    };
    if !course.is_enrolled(grade_data.student_id) {
        return Ok(validation_failure("The student is not enrolled in this course"));
    }

    // 关联的作业必须属于同一课程
    if let Some(assignment_id) = grade_data.assignment_id {
        match storage.get_assignment_by_id(assignment_id).await {
            Ok(Some(a)) if a.course_id == course.id => {}
            Ok(_) => {
                return Ok(validation_failure(
                    "assignment_id does not belong to this course",
                ));
            }
            Err(e) => return Ok(storage_failure("Failed to load assignment", e)),
        }
    }

    match storage.upsert_grade(user.id, grade_data).await {
        Ok(grade) => {
            info!(
                "Grade {} recorded for student {} in {}",
                grade.id, grade.student_id, course.code
            );
            let draft = NotificationDraft::new(
                NotificationType::Grade,
                "Grade posted",
                format!("A new grade was posted in {} {}", course.code, course.title),
            )
            .with_link("/grades");
            notify_users(&storage, &[grade.student_id], draft).await;

            Ok(HttpResponse::Created().json(ApiResponse::success(
                GradeView::from(grade),
                "Grade recorded successfully",
            )))
        }
        Err(e) => Ok(storage_failure("Failed to record grade", e)),
    }
}
