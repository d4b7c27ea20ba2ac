use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{GradeService, load_grade_for_instructor};
use crate::models::grades::requests::UpdateGradeRequest;
use crate::models::grades::responses::GradeView;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{current_user, not_found, storage_failure};
use crate::utils::validate::FieldErrors;

pub async fn update_grade(
    service: &GradeService,
    request: &HttpRequest,
    grade_id: i64,
    update_data: UpdateGradeRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let (grade, _course) = match load_grade_for_instructor(&storage, grade_id, &user).await {
        Ok(found) => found,
        Err(resp) => return Ok(resp),
    };

    // 按更新后的分数和满分校验
    let checks = FieldErrors::new().positive("max_score", update_data.max_score);
    let checks = if checks.is_valid() {
        checks.score_within(
            "score",
            update_data.score.unwrap_or(grade.score),
            update_data.max_score.unwrap_or(grade.max_score),
        )
    } else {
        checks
    };
    if let Err(msg) = checks.finish() {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::GradeOutOfRange, msg)));
    }

    match storage.update_grade(grade_id, update_data).await {
        Ok(Some(grade)) => {
            info!("Grade {} updated by professor {}", grade.id, user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                GradeView::from(grade),
                "Grade updated successfully",
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::GradeNotFound, "Grade not found")),
        Err(e) => Ok(storage_failure("Grade update failed", e)),
    }
}
