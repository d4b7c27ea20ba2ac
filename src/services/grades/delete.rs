use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{GradeService, load_grade_for_instructor};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{current_user, not_found, storage_failure};

pub async fn delete_grade(
    service: &GradeService,
    request: &HttpRequest,
    grade_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    if let Err(resp) = load_grade_for_instructor(&storage, grade_id, &user).await {
        return Ok(resp);
    }

    match storage.delete_grade(grade_id).await {
        Ok(true) => {
            info!("Grade {} deleted by professor {}", grade_id, user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
                "Grade deleted successfully",
            )))
        }
        Ok(false) => Ok(not_found(ErrorCode::GradeNotFound, "Grade not found")),
        Err(e) => Ok(storage_failure("Grade deletion failed", e)),
    }
}
