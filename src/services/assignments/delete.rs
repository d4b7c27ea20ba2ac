use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{AssignmentService, load_assignment_for_instructor};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{current_user, not_found, storage_failure};

pub async fn delete_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    if let Err(resp) = load_assignment_for_instructor(&storage, assignment_id, &user).await {
        return Ok(resp);
    }

    match storage.delete_assignment(assignment_id).await {
        Ok(true) => {
            info!("Assignment {} deleted by professor {}", assignment_id, user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
                "Assignment deleted successfully",
            )))
        }
        Ok(false) => Ok(not_found(
            ErrorCode::AssignmentNotFound,
            "Assignment not found",
        )),
        Err(e) => Ok(storage_failure("Assignment deletion failed", e)),
    }
}
