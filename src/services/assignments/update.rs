use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{AssignmentService, load_assignment_for_instructor};
use crate::models::assignments::requests::UpdateAssignmentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{current_user, not_found, storage_failure, validation_failure};
use crate::utils::validate::FieldErrors;

pub async fn update_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
    update_data: UpdateAssignmentRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    if let Err(msg) = FieldErrors::new()
        .not_blank("title", update_data.title.as_deref())
        .positive("max_points", update_data.max_points)
        .finish()
    {
        return Ok(validation_failure(msg));
    }

    if let Err(resp) = load_assignment_for_instructor(&storage, assignment_id, &user).await {
        return Ok(resp);
    }

    match storage.update_assignment(assignment_id, update_data).await {
        Ok(Some(assignment)) => {
            info!("Assignment {} updated by professor {}", assignment.id, user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                assignment,
                "Assignment updated successfully",
            )))
        }
        Ok(None) => Ok(not_found(
            ErrorCode::AssignmentNotFound,
            "Assignment not found",
        )),
        Err(e) => Ok(storage_failure("Assignment update failed", e)),
    }
}
