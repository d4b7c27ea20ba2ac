use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{NoteService, load_own_note};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{current_user, not_found, storage_failure};

pub async fn delete_note(
    service: &NoteService,
    request: &HttpRequest,
    note_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    if let Err(resp) = load_own_note(&storage, note_id, &user).await {
        return Ok(resp);
    }

    match storage.delete_note(note_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
            "Note deleted successfully",
        ))),
        Ok(false) => Ok(not_found(ErrorCode::NoteNotFound, "Note not found")),
        Err(e) => Ok(storage_failure("Note deletion failed", e)),
    }
}
