use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{NoteService, check_note_course, load_own_note};
use crate::models::notes::requests::UpdateNoteRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::{current_user, not_found, storage_failure, validation_failure};
use crate::utils::validate::FieldErrors;

pub async fn update_note(
    service: &NoteService,
    request: &HttpRequest,
    note_id: i64,
    update_data: UpdateNoteRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    if let Err(msg) = FieldErrors::new()
        .not_blank("title", update_data.title.as_deref())
        .finish()
    {
        return Ok(validation_failure(msg));
    }
    if let Err(resp) = load_own_note(&storage, note_id, &user).await {
        return Ok(resp);
    }
    if let Err(resp) = check_note_course(&storage, update_data.course_id, &user).await {
        return Ok(resp);
    }

    match storage.update_note(note_id, update_data).await {
        Ok(Some(note)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(note, "Note updated successfully")))
        }
        Ok(None) => Ok(not_found(ErrorCode::NoteNotFound, "Note not found")),
        Err(e) => Ok(storage_failure("Note update failed", e)),
    }
}
