use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::debug;

use super::{NoteService, check_note_course};
use crate::models::ApiResponse;
use crate::models::notes::requests::CreateNoteRequest;
use crate::services::common::{current_user, storage_failure, validation_failure};
use crate::utils::validate::FieldErrors;

pub async fn create_note(
    service: &NoteService,
    request: &HttpRequest,
    note_data: CreateNoteRequest,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    if let Err(msg) = FieldErrors::new()
        .require("title", &note_data.title)
        .finish()
    {
        return Ok(validation_failure(msg));
    }
    if let Err(resp) = check_note_course(&storage, note_data.course_id, &user).await {
        return Ok(resp);
    }

    match storage.create_note(user.id, note_data).await {
        Ok(note) => {
            debug!("Note {} created by user {}", note.id, user.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(note, "Note created successfully")))
        }
        Err(e) => Ok(storage_failure("Note creation failed", e)),
    }
}
