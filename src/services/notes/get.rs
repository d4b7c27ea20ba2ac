use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{NoteService, load_own_note};
use crate::models::ApiResponse;
use crate::services::common::current_user;

pub async fn get_note(
    service: &NoteService,
    request: &HttpRequest,
    note_id: i64,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    match load_own_note(&storage, note_id, &user).await {
        Ok(note) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            note,
            "Note retrieved successfully",
        ))),
        Err(resp) => Ok(resp),
    }
}
