use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::NoteService;
use crate::models::ApiResponse;
use crate::models::notes::requests::{NoteListQuery, NoteQueryParams};
use crate::services::common::{current_user, storage_failure};

pub async fn list_notes(
    service: &NoteService,
    request: &HttpRequest,
    query: NoteQueryParams,
) -> ActixResult<HttpResponse> {
    let user = match current_user(request) {
        Ok(user) => user,
        Err(resp) => return Ok(resp),
    };
    let storage = service.get_storage(request);

    let (page, size) = query.pagination.normalized();
    let list_query = NoteListQuery {
        page: Some(page),
        size: Some(size),
        course_id: query.course_id,
        search: query.search,
    };

    match storage.list_notes_with_pagination(user.id, list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Note list retrieved successfully",
        ))),
        Err(e) => Ok(storage_failure("Failed to list notes", e)),
    }
}
