use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::notes::requests::{CreateNoteRequest, NoteQueryParams, UpdateNoteRequest};
use crate::services::NoteService;
use crate::utils::SafeNoteId;

static NOTE_SERVICE: Lazy<NoteService> = Lazy::new(NoteService::new_lazy);

pub async fn list_notes(
    req: HttpRequest,
    query: web::Query<NoteQueryParams>,
) -> ActixResult<HttpResponse> {
    NOTE_SERVICE.list_notes(&req, query.into_inner()).await
}

pub async fn create_note(
    req: HttpRequest,
    body: web::Json<CreateNoteRequest>,
) -> ActixResult<HttpResponse> {
    NOTE_SERVICE.create_note(&req, body.into_inner()).await
}

pub async fn get_note(req: HttpRequest, path: SafeNoteId) -> ActixResult<HttpResponse> {
    NOTE_SERVICE.get_note(&req, path.0).await
}

pub async fn update_note(
    req: HttpRequest,
    path: SafeNoteId,
    body: web::Json<UpdateNoteRequest>,
) -> ActixResult<HttpResponse> {
    NOTE_SERVICE
        .update_note(&req, path.0, body.into_inner())
        .await
}

pub async fn delete_note(req: HttpRequest, path: SafeNoteId) -> ActixResult<HttpResponse> {
    NOTE_SERVICE.delete_note(&req, path.0).await
}

// 笔记只对所有者开放，权限在业务层检查
pub fn configure_note_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/notes")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_notes))
                    .route(web::post().to(create_note)),
            )
            .service(
                web::resource("/{note_id}")
                    .route(web::get().to(get_note))
                    .route(web::put().to(update_note))
                    .route(web::delete().to(delete_note)),
            ),
    );
}
