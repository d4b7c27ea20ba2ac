pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::ErrorCode;
use crate::models::notes::entities::Note;
use crate::models::notes::requests::{CreateNoteRequest, NoteQueryParams, UpdateNoteRequest};
use crate::models::users::entities::User;
use crate::services::common::{forbidden, load_course_for_member, not_found, storage_failure};
use crate::storage::Storage;

pub struct NoteService {
    storage: Option<Arc<dyn Storage>>,
}

impl NoteService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 置顶在前，其余按更新时间倒序
    pub async fn list_notes(
        &self,
        request: &HttpRequest,
        query: NoteQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_notes(self, request, query).await
    }

    pub async fn get_note(&self, request: &HttpRequest, note_id: i64) -> ActixResult<HttpResponse> {
        get::get_note(self, request, note_id).await
    }

    pub async fn create_note(
        &self,
        request: &HttpRequest,
        note_data: CreateNoteRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_note(self, request, note_data).await
    }

    pub async fn update_note(
        &self,
        request: &HttpRequest,
        note_id: i64,
        update_data: UpdateNoteRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_note(self, request, note_id, update_data).await
    }

    pub async fn delete_note(&self, request: &HttpRequest, note_id: i64) -> ActixResult<HttpResponse> {
        delete::delete_note(self, request, note_id).await
    }
}

/// 笔记只对其所有者可见
async fn load_own_note(
    storage: &Arc<dyn Storage>,
    note_id: i64,
    user: &User,
) -> Result<Note, HttpResponse> {
    match storage.get_note_by_id(note_id).await {
        Ok(Some(note)) if note.owner_id == user.id => Ok(note),
        Ok(Some(_)) => Err(forbidden(
            ErrorCode::PermissionDenied,
            "You can only access your own notes",
        )),
        Ok(None) => Err(not_found(ErrorCode::NoteNotFound, "Note not found")),
        Err(e) => Err(storage_failure("Failed to load note", e)),
    }
}

/// 笔记关联的课程必须是用户参与的课程
async fn check_note_course(
    storage: &Arc<dyn Storage>,
    course_id: Option<i64>,
    user: &User,
) -> Result<(), HttpResponse> {
    if let Some(course_id) = course_id {
        load_course_for_member(storage, course_id, user).await?;
    }
    Ok(())
}
