use super::entities::Note;
use crate::models::common::PaginationInfo;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/note.ts")]
pub struct NoteListResponse {
    pub pagination: PaginationInfo,
    pub items: Vec<Note>,
}
