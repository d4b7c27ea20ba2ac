use crate::models::common::PaginationQuery;
use crate::models::common::pagination::deserialize_optional_string_to_i64;
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/note.ts")]
pub struct NoteQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(default, deserialize_with = "deserialize_optional_string_to_i64")]
    pub course_id: Option<i64>,
    pub search: Option<String>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/note.ts")]
pub struct CreateNoteRequest {
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub course_id: Option<i64>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub pinned: bool,
}

#[derive(Debug, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/note.ts")]
pub struct UpdateNoteRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub course_id: Option<i64>,
    pub tags: Option<Vec<String>>,
    pub pinned: Option<bool>,
}

// 笔记列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct NoteListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub course_id: Option<i64>,
    pub search: Option<String>,
}
