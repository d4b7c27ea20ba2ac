//! 笔记存储操作

use super::MemoryStorage;
use crate::errors::Result;
use crate::models::{
    common::pagination::paginate,
    notes::{
        entities::Note,
        requests::{CreateNoteRequest, NoteListQuery, UpdateNoteRequest},
        responses::NoteListResponse,
    },
};

/// 去掉空白标签与重复标签，保留原始顺序
fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim().to_string();
        if !tag.is_empty() && !out.contains(&tag) {
            out.push(tag);
        }
    }
    out
}

impl MemoryStorage {
    /// 创建笔记
    pub async fn create_note_impl(&self, owner_id: i64, req: CreateNoteRequest) -> Result<Note> {
        let now = chrono::Utc::now();
        let note = self
            .notes
            .insert_with(|id| Note {
                id,
                owner_id,
                course_id: req.course_id,
                title: req.title.trim().to_string(),
                content: req.content,
                tags: normalize_tags(req.tags),
                pinned: req.pinned,
                created_at: now,
                updated_at: now,
            })
            .await;
        Ok(note)
    }

    /// 列出用户自己的笔记，置顶优先，其余按更新时间倒序
    pub async fn list_notes_with_pagination_impl(
        &self,
        owner_id: i64,
        query: NoteListQuery,
    ) -> Result<NoteListResponse> {
        let search = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());

        let mut notes = self
            .notes
            .filter(|n| {
                n.owner_id == owner_id
                    && query.course_id.is_none_or(|id| n.course_id == Some(id))
                    && search.is_none_or(|keyword| n.matches(keyword))
            })
            .await;
        notes.sort_by(|a, b| {
            b.pinned
                .cmp(&a.pinned)
                .then(b.updated_at.cmp(&a.updated_at))
                .then(b.id.cmp(&a.id))
        });

        let (items, pagination) =
            paginate(notes, query.page.unwrap_or(1), query.size.unwrap_or(10));
        Ok(NoteListResponse { pagination, items })
    }

    /// 更新笔记
    pub async fn update_note_impl(
        &self,
        note_id: i64,
        update: UpdateNoteRequest,
    ) -> Result<Option<Note>> {
        let now = chrono::Utc::now();
        Ok(self
            .notes
            .update(note_id, |n| {
                if let Some(title) = update.title {
                    n.title = title.trim().to_string();
                }
                if let Some(content) = update.content {
                    n.content = content;
                }
                if let Some(course_id) = update.course_id {
                    n.course_id = Some(course_id);
                }
                if let Some(tags) = update.tags {
                    n.tags = normalize_tags(tags);
                }
                if let Some(pinned) = update.pinned {
                    n.pinned = pinned;
                }
                n.updated_at = now;
            })
            .await)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::fixture_storage;
    use super::normalize_tags;
    use crate::models::notes::requests::{CreateNoteRequest, NoteListQuery, UpdateNoteRequest};

    #[test]
    fn test_normalize_tags() {
        let tags = vec![
            " exam ".to_string(),
            "".to_string(),
            "exam".to_string(),
            "rust".to_string(),
        ];
        assert_eq!(normalize_tags(tags), vec!["exam", "rust"]);
    }

    #[tokio::test]
    async fn test_notes_are_scoped_to_owner_and_pinned_first() {
        let storage = fixture_storage();
        let mine = storage
            .list_notes_with_pagination_impl(3, NoteListQuery::default())
            .await
            .unwrap();
        assert_eq!(mine.pagination.total, 3);
        assert!(mine.items.iter().all(|n| n.owner_id == 3));
        assert!(mine.items[0].pinned);
        // 未置顶的按更新时间倒序
        assert_eq!(mine.items[1].title, "Big-O cheatsheet");
    }

    #[tokio::test]
    async fn test_search_matches_tags_and_content() {
        let storage = fixture_storage();
        let by_tag = storage
            .list_notes_with_pagination_impl(
                3,
                NoteListQuery {
                    search: Some("COMPLEXITY".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(by_tag.items.len(), 1);

        let by_course = storage
            .list_notes_with_pagination_impl(
                3,
                NoteListQuery {
                    course_id: Some(1),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(by_course.items.len(), 1);
        assert_eq!(by_course.items[0].id, 1);
    }

    #[tokio::test]
    async fn test_create_and_update_note() {
        let storage = fixture_storage();
        let note = storage
            .create_note_impl(
                4,
                CreateNoteRequest {
                    title: "  Pointers ".to_string(),
                    content: String::new(),
                    course_id: None,
                    tags: vec!["c".to_string(), "c".to_string()],
                    pinned: false,
                },
            )
            .await
            .unwrap();
        assert_eq!(note.title, "Pointers");
        assert_eq!(note.tags, vec!["c"]);

        let updated = storage
            .update_note_impl(
                note.id,
                UpdateNoteRequest {
                    pinned: Some(true),
                    content: Some("Pointers hold addresses".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert!(updated.pinned);
        assert!(updated.updated_at >= note.updated_at);
        assert_eq!(updated.title, "Pointers");
    }
}
