use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/note.ts")]
pub struct Note {
    pub id: i64,
    pub owner_id: i64,
    #[serde(default)]
    pub course_id: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub pinned: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Note {
    /// 标题、正文或标签包含关键字（不区分大小写）
    pub fn matches(&self, keyword: &str) -> bool {
        let keyword = keyword.to_lowercase();
        self.title.to_lowercase().contains(&keyword)
            || self.content.to_lowercase().contains(&keyword)
            || self.tags.iter().any(|t| t.to_lowercase().contains(&keyword))
    }
}
