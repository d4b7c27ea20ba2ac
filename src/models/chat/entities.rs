use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/chat.ts")]
pub struct ChatRoom {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub course_id: Option<i64>,
    #[serde(default)]
    pub participants: Vec<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl ChatRoom {
    pub fn has_participant(&self, user_id: i64) -> bool {
        self.participants.contains(&user_id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/chat.ts")]
pub struct ChatMessage {
    pub id: i64,
    pub chat_room_id: i64,
    pub sender_id: i64,
    pub content: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    // 已读用户，发送者本人不记录
    #[serde(default)]
    pub read_by: Vec<i64>,
}

impl ChatMessage {
    /// 发送者视为已读
    pub fn is_read_by(&self, user_id: i64) -> bool {
        self.sender_id == user_id || self.read_by.contains(&user_id)
    }
}
