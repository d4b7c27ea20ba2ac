use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/chat.ts")]
pub struct CreateChatRoomRequest {
    pub name: String,
    pub course_id: Option<i64>,
    #[serde(default)]
    pub participants: Vec<i64>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/chat.ts")]
pub struct SendMessageRequest {
    pub content: String,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/chat.ts")]
pub struct MessageHistoryQuery {
    pub limit: Option<usize>,
}

/// 存储层追加消息
#[derive(Debug, Clone)]
pub struct NewChatMessage {
    pub chat_room_id: i64,
    pub sender_id: i64,
    pub content: String,
}
